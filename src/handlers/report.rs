use crate::models::*;
use crate::services::ReportService;
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/api/reports/summary",
    tag = "reports",
    responses(
        (status = 200, description = "Overall totals and per-status breakdown", body = ReportOverview)
    )
)]
pub async fn summary(
    req: HttpRequest,
    report_service: web::Data<ReportService>,
) -> Result<HttpResponse> {
    match report_service.summary().await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": data
        }))),
        Err(e) => Ok(e.respond_to(&req)),
    }
}

#[utoipa::path(
    get,
    path = "/api/reports/detailed",
    tag = "reports",
    params(DateRangeQuery),
    responses(
        (status = 200, description = "Itemized memberships purchased in the range", body = DetailedReport),
        (status = 400, description = "startDate or endDate missing or malformed", body = ErrorResponse)
    )
)]
pub async fn detailed(
    req: HttpRequest,
    report_service: web::Data<ReportService>,
    query: web::Query<DateRangeQuery>,
) -> Result<HttpResponse> {
    match report_service.detailed(&query).await {
        Ok(report) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "period": report.period,
            "summary": report.summary,
            "details": report.details
        }))),
        Err(e) => Ok(e.respond_to(&req)),
    }
}

#[utoipa::path(
    get,
    path = "/api/reports/monthly",
    tag = "reports",
    responses(
        (status = 200, description = "Last twelve months, newest first", body = [MonthlySummaryRow])
    )
)]
pub async fn monthly(
    req: HttpRequest,
    report_service: web::Data<ReportService>,
) -> Result<HttpResponse> {
    match report_service.monthly().await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": data
        }))),
        Err(e) => Ok(e.respond_to(&req)),
    }
}

#[utoipa::path(
    get,
    path = "/api/reports/export",
    tag = "reports",
    params(DateRangeQuery),
    responses(
        (status = 200, description = "CSV attachment", body = String, content_type = "text/csv"),
        (status = 400, description = "startDate or endDate missing or malformed", body = ErrorResponse)
    )
)]
pub async fn export_csv(
    req: HttpRequest,
    report_service: web::Data<ReportService>,
    query: web::Query<DateRangeQuery>,
) -> Result<HttpResponse> {
    match report_service.export_csv(&query).await {
        Ok(report) => Ok(HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", report.filename),
            ))
            .body(report.body)),
        Err(e) => Ok(e.respond_to(&req)),
    }
}

pub fn report_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/reports")
            .route("/summary", web::get().to(summary))
            .route("/detailed", web::get().to(detailed))
            .route("/monthly", web::get().to(monthly))
            .route("/export", web::get().to(export_csv)),
    );
}
