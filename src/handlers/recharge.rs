use crate::models::*;
use crate::services::RechargeService;
use actix_web::{HttpRequest, HttpResponse, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/api/recharges",
    tag = "recharges",
    responses(
        (status = 200, description = "All recharges with the client's name", body = [RechargeResponse])
    )
)]
pub async fn list_recharges(
    req: HttpRequest,
    recharge_service: web::Data<RechargeService>,
) -> Result<HttpResponse> {
    match recharge_service.list_recharges().await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "count": data.len(),
            "data": data
        }))),
        Err(e) => Ok(e.respond_to(&req)),
    }
}

#[utoipa::path(
    get,
    path = "/api/recharges/client/{client_id}",
    tag = "recharges",
    params(("client_id" = String, Path, description = "External client reference")),
    responses(
        (status = 200, description = "Recharges and total for one client", body = ClientRecharges)
    )
)]
pub async fn recharges_by_client(
    req: HttpRequest,
    recharge_service: web::Data<RechargeService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match recharge_service.recharges_by_client(&path).await {
        Ok(result) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "clientId": result.client_id,
            "count": result.count,
            "totalAmount": result.total_amount,
            "data": result.data
        }))),
        Err(e) => Ok(e.respond_to(&req)),
    }
}

#[utoipa::path(
    post,
    path = "/api/recharges",
    tag = "recharges",
    request_body = CreateRechargeRequest,
    responses(
        (status = 201, description = "Recharge recorded", body = RechargeResponse),
        (status = 400, description = "Missing client_id, amount or recharge_date", body = ErrorResponse)
    )
)]
pub async fn create_recharge(
    req: HttpRequest,
    recharge_service: web::Data<RechargeService>,
    request: web::Json<CreateRechargeRequest>,
) -> Result<HttpResponse> {
    match recharge_service.create_recharge(request.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "message": "Recharge recorded successfully",
            "data": data
        }))),
        Err(e) => Ok(e.respond_to(&req)),
    }
}

#[utoipa::path(
    delete,
    path = "/api/recharges/{id}",
    tag = "recharges",
    params(("id" = i64, Path, description = "Recharge id")),
    responses(
        (status = 200, description = "Recharge deleted", body = MessageResponse),
        (status = 404, description = "Recharge not found", body = ErrorResponse)
    )
)]
pub async fn delete_recharge(
    req: HttpRequest,
    recharge_service: web::Data<RechargeService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match recharge_service.delete_recharge(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(MessageResponse {
            success: true,
            message: "Recharge deleted successfully".to_string(),
        })),
        Err(e) => Ok(e.respond_to(&req)),
    }
}

pub fn recharge_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/recharges")
            .route("", web::get().to(list_recharges))
            .route("", web::post().to(create_recharge))
            .route("/client/{client_id}", web::get().to(recharges_by_client))
            .route("/{id}", web::delete().to(delete_recharge)),
    );
}
