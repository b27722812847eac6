pub mod membership;
pub mod notification;
pub mod recharge;
pub mod report;

pub use membership::membership_config;
pub use notification::notification_config;
pub use recharge::recharge_config;
pub use report::report_config;

use crate::error::AppError;
use actix_web::error::InternalError;
use actix_web::{HttpRequest, HttpResponse, web};
use serde_json::json;

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| {
        let response =
            AppError::ValidationError(format!("Invalid request body: {err}")).respond_to(req);
        InternalError::from_response(err, response).into()
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, req| {
        let response =
            AppError::ValidationError(format!("Invalid query string: {err}")).respond_to(req);
        InternalError::from_response(err, response).into()
    })
}

// a non-numeric id cannot match any resource
fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, req| {
        InternalError::from_response(err, AppError::RouteNotFound.respond_to(req)).into()
    })
}

/// Extractor error handlers plus every `/api` route.
pub fn api_config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        .route("/", web::get().to(root))
        .service(
            web::scope("/api")
                .configure(membership_config)
                .configure(recharge_config)
                .configure(report_config)
                .configure(notification_config),
        );
}

pub async fn root() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "name": "Membership Management API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "endpoints": {
            "memberships": "/api/memberships",
            "recharges": "/api/recharges",
            "reports": "/api/reports",
            "notifications": "/api/notifications",
            "docs": "/swagger-ui/"
        }
    }))
}

pub async fn not_found(req: HttpRequest) -> HttpResponse {
    AppError::RouteNotFound.respond_to(&req)
}
