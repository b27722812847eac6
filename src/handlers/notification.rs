use crate::models::*;
use crate::services::NotificationService;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/api/notifications/pending",
    tag = "notifications",
    responses(
        (status = 200, description = "Memberships due for a reminder", body = [ExpiringMembership])
    )
)]
pub async fn pending(
    req: HttpRequest,
    notification_service: web::Data<NotificationService>,
) -> Result<HttpResponse> {
    match notification_service.pending().await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "count": data.len(),
            "data": data
        }))),
        Err(e) => Ok(e.respond_to(&req)),
    }
}

#[utoipa::path(
    post,
    path = "/api/notifications/send",
    tag = "notifications",
    request_body = SendNotificationRequest,
    responses(
        (status = 200, description = "Reminder text and WhatsApp link", body = SendNotificationResponse),
        (status = 400, description = "membershipId missing", body = ErrorResponse),
        (status = 404, description = "Membership not found", body = ErrorResponse)
    )
)]
pub async fn send(
    req: HttpRequest,
    notification_service: web::Data<NotificationService>,
    request: web::Json<SendNotificationRequest>,
) -> Result<HttpResponse> {
    match notification_service.send(request.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Notification prepared successfully",
            "data": data
        }))),
        Err(e) => Ok(e.respond_to(&req)),
    }
}

/// Starts a scan in the background and answers immediately.
#[utoipa::path(
    post,
    path = "/api/notifications/check-and-send",
    tag = "notifications",
    responses(
        (status = 202, description = "Scan started", body = MessageResponse)
    )
)]
pub async fn check_and_send(
    notification_service: web::Data<NotificationService>,
) -> Result<HttpResponse> {
    let svc = notification_service.get_ref().clone();
    tokio::spawn(async move {
        match svc.check_and_notify().await {
            Ok(n) => log::info!("Manual expiry check finished: {n} notification(s) queued"),
            Err(e) => log::error!("Manual expiry check failed: {e:?}"),
        }
    });

    Ok(HttpResponse::build(StatusCode::ACCEPTED).json(MessageResponse {
        success: true,
        message: "Expiry check started".to_string(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/notifications/history",
    tag = "notifications",
    responses(
        (status = 200, description = "Latest 100 log entries", body = [NotificationHistoryEntry])
    )
)]
pub async fn history(
    req: HttpRequest,
    notification_service: web::Data<NotificationService>,
) -> Result<HttpResponse> {
    match notification_service.history().await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "count": data.len(),
            "data": data
        }))),
        Err(e) => Ok(e.respond_to(&req)),
    }
}

pub fn notification_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/notifications")
            .route("/pending", web::get().to(pending))
            .route("/send", web::post().to(send))
            .route("/check-and-send", web::post().to(check_and_send))
            .route("/history", web::get().to(history)),
    );
}
