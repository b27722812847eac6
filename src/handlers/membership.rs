use crate::models::*;
use crate::services::MembershipService;
use actix_web::{HttpRequest, HttpResponse, Result, web};
use serde_json::{Map, Value, json};

#[utoipa::path(
    get,
    path = "/api/memberships",
    tag = "memberships",
    responses(
        (status = 200, description = "All memberships, newest first", body = [MembershipResponse]),
        (status = 500, description = "Database error", body = ErrorResponse)
    )
)]
pub async fn list_memberships(
    req: HttpRequest,
    membership_service: web::Data<MembershipService>,
) -> Result<HttpResponse> {
    match membership_service.list_memberships().await {
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
    path = "/api/memberships/{id}",
    tag = "memberships",
    params(("id" = i64, Path, description = "Membership id")),
    responses(
        (status = 200, description = "Membership found", body = MembershipResponse),
        (status = 404, description = "Membership not found", body = ErrorResponse)
    )
)]
pub async fn get_membership(
    req: HttpRequest,
    membership_service: web::Data<MembershipService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match membership_service.get_membership(path.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": data
        }))),
        Err(e) => Ok(e.respond_to(&req)),
    }
}

#[utoipa::path(
    get,
    path = "/api/memberships/search/filter",
    tag = "memberships",
    params(MembershipSearchQuery),
    responses(
        (status = 200, description = "Matching memberships", body = [MembershipResponse])
    )
)]
pub async fn search_memberships(
    req: HttpRequest,
    membership_service: web::Data<MembershipService>,
    query: web::Query<MembershipSearchQuery>,
) -> Result<HttpResponse> {
    let filters = query.into_inner();
    match membership_service.search_memberships(&filters).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "count": data.len(),
            "filters": filters,
            "data": data
        }))),
        Err(e) => Ok(e.respond_to(&req)),
    }
}

#[utoipa::path(
    post,
    path = "/api/memberships",
    tag = "memberships",
    request_body = CreateMembershipRequest,
    responses(
        (status = 201, description = "Membership created", body = MembershipResponse),
        (status = 400, description = "Missing required fields", body = ErrorResponse)
    )
)]
pub async fn create_membership(
    req: HttpRequest,
    membership_service: web::Data<MembershipService>,
    request: web::Json<CreateMembershipRequest>,
) -> Result<HttpResponse> {
    match membership_service
        .create_membership(request.into_inner())
        .await
    {
        Ok(data) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "message": "Membership created successfully",
            "data": data
        }))),
        Err(e) => Ok(e.respond_to(&req)),
    }
}

/// Any subset of the updatable fields; absent keys are left untouched and an
/// explicit `null` clears the column.
#[utoipa::path(
    put,
    path = "/api/memberships/{id}",
    tag = "memberships",
    params(("id" = i64, Path, description = "Membership id")),
    request_body(content = CreateMembershipRequest, description = "Fields to change"),
    responses(
        (status = 200, description = "Membership updated", body = MembershipResponse),
        (status = 400, description = "No updatable fields or mistyped value", body = ErrorResponse),
        (status = 404, description = "Membership not found", body = ErrorResponse)
    )
)]
pub async fn update_membership(
    req: HttpRequest,
    membership_service: web::Data<MembershipService>,
    path: web::Path<i64>,
    changes: web::Json<Map<String, Value>>,
) -> Result<HttpResponse> {
    match membership_service
        .update_membership(path.into_inner(), &changes)
        .await
    {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Membership updated successfully",
            "data": data
        }))),
        Err(e) => Ok(e.respond_to(&req)),
    }
}

#[utoipa::path(
    delete,
    path = "/api/memberships/{id}",
    tag = "memberships",
    params(("id" = i64, Path, description = "Membership id")),
    responses(
        (status = 200, description = "Membership deleted", body = MessageResponse),
        (status = 404, description = "Membership not found", body = ErrorResponse)
    )
)]
pub async fn delete_membership(
    req: HttpRequest,
    membership_service: web::Data<MembershipService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match membership_service.delete_membership(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(MessageResponse {
            success: true,
            message: "Membership deleted successfully".to_string(),
        })),
        Err(e) => Ok(e.respond_to(&req)),
    }
}

#[utoipa::path(
    get,
    path = "/api/memberships/stats/summary",
    tag = "memberships",
    responses(
        (status = 200, description = "Status counts and financial totals", body = MembershipStats)
    )
)]
pub async fn get_stats(
    req: HttpRequest,
    membership_service: web::Data<MembershipService>,
) -> Result<HttpResponse> {
    match membership_service.get_stats().await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": data
        }))),
        Err(e) => Ok(e.respond_to(&req)),
    }
}

pub fn membership_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/memberships")
            .route("", web::get().to(list_memberships))
            .route("", web::post().to(create_membership))
            .route("/search/filter", web::get().to(search_memberships))
            .route("/stats/summary", web::get().to(get_stats))
            .route("/{id}", web::get().to(get_membership))
            .route("/{id}", web::put().to(update_membership))
            .route("/{id}", web::delete().to(delete_membership)),
    );
}
