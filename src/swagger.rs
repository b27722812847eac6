use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::{MembershipStatus, NotificationStatus};
use crate::handlers;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::membership::list_memberships,
        handlers::membership::get_membership,
        handlers::membership::search_memberships,
        handlers::membership::create_membership,
        handlers::membership::update_membership,
        handlers::membership::delete_membership,
        handlers::membership::get_stats,
        handlers::recharge::list_recharges,
        handlers::recharge::recharges_by_client,
        handlers::recharge::create_recharge,
        handlers::recharge::delete_recharge,
        handlers::report::summary,
        handlers::report::detailed,
        handlers::report::monthly,
        handlers::report::export_csv,
        handlers::notification::pending,
        handlers::notification::send,
        handlers::notification::check_and_send,
        handlers::notification::history,
    ),
    components(
        schemas(
            MembershipStatus,
            NotificationStatus,
            MembershipResponse,
            CreateMembershipRequest,
            MembershipSearchQuery,
            MembershipFinancials,
            MembershipStats,
            RechargeResponse,
            CreateRechargeRequest,
            ClientRecharges,
            FinancialSummary,
            StatusBreakdown,
            ReportOverview,
            ReportPeriod,
            ReportDetailRow,
            DetailedReport,
            MonthlySummaryRow,
            ExpiringMembership,
            SendNotificationRequest,
            SendNotificationResponse,
            NotificationHistoryEntry,
            ErrorResponse,
            MessageResponse,
        )
    ),
    tags(
        (name = "memberships", description = "Resold subscriptions"),
        (name = "recharges", description = "Client balance top-ups"),
        (name = "reports", description = "Financial reports and CSV export"),
        (name = "notifications", description = "Expiry reminders over WhatsApp"),
    ),
    info(
        title = "Membership Management API",
        version = "1.0.0",
        description = "Tracks resold memberships, recharges, reports and expiry reminders"
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
