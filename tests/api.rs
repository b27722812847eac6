use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use chrono::{Duration, Local, NaiveDate};
use membership_backend::database::DbPool;
use membership_backend::entities::{MembershipStatus, membership_entity as memberships};
use membership_backend::error::ErrorDetails;
use membership_backend::handlers;
use membership_backend::services::*;
use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, Value};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;

fn membership(id: i64, expiration_date: NaiveDate) -> memberships::Model {
    memberships::Model {
        id,
        client_id: "CLI001".to_string(),
        client_name: "Ana Torres".to_string(),
        service_name: "Netflix".to_string(),
        provider: "Proveedor A".to_string(),
        duration: "1 mes".to_string(),
        purchase_date: NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
        expiration_date,
        purchase_price: 10.0,
        sale_price: 15.0,
        profit: 5.0,
        access_email: "ana@example.com".to_string(),
        access_password: "secret".to_string(),
        security_pin: None,
        profile_name: None,
        whatsapp_number: "+51 987 654 321".to_string(),
        notification_sent: false,
        status: MembershipStatus::Active,
        created_at: None,
        updated_at: None,
    }
}

macro_rules! app {
    ($db:expr) => {
        app!($db, ErrorDetails::default())
    };
    ($db:expr, $details:expr) => {{
        let db: DbPool = Arc::new($db);
        test::init_service(
            App::new()
                .app_data(web::Data::new($details))
                .app_data(web::Data::new(MembershipService::new(db.clone())))
                .app_data(web::Data::new(RechargeService::new(db.clone())))
                .app_data(web::Data::new(ReportService::new(db.clone())))
                .app_data(web::Data::new(NotificationService::new(db)))
                .configure(handlers::api_config)
                .default_service(web::to(handlers::not_found)),
        )
        .await
    }};
}

#[actix_web::test]
async fn membership_create_get_delete() {
    let expiration = Local::now().date_naive() + Duration::days(30);
    let stored = membership(1, expiration);
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([
            vec![stored.clone()],
            vec![stored.clone()],
            vec![stored],
            vec![],
        ])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();
    let app = app!(db);

    let req = test::TestRequest::post()
        .uri("/api/memberships")
        .set_json(json!({
            "client_id": "CLI001",
            "client_name": "Ana Torres",
            "service_name": "Netflix",
            "provider": "Proveedor A",
            "duration": "1 mes",
            "purchase_date": "2025-01-05",
            "expiration_date": expiration.to_string(),
            "purchase_price": 10,
            "sale_price": 15,
            "access_email": "ana@example.com",
            "access_password": "secret",
            "whatsapp_number": "+51 987 654 321"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["notification_sent"], false);
    assert_eq!(body["data"]["status"], "active");

    let req = test::TestRequest::get().uri("/api/memberships/1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["client_name"], "Ana Torres");
    assert_eq!(body["data"]["profit"], 5.0);
    assert_eq!(body["data"]["days_until_expiry"], 30);

    let req = test::TestRequest::delete().uri("/api/memberships/1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/api/memberships/1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Membership not found");
}

#[actix_web::test]
async fn create_with_missing_fields_is_bad_request() {
    let app = app!(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

    let req = test::TestRequest::post()
        .uri("/api/memberships")
        .set_json(json!({ "client_id": "CLI001" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn update_without_updatable_fields_is_bad_request() {
    let app = app!(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

    let req = test::TestRequest::put()
        .uri("/api/memberships/1")
        .set_json(json!({ "profit": 100 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "No fields provided to update");
}

#[actix_web::test]
async fn search_echoes_only_given_filters() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![membership(
            2,
            Local::now().date_naive() + Duration::days(2),
        )]])
        .into_connection();
    let app = app!(db);

    let req = test::TestRequest::get()
        .uri("/api/memberships/search/filter?status=active&clientId=CLI")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["filters"]["status"], "active");
    assert_eq!(body["filters"]["clientId"], "CLI");
    assert!(body["filters"].get("serviceName").is_none());
    assert_eq!(body["data"][0]["days_until_expiry"], 2);
}

#[actix_web::test]
async fn database_error_detail_follows_app_setting() {
    let failing = || {
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("relation is locked".into())])
            .into_connection()
    };

    let app = app!(failing());
    let req = test::TestRequest::get().uri("/api/memberships").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Database error");
    assert!(body.get("error").is_none());

    let app = app!(failing(), ErrorDetails { expose: true });
    let req = test::TestRequest::get().uri("/api/memberships").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("relation is locked"));
}

#[actix_web::test]
async fn send_with_zero_membership_id_is_bad_request() {
    let app = app!(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

    let req = test::TestRequest::post()
        .uri("/api/notifications/send")
        .set_json(json!({ "membershipId": 0 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "membershipId is required");
}

#[actix_web::test]
async fn malformed_json_uses_error_envelope() {
    let app = app!(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

    let req = test::TestRequest::post()
        .uri("/api/recharges")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
}

#[actix_web::test]
async fn unknown_routes_and_ids_are_not_found() {
    let app = app!(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

    let req = test::TestRequest::get().uri("/api/unknown").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Route not found");

    let req = test::TestRequest::get()
        .uri("/api/memberships/abc")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn detailed_report_requires_dates() {
    let app = app!(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

    let req = test::TestRequest::get()
        .uri("/api/reports/detailed?startDate=2025-01-01")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn export_is_a_csv_attachment() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![membership(
            1,
            NaiveDate::from_ymd_opt(2025, 2, 5).unwrap(),
        )]])
        .into_connection();
    let app = app!(db);

    let req = test::TestRequest::get()
        .uri("/api/reports/export?startDate=2025-01-01&endDate=2025-01-31")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/csv; charset=utf-8"
    );
    assert_eq!(
        resp.headers().get(header::CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=\"reporte_2025-01-01_2025-01-31.csv\""
    );
    let body = test::read_body(resp).await;
    let text = std::str::from_utf8(&body).unwrap();
    assert_eq!(text.matches("ID Cliente").count(), 1);
    assert!(text.contains("\"CLI001\",\"Ana Torres\""));
    assert!(text.trim_end().ends_with(",50.00"));
}

#[actix_web::test]
async fn check_and_send_is_accepted() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<BTreeMap<&str, Value>>::new()])
        .into_connection();
    let app = app!(db);

    let req = test::TestRequest::post()
        .uri("/api/notifications/check-and-send")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::ACCEPTED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
}

#[actix_web::test]
async fn root_lists_endpoints() {
    let app = app!(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "running");
    assert_eq!(body["endpoints"]["memberships"], "/api/memberships");
}
