use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter

use membership_backend::{
    config::Config,
    database::{create_pool, run_migrations},
    error::ErrorDetails,
    handlers,
    middlewares::create_cors,
    services::*,
    swagger::swagger_config,
    tasks,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    let config = Config::from_toml().expect("Failed to load configuration");
    let error_details = ErrorDetails {
        expose: config.app.is_development(),
    };
    log::info!("Environment: {}", config.app.environment);

    let pool = create_pool(&config.database)
        .await
        .expect("Failed to create database connection pool");

    run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    let membership_service = MembershipService::new(pool.clone());
    let recharge_service = RechargeService::new(pool.clone());
    let report_service = ReportService::new(pool.clone());
    let notification_service = NotificationService::new(pool.clone());

    tasks::spawn_all(notification_service.clone(), config.scheduler.clone());

    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .app_data(web::Data::new(error_details))
            .app_data(web::Data::new(membership_service.clone()))
            .app_data(web::Data::new(recharge_service.clone()))
            .app_data(web::Data::new(report_service.clone()))
            .app_data(web::Data::new(notification_service.clone()))
            .configure(swagger_config)
            .configure(handlers::api_config)
            .default_service(web::to(handlers::not_found))
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
