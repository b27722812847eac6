use actix_cors::Cors;
use actix_web::http::header;

/// Any origin may call the API; only the verbs and headers the routes use are allowed.
pub fn create_cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
        .expose_headers(vec![header::CONTENT_DISPOSITION])
        .max_age(3600)
}
