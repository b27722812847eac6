use crate::models::ErrorResponse;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError, web};
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

/// Whether 5xx bodies carry the underlying error text. Registered as app data;
/// when absent, details stay hidden.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorDetails {
    pub expose: bool,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sea_orm::DbErr),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Route not found")]
    RouteNotFound,

    #[error("Config error: {0}")]
    ConfigError(String),
}

impl AppError {
    /// Render for the app serving `req`, honoring its `ErrorDetails`.
    pub fn respond_to(&self, req: &HttpRequest) -> HttpResponse {
        let expose = req
            .app_data::<web::Data<ErrorDetails>>()
            .is_some_and(|details| details.expose);
        self.render(expose)
    }

    fn render(&self, expose: bool) -> HttpResponse {
        let (message, detail) = match self {
            AppError::ValidationError(msg) => {
                log::warn!("Validation error: {msg}");
                (msg.clone(), None)
            }
            AppError::NotFound(msg) => (msg.clone(), None),
            AppError::RouteNotFound => ("Route not found".to_string(), None),
            AppError::DatabaseError(err) => {
                log::error!("Database error: {err}");
                ("Database error".to_string(), Some(err.to_string()))
            }
            AppError::ConfigError(msg) => {
                log::error!("{self}");
                ("Internal server error".to_string(), Some(msg.clone()))
            }
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            success: false,
            message,
            error: detail.filter(|_| expose),
        })
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) | AppError::RouteNotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        self.render(false)
    }
}
