use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::error::AppError;
use crate::errors::ErrorCode;

pub mod auth;
pub mod health;
pub mod recipes;

/// Success envelope shared by every API response.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status: &'static str,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: &'static str, payload: T) -> Self {
        Self {
            status: "success",
            message,
            payload: Some(payload),
        }
    }

    pub fn respond(self, status: StatusCode) -> HttpResponse {
        HttpResponse::build(status).json(self)
    }
}

impl ApiResponse<()> {
    pub fn message_only(message: &'static str) -> Self {
        Self {
            status: "success",
            message,
            payload: None,
        }
    }
}

/// Fallback for unmatched paths so they render as Problem Details too.
pub async fn not_found() -> Result<HttpResponse, AppError> {
    Err(AppError::not_found(ErrorCode::NotFound, "Resource not found"))
}

/// Register all routes. `main.rs` and the test app builder both call this
/// and wrap it with the same middleware stack.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes);
    cfg.service(web::scope("/api/v1/auth").configure(auth::configure_routes));
    cfg.service(web::scope("/api/v1/recipes").configure(recipes::configure_routes));
}
