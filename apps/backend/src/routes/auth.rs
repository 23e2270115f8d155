use std::time::SystemTime;

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::ApiResponse;
use crate::auth::claims::Role;
use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::repos::users::User;
use crate::services::accounts;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Public view of a user document; the password hash never leaves the service.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub saved_recipes: Vec<Uuid>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            saved_recipes: user.saved_recipes,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

async fn register(
    body: ValidatedJson<RegisterRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user = accounts::register(
        app_state.users.as_ref(),
        &app_state.security,
        &body.name,
        &body.email,
        &body.password,
    )
    .await?;

    Ok(ApiResponse::success("User registered successfully", UserView::from(user))
        .respond(StatusCode::CREATED))
}

async fn login(
    body: ValidatedJson<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let token = accounts::login(
        app_state.users.as_ref(),
        &app_state.security,
        &body.email,
        &body.password,
        SystemTime::now(),
    )
    .await?;

    Ok(ApiResponse::success("Login successful", LoginResponse { token }).respond(StatusCode::OK))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/register", web::post().to(register))
        .route("/login", web::post().to(login));
}
