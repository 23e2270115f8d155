use std::ops::Deref;
use std::time::SystemTime;

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use tracing::error;

use crate::auth::claims::IdentityClaims;
use crate::auth::jwt::validate_bearer;
use crate::auth::AuthError;
use crate::error::AppError;
use crate::state::app_state::AppState;

/// Verified identity of the caller, taken from the bearer token.
///
/// Handlers that require authentication take `CurrentUser`; handlers that
/// only personalise output take `Option<CurrentUser>`.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub IdentityClaims);

impl CurrentUser {
    pub fn claims(&self) -> &IdentityClaims {
        &self.0
    }
}

impl Deref for CurrentUser {
    type Target = IdentityClaims;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn authenticate(req: &HttpRequest) -> Result<CurrentUser, AppError> {
    let state = req.app_data::<web::Data<AppState>>().ok_or_else(|| {
        error!("AppState missing from request");
        AppError::Auth(AuthError::Unexpected)
    })?;

    // A header that is not valid UTF-8 is treated like a missing one.
    let raw = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let claims = validate_bearer(raw, SystemTime::now(), &state.security)?;
    Ok(CurrentUser(claims))
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
