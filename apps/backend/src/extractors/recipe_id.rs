use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use uuid::Uuid;

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Recipe id from the `{id}` path segment. Shape only; existence is checked
/// by the service so 404 can precede the ownership check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecipeId(pub Uuid);

fn parse(req: &HttpRequest) -> Result<RecipeId, AppError> {
    let raw = req
        .match_info()
        .get("id")
        .ok_or_else(|| AppError::bad_request(ErrorCode::InvalidRecipeId, "Missing recipe id"))?;

    Uuid::parse_str(raw).map(RecipeId).map_err(|_| {
        AppError::bad_request(ErrorCode::InvalidRecipeId, format!("Invalid recipe id: {raw}"))
    })
}

impl FromRequest for RecipeId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(parse(req))
    }
}
