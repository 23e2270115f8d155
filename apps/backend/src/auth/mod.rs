//! Session issuing, bearer validation, password verification and the
//! owner-or-admin guard.

pub mod claims;
pub mod guard;
pub mod jwt;
pub mod password;

use thiserror::Error;

/// Outcome of a failed bearer-token validation.
///
/// One variant per failure class so callers can match exhaustively; the
/// HTTP mapping lives in `crate::error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No `Authorization: Bearer <token>` header, or a malformed one
    #[error("bearer token not provided")]
    MissingToken,
    /// Signature verified but `now >= exp`
    #[error("bearer token has expired")]
    ExpiredToken,
    /// Bad signature, malformed payload or unacceptable header
    #[error("bearer token is invalid")]
    InvalidToken,
    #[error("unexpected authentication failure")]
    Unexpected,
}

impl AuthError {
    /// Machine-readable code kept for clients of the original API.
    pub const fn legacy_code(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "BearerTokenMissing",
            AuthError::ExpiredToken => "ExpiredBearerToken",
            AuthError::InvalidToken => "InvalidBearerToken",
            AuthError::Unexpected => "UnexpectedError",
        }
    }
}

pub use claims::{IdentityClaims, Role};
pub use guard::{authorize, Decision, OwnerOp};
