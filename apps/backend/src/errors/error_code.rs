//! Error codes for the cookbook API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the `code` field of
//! Problem Details responses.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// Missing or malformed Bearer token
    UnauthorizedMissingBearer,
    /// Bearer token signature or payload is invalid
    InvalidJwt,
    /// Bearer token has expired
    ExpiredJwt,
    /// Token validation failed for an unclassified reason
    AuthUnexpected,
    /// Email/password pair did not verify
    InvalidCredentials,
    /// Caller is neither the owner nor an admin
    NotRecipeOwner,
    /// Access denied
    Forbidden,

    // Request Validation
    /// Invalid recipe id (not a UUID)
    InvalidRecipeId,
    /// Invalid or missing email address
    InvalidEmail,
    /// Missing or empty password
    InvalidPassword,
    /// Missing or malformed recipe field
    InvalidRecipe,
    /// `tags` query parameter missing or empty
    MissingTags,
    /// Comment text missing or empty
    MissingCommentText,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Resource Not Found
    /// Recipe not found
    RecipeNotFound,
    /// User not found
    UserNotFound,
    /// General not found error
    NotFound,

    // Conflicts
    /// Email already registered
    UniqueEmail,
    /// Generic conflict
    Conflict,

    // System Errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Stored data could not be decoded
    DataCorruption,
    /// Internal server error
    InternalError,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Canonical string for this code as it appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            Self::InvalidJwt => "INVALID_JWT",
            Self::ExpiredJwt => "EXPIRED_JWT",
            Self::AuthUnexpected => "AUTH_UNEXPECTED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::NotRecipeOwner => "NOT_RECIPE_OWNER",
            Self::Forbidden => "FORBIDDEN",

            Self::InvalidRecipeId => "INVALID_RECIPE_ID",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidPassword => "INVALID_PASSWORD",
            Self::InvalidRecipe => "INVALID_RECIPE",
            Self::MissingTags => "MISSING_TAGS",
            Self::MissingCommentText => "MISSING_COMMENT_TEXT",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::RecipeNotFound => "RECIPE_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::UniqueEmail => "UNIQUE_EMAIL",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
