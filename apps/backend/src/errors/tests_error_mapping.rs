// Error mapping: domain and auth failures to HTTP status and codes
use actix_web::ResponseError;

use crate::auth::password::PasswordError;
use crate::auth::AuthError;
use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::{AppError, ErrorCode};

#[test]
fn maps_validation_to_400() {
    let de = DomainError::validation(ValidationKind::MissingTags, "tags required");
    let app: AppError = de.into();
    assert_eq!(app.code(), ErrorCode::MissingTags);
    assert_eq!(app.status().as_u16(), 400);

    let other = DomainError::validation(ValidationKind::Other("x".into()), "bad field");
    let app: AppError = other.into();
    assert_eq!(app.code(), ErrorCode::ValidationError);
}

#[test]
fn maps_conflicts() {
    let unique = DomainError::conflict(ConflictKind::UniqueEmail, "email exists");
    let app: AppError = unique.into();
    assert_eq!(app.code().as_str(), "UNIQUE_EMAIL");
    assert_eq!(app.status().as_u16(), 409);

    let other = DomainError::conflict(ConflictKind::Other("x".into()), "generic");
    let app: AppError = other.into();
    assert_eq!(app.code().as_str(), "CONFLICT");
    assert_eq!(app.status().as_u16(), 409);
}

#[test]
fn maps_not_found() {
    let app: AppError = DomainError::not_found(NotFoundKind::User, "no user").into();
    assert_eq!(app.code().as_str(), "USER_NOT_FOUND");
    assert_eq!(app.status().as_u16(), 404);

    let app: AppError = DomainError::not_found(NotFoundKind::Recipe, "no recipe").into();
    assert_eq!(app.code().as_str(), "RECIPE_NOT_FOUND");
    assert_eq!(app.status().as_u16(), 404);
}

#[test]
fn maps_infra_to_500_without_leaking_detail() {
    let cases = [
        (InfraErrorKind::DbUnavailable, "DB_UNAVAILABLE"),
        (InfraErrorKind::DataCorruption, "DATA_CORRUPTION"),
        (InfraErrorKind::Other("x".into()), "DB_ERROR"),
    ];
    for (kind, code) in cases {
        let app: AppError = DomainError::infra(kind, "connection refused at 10.0.0.5").into();
        assert_eq!(app.code().as_str(), code);
        assert_eq!(app.status().as_u16(), 500);
        assert!(!app.public_detail().contains("10.0.0.5"));
    }
}

#[test]
fn maps_auth_errors() {
    let cases = [
        (AuthError::MissingToken, 401, "UNAUTHORIZED_MISSING_BEARER", "BearerTokenMissing"),
        (AuthError::ExpiredToken, 401, "EXPIRED_JWT", "ExpiredBearerToken"),
        (AuthError::InvalidToken, 403, "INVALID_JWT", "InvalidBearerToken"),
        (AuthError::Unexpected, 500, "AUTH_UNEXPECTED", "UnexpectedError"),
    ];
    for (err, status, code, legacy) in cases {
        let app: AppError = err.into();
        assert_eq!(app.status().as_u16(), status, "{err:?}");
        assert_eq!(app.code().as_str(), code);
        assert_eq!(app.legacy_error_code(), Some(legacy));
    }
}

#[test]
fn corrupt_password_hash_is_internal() {
    let app: AppError = PasswordError::CorruptHash("bad phc".into()).into();
    assert_eq!(app.status().as_u16(), 500);
    assert_eq!(app.code(), ErrorCode::DataCorruption);
    assert_eq!(app.legacy_error_code(), None);
}

#[test]
fn unauthorized_response_carries_challenge_header() {
    let resp = AppError::Auth(AuthError::MissingToken).error_response();
    assert_eq!(resp.status().as_u16(), 401);
    let challenge = resp.headers().get("www-authenticate").unwrap();
    assert_eq!(challenge.to_str().unwrap(), "Bearer");

    let resp = AppError::Auth(AuthError::InvalidToken).error_response();
    assert!(resp.headers().get("www-authenticate").is_none());
}

#[test]
fn error_response_is_problem_json() {
    let resp = AppError::not_found(ErrorCode::RecipeNotFound, "gone").error_response();
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "application/problem+json"
    );
}
