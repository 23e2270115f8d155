use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tracing::{debug, error};
use uuid::Uuid;

use super::claims::{IdentityClaims, Role};
use super::AuthError;
use crate::state::security_config::SecurityConfig;

fn unix_secs(at: SystemTime) -> Result<i64, AuthError> {
    at.duration_since(UNIX_EPOCH)
        .ok()
        .and_then(|d| i64::try_from(d.as_secs()).ok())
        .ok_or(AuthError::Unexpected)
}

/// Mint a signed session token for a verified user.
///
/// `exp` is always `iat + security.token_ttl`. HMAC signing does not fail
/// for well-formed claims; an encoder failure is reported as
/// `AuthError::Unexpected` rather than panicking.
pub fn issue_session_token(
    subject: Uuid,
    name: &str,
    email: &str,
    role: Role,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AuthError> {
    let iat = unix_secs(now)?;
    let exp = i64::try_from(security.token_ttl.as_secs())
        .ok()
        .and_then(|ttl| iat.checked_add(ttl))
        .ok_or_else(|| {
            error!(ttl_secs = security.token_ttl.as_secs(), "token lifetime overflows exp");
            AuthError::Unexpected
        })?;

    let claims = IdentityClaims {
        sub: subject,
        name: name.to_string(),
        email: email.to_string(),
        role,
        iat,
        exp,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| {
        error!(error = %e, "failed to encode session token");
        AuthError::Unexpected
    })
}

/// Pull the token out of an `Authorization` header value of the form
/// `Bearer <token>`.
pub fn extract_bearer(header_value: Option<&str>) -> Result<&str, AuthError> {
    let value = header_value.ok_or(AuthError::MissingToken)?;

    let parts: Vec<&str> = value.split_whitespace().collect();
    if parts.len() != 2 || parts[0] != "Bearer" {
        return Err(AuthError::MissingToken);
    }

    let token = parts[1];
    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }

    Ok(token)
}

/// Verify signature and decode claims without looking at expiry.
///
/// Expiry is judged by the caller against its own clock so the check is
/// exact (no leeway) and testable.
fn decode_claims(token: &str, security: &SecurityConfig) -> Result<IdentityClaims, AuthError> {
    let mut validation = Validation::new(security.algorithm);
    validation.validate_exp = false;
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);

    decode::<IdentityClaims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::InvalidToken
        | ErrorKind::InvalidSignature
        | ErrorKind::InvalidAlgorithm
        | ErrorKind::MissingAlgorithm
        | ErrorKind::ImmatureSignature
        | ErrorKind::MissingRequiredClaim(_)
        | ErrorKind::Base64(_)
        | ErrorKind::Json(_)
        | ErrorKind::Utf8(_) => {
            debug!(reason = ?e.kind(), "bearer token rejected");
            AuthError::InvalidToken
        }
        ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
        _ => {
            error!(error = %e, "unexpected bearer token failure");
            AuthError::Unexpected
        }
    })
}

/// Validate a raw `Authorization` header value and return verified claims.
///
/// - no/malformed header → `MissingToken`
/// - bad signature or payload → `InvalidToken`
/// - `now >= exp` → `ExpiredToken`
/// - anything else → `Unexpected`
pub fn validate_bearer(
    header_value: Option<&str>,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<IdentityClaims, AuthError> {
    let token = extract_bearer(header_value)?;
    let claims = decode_claims(token, security)?;

    if unix_secs(now)? >= claims.exp {
        return Err(AuthError::ExpiredToken);
    }

    Ok(claims)
}
