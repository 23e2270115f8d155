//! Registration and the login state machine.

use std::time::SystemTime;

use time::OffsetDateTime;
use tracing::{error, info};

use crate::auth::jwt::issue_session_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
use crate::logging::pii::Redacted;
use crate::logging::security;
use crate::repos::users::{User, UserStore};
use crate::state::security_config::SecurityConfig;

/// Emails are compared and stored trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// A blank display name falls back to the local part of the email.
fn display_name(name: &str, email: &str) -> String {
    match name.trim() {
        "" => email.split('@').next().unwrap_or_default().to_string(),
        trimmed => trimmed.to_string(),
    }
}

fn validate_registration(email: &str, password: &str) -> Result<(), DomainError> {
    let valid_email = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
    if !valid_email {
        return Err(DomainError::validation(
            ValidationKind::InvalidEmail,
            "A valid email is required",
        ));
    }
    if password.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::InvalidPassword,
            "Password is required",
        ));
    }
    Ok(())
}

/// Argon2 is CPU-bound; keep it off the async workers.
async fn run_blocking<T, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|e| {
        error!(error = %e, "password worker failed");
        AppError::internal("password worker failed")
    })
}

/// Create a user with a hashed password.
///
/// A duplicate email is a 409 whether it is caught by the lookup or by the
/// store's unique constraint in a race.
pub async fn register(
    users: &dyn UserStore,
    security: &SecurityConfig,
    name: &str,
    email: &str,
    password: &str,
) -> Result<User, AppError> {
    let email = normalize_email(email);
    validate_registration(&email, password)?;

    if users.find_by_email(&email).await?.is_some() {
        return Err(DomainError::conflict(ConflictKind::UniqueEmail, "Email already in use").into());
    }

    let plaintext = password.to_owned();
    let params = security.clone();
    let password_hash = run_blocking(move || hash_password(&plaintext, &params)).await??;
    let name = display_name(name, &email);
    let user = User::new(name, email, password_hash, OffsetDateTime::now_utc());
    users.save(&user).await?;

    info!(user_id = %user.id, email = %Redacted(&user.email), "user registered");
    Ok(user)
}

/// Verify credentials and issue a session token.
///
/// Unknown email is 404 and a wrong password is 401. A stored hash that
/// cannot be parsed is a 500.
pub async fn login(
    users: &dyn UserStore,
    security: &SecurityConfig,
    email: &str,
    password: &str,
    now: SystemTime,
) -> Result<String, AppError> {
    let email = normalize_email(email);

    let Some(user) = users.find_by_email(&email).await? else {
        security::login_failed("user_not_found", &email);
        return Err(DomainError::not_found(NotFoundKind::User, "User not found").into());
    };

    let plaintext = password.to_owned();
    let stored = user.password_hash.clone();
    if !run_blocking(move || verify_password(&plaintext, &stored)).await?? {
        security::login_failed("invalid_password", &email);
        return Err(AppError::InvalidCredentials);
    }

    let token = issue_session_token(user.id, &user.name, &user.email, user.role, now, security)?;
    info!(user_id = %user.id, "login succeeded");
    Ok(token)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::{Duration, SystemTime};

    use argon2::Params;

    use super::{login, normalize_email, register};
    use crate::adapters::MemoryUserStore;
    use crate::auth::jwt::validate_bearer;
    use crate::error::AppError;
    use crate::errors::ErrorCode;
    use crate::repos::users::UserStore;
    use crate::state::security_config::SecurityConfig;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Ada@Example.COM "), "ada@example.com");
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let store = MemoryUserStore::new();
        let security = SecurityConfig::for_tests();
        let user = register(&store, &security, "Ada", "ada@example.com", "pw")
            .await
            .unwrap();
        assert_ne!(user.password_hash, "pw");
        assert!(store.find_by_id(user.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_register_rejects_bad_input() {
        let store = MemoryUserStore::new();
        let security = SecurityConfig::for_tests();

        let cases = [
            ("A", "not-an-email", "pw", ErrorCode::InvalidEmail),
            ("A", "a@b.c", "", ErrorCode::InvalidPassword),
        ];
        for (name, email, password, code) in cases {
            let err = register(&store, &security, name, email, password)
                .await
                .unwrap_err();
            assert_eq!(err.code(), code);
            assert_eq!(err.status().as_u16(), 400);
        }
    }

    #[tokio::test]
    async fn test_blank_name_defaults_to_email_local_part() {
        let store = MemoryUserStore::new();
        let security = SecurityConfig::for_tests();
        let user = register(&store, &security, "", "A@x.com", "p1").await.unwrap();
        assert_eq!(user.name, "a");
        assert_eq!(user.email, "a@x.com");

        let user = register(&store, &security, "   ", "grace@x.com", "p1")
            .await
            .unwrap();
        assert_eq!(user.name, "grace");

        let user = register(&store, &security, "  Ada L ", "ada@x.com", "p1")
            .await
            .unwrap();
        assert_eq!(user.name, "Ada L");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_password_hashing_does_not_starve_runtime() {
        let store = MemoryUserStore::new();
        let security = SecurityConfig::for_tests()
            .with_password_params(Params::new(32 * 1024, 3, 1, None).unwrap());

        let ticks = Arc::new(AtomicUsize::new(0));
        let ticker = tokio::spawn({
            let ticks = Arc::clone(&ticks);
            async move {
                let mut interval = tokio::time::interval(Duration::from_millis(1));
                loop {
                    interval.tick().await;
                    ticks.fetch_add(1, Ordering::Relaxed);
                }
            }
        });
        tokio::task::yield_now().await;
        let before = ticks.load(Ordering::Relaxed);

        register(&store, &security, "Ada", "ada@example.com", "pw")
            .await
            .unwrap();
        login(&store, &security, "ada@example.com", "pw", SystemTime::now())
            .await
            .unwrap();

        ticker.abort();
        assert!(ticks.load(Ordering::Relaxed) > before);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let store = MemoryUserStore::new();
        let security = SecurityConfig::for_tests();
        register(&store, &security, "Ada", "ada@example.com", "pw")
            .await
            .unwrap();
        let err = register(&store, &security, "Other", "ADA@example.com", "pw2")
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::UniqueEmail);
        assert_eq!(err.status().as_u16(), 409);
    }

    #[tokio::test]
    async fn test_login_state_machine() {
        let store = MemoryUserStore::new();
        let security = SecurityConfig::for_tests();
        let user = register(&store, &security, "Ada", "ada@example.com", "pw")
            .await
            .unwrap();
        let now = SystemTime::now();

        let err = login(&store, &security, "nobody@example.com", "pw", now)
            .await
            .unwrap_err();
        assert_eq!(err.status().as_u16(), 404);

        let err = login(&store, &security, "ada@example.com", "wrong", now)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
        assert_eq!(err.status().as_u16(), 401);

        let token = login(&store, &security, "ada@example.com", "pw", now)
            .await
            .unwrap();
        let claims = validate_bearer(Some(&format!("Bearer {token}")), now, &security).unwrap();
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.name, "Ada");
    }

    #[tokio::test]
    async fn test_corrupt_stored_hash_is_500() {
        let store = MemoryUserStore::new();
        let security = SecurityConfig::for_tests();
        let mut user = register(&store, &security, "Ada", "ada@example.com", "pw")
            .await
            .unwrap();
        user.password_hash = "garbage".into();
        store.save(&user).await.unwrap();

        let err = login(&store, &security, "ada@example.com", "pw", SystemTime::now())
            .await
            .unwrap_err();
        assert_eq!(err.status().as_u16(), 500);
        assert_eq!(err.code(), ErrorCode::DataCorruption);
    }
}
