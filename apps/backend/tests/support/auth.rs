//! Token and account helpers for integration tests.

use std::time::{Duration, SystemTime};

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, Error};
use cookbook::auth::claims::Role;
use cookbook::auth::jwt::issue_session_token;
use cookbook::state::security_config::SecurityConfig;
use serde_json::{json, Value};
use uuid::Uuid;

pub const TEST_SECRET: &[u8] = b"integration_test_secret_at_least_32_bytes";

pub fn test_security() -> SecurityConfig {
    let mut security = SecurityConfig::for_tests();
    security.jwt_secret = TEST_SECRET.to_vec();
    security
}

/// Mint a token directly, bypassing login.
pub fn mint_token(sub: Uuid, role: Role, sec: &SecurityConfig) -> String {
    issue_session_token(sub, "Test Cook", "cook@example.test", role, SystemTime::now(), sec)
        .expect("mint token")
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// A token whose `exp` lies in the past.
pub fn expired_token(sub: Uuid, sec: &SecurityConfig) -> String {
    let issued = SystemTime::now() - Duration::from_secs(2 * 24 * 60 * 60);
    issue_session_token(sub, "Test Cook", "cook@example.test", Role::User, issued, sec)
        .expect("mint expired token")
}

/// Register then log in through the HTTP API; returns `(user_id, token)`.
pub async fn register_and_login<S>(
    app: &S,
    name: &str,
    email: &str,
    password: &str,
) -> (Uuid, String)
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({ "name": name, "email": email, "password": password }))
        .to_request();
    let body: Value = test::call_and_read_body_json(app, req).await;
    let id: Uuid = body["payload"]["id"]
        .as_str()
        .and_then(|s| s.parse().ok())
        .expect("registered user id");

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    let body: Value = test::call_and_read_body_json(app, req).await;
    let token = body["payload"]["token"]
        .as_str()
        .expect("login token")
        .to_string();
    (id, token)
}
