//! Health endpoint and response hardening headers.

mod common;
mod support;

use actix_web::http::StatusCode;
use actix_web::test;
use cookbook::config::db::{DbKind, RuntimeEnv};
use cookbook::infra::state::build_state;
use serde_json::Value;
use support::auth::test_security;
use support::create_test_app;

#[actix_web::test]
async fn health_reports_memory_backend() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_state().with_security(test_security()).build().await?;
    let app = create_test_app(state).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "memory");
    Ok(())
}

#[actix_web::test]
async fn health_reports_applied_migration() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_state()
        .with_security(test_security())
        .with_db(RuntimeEnv::Test, DbKind::SqliteMemory)
        .build()
        .await?;
    let app = create_test_app(state).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["db"], "ok");
    assert!(body["migrations"].as_str().unwrap().starts_with("m2025"));
    Ok(())
}

#[actix_web::test]
async fn security_headers_on_success_and_error() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_state().with_security(test_security()).build().await?;
    let app = create_test_app(state).await;

    for uri in ["/api/v1/recipes", "/api/v1/recipes/not-a-uuid"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        let headers = resp.headers();
        assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
        assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
        assert_eq!(headers.get("cache-control").unwrap(), "no-store");
        assert!(headers
            .get("content-security-policy")
            .unwrap()
            .to_str()?
            .contains("default-src 'none'"));
        assert!(headers.contains_key("x-request-id"));
    }
    Ok(())
}
