//! Token failures on a protected route map to the documented statuses and
//! legacy `error_code` values.

mod common;
mod support;

use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_auth_problem;
use cookbook::auth::claims::Role;
use cookbook::infra::state::build_state;
use cookbook::state::security_config::SecurityConfig;
use serde_json::{json, Value};
use support::auth::{bearer, expired_token, mint_token, test_security};
use support::create_test_app;
use uuid::Uuid;

fn create_body() -> Value {
    json!({ "title": "Toast", "ingredients": ["bread"], "steps": "Toast it." })
}

#[actix_web::test]
async fn token_failures_map_to_status_and_legacy_code() -> Result<(), Box<dyn std::error::Error>>
{
    let security = test_security();
    let state = build_state().with_security(security.clone()).build().await?;
    let app = create_test_app(state).await;
    let sub = Uuid::new_v4();

    let valid = mint_token(sub, Role::User, &security);
    let (head, _sig) = valid.rsplit_once('.').expect("three segments");
    let tampered = format!("{head}.AAAA");

    let other_secret = SecurityConfig::new(b"a_completely_different_secret_value!".to_vec());
    let foreign = mint_token(sub, Role::User, &other_secret);

    let cases: Vec<(Option<String>, StatusCode, &str)> = vec![
        (None, StatusCode::UNAUTHORIZED, "BearerTokenMissing"),
        (Some(String::new()), StatusCode::UNAUTHORIZED, "BearerTokenMissing"),
        (Some("Bearer".into()), StatusCode::UNAUTHORIZED, "BearerTokenMissing"),
        (Some(format!("Token {valid}")), StatusCode::UNAUTHORIZED, "BearerTokenMissing"),
        (
            Some(bearer(&expired_token(sub, &security))),
            StatusCode::UNAUTHORIZED,
            "ExpiredBearerToken",
        ),
        (Some(bearer(&tampered)), StatusCode::FORBIDDEN, "InvalidBearerToken"),
        (Some(bearer(&foreign)), StatusCode::FORBIDDEN, "InvalidBearerToken"),
        (Some(bearer("not.a.jwt")), StatusCode::FORBIDDEN, "InvalidBearerToken"),
    ];

    for (header, status, legacy) in cases {
        let mut req = test::TestRequest::post()
            .uri("/api/v1/recipes")
            .set_json(create_body());
        if let Some(value) = header {
            req = req.insert_header(("authorization", value));
        }
        let resp = test::call_service(&app, req.to_request()).await;
        assert_auth_problem(resp, status, legacy).await;
    }

    let req = test::TestRequest::post()
        .uri("/api/v1/recipes")
        .insert_header(("authorization", bearer(&valid)))
        .set_json(create_body())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    Ok(())
}

#[actix_web::test]
async fn missing_token_carries_bearer_challenge() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_state().with_security(test_security()).build().await?;
    let app = create_test_app(state).await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/recipes/{}", Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        resp.headers().get("www-authenticate").and_then(|v| v.to_str().ok()),
        Some("Bearer")
    );
    let problem = assert_auth_problem(resp, StatusCode::UNAUTHORIZED, "BearerTokenMissing").await;
    assert_eq!(problem.code, "UNAUTHORIZED_MISSING_BEARER");
    Ok(())
}

#[actix_web::test]
async fn public_listing_ignores_bad_tokens() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_state().with_security(test_security()).build().await?;
    let app = create_test_app(state).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/recipes")
        .insert_header(("authorization", "Bearer garbage"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    Ok(())
}
