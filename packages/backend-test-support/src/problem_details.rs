//! Assertions for the RFC 7807 error body the backend returns.
//!
//! Deliberately independent of backend types so a serialization change in
//! the backend shows up as a test failure here.

use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::HeaderMap;
use actix_web::http::StatusCode;
use serde::Deserialize;

pub const TYPE_PREFIX: &str = "https://cookbook.app/errors/";

/// Wire shape of an error response.
#[derive(Debug, Deserialize)]
pub struct ProblemBody {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
    pub trace_id: String,
    #[serde(default)]
    pub error_code: Option<String>,
}

/// Check status, content type, trace id parity and `code`, then hand the
/// parsed body back for further assertions.
pub fn assert_problem_parts(
    status: StatusCode,
    headers: &HeaderMap,
    body: &[u8],
    expected_code: &str,
    expected_status: StatusCode,
) -> ProblemBody {
    assert_eq!(status, expected_status, "unexpected HTTP status");

    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert_eq!(content_type, "application/problem+json");

    let problem: ProblemBody = serde_json::from_slice(body).unwrap_or_else(|e| {
        panic!(
            "body is not Problem Details ({e}): {}",
            String::from_utf8_lossy(body)
        )
    });

    let header_trace = headers
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .expect("x-trace-id header should be present");
    assert_eq!(problem.trace_id, header_trace, "trace_id must match x-trace-id");

    assert_eq!(problem.code, expected_code);
    assert_eq!(problem.status, expected_status.as_u16());
    assert_eq!(problem.type_, format!("{TYPE_PREFIX}{expected_code}"));
    problem
}

/// Consume a test response and run [`assert_problem_parts`] on it.
pub async fn assert_problem(
    resp: ServiceResponse<BoxBody>,
    expected_code: &str,
    expected_status: StatusCode,
) -> ProblemBody {
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = actix_web::test::read_body(resp).await;
    assert_problem_parts(status, &headers, &body, expected_code, expected_status)
}

/// Auth failures also carry the legacy `error_code` string.
pub async fn assert_auth_problem(
    resp: ServiceResponse<BoxBody>,
    expected_status: StatusCode,
    expected_error_code: &str,
) -> ProblemBody {
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = actix_web::test::read_body(resp).await;
    assert_eq!(status, expected_status);
    let problem: ProblemBody =
        serde_json::from_slice(&body).expect("auth failure should be Problem Details");
    assert_eq!(problem.error_code.as_deref(), Some(expected_error_code));
    assert_eq!(problem.status, expected_status.as_u16());
    problem
}
