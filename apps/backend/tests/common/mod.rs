#![allow(dead_code)]

use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use backend_test_support::problem_details::{assert_problem, ProblemBody};

#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Status, `code`, trace id parity and a detail substring in one call.
pub async fn assert_problem_details_structure(
    resp: ServiceResponse<BoxBody>,
    expected_status: u16,
    expected_code: &str,
    expected_detail: &str,
) -> ProblemBody {
    let status = StatusCode::from_u16(expected_status).expect("valid status");
    let problem = assert_problem(resp, expected_code, status).await;
    assert!(
        problem.detail.contains(expected_detail),
        "expected detail to contain '{expected_detail}', got '{}'",
        problem.detail
    );
    problem
}
