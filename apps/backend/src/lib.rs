#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod auth;
pub mod bin_support;
pub mod config;
pub mod entities;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod infra;
pub mod logging;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod web;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use auth::claims::{IdentityClaims, Role};
pub use auth::guard::{authorize, Decision, OwnerOp};
pub use auth::jwt::{issue_session_token, validate_bearer};
pub use auth::AuthError;
pub use config::db::{DbKind, RuntimeEnv};
pub use error::AppError;
pub use errors::ErrorCode;
pub use extractors::current_user::CurrentUser;
pub use extractors::recipe_id::RecipeId;
pub use infra::state::build_state;
pub use middleware::cors::cors_middleware;
pub use middleware::request_trace::RequestTrace;
pub use middleware::security_headers::SecurityHeaders;
pub use middleware::structured_logger::StructuredLogger;
pub use middleware::trace_span::TraceSpan;
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
