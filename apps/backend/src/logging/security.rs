//! Security audit events. Emails and tokens pass through `Redacted`.

use tracing::warn;
use uuid::Uuid;

use crate::logging::pii::Redacted;
use crate::web::trace_ctx;

/// Failed login: unknown email or wrong password.
pub fn login_failed(reason: &str, email: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_LOGIN_FAILED",
        %trace_id,
        email = %Redacted(email),
        reason,
        "Authentication failure"
    );
}

/// Authenticated caller refused by the ownership guard.
pub fn access_denied(subject: Uuid, recipe_id: Uuid, op: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_ACCESS_DENIED",
        %trace_id,
        %subject,
        %recipe_id,
        op,
        "Authorization denied"
    );
}
