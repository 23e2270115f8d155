//! SeaORM -> DomainError translation.
//!
//! Adapters convert `sea_orm::DbErr` here; higher layers map `DomainError`
//! to `AppError` via `From`. Raw driver messages only reach the logs, redacted.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::logging::pii::Redacted;
use crate::web::trace_ctx;

const SQLITE_UNIQUE_PREFIX: &str = "UNIQUE constraint failed: ";

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// `table.column` from SQLite's "UNIQUE constraint failed: table.column".
fn sqlite_unique_target(msg: &str) -> Option<&str> {
    let start = msg.find(SQLITE_UNIQUE_PREFIX)? + SQLITE_UNIQUE_PREFIX.len();
    msg[start..].split_whitespace().next()
}

fn is_unique_email(msg: &str) -> bool {
    msg.contains("users_email_key") || sqlite_unique_target(msg) == Some("users.email")
}

/// Translate a `DbErr` into a `DomainError` with a sanitized detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        sea_orm::DbErr::RecordNotFound(_) => {
            return DomainError::not_found(
                NotFoundKind::Other("Record".into()),
                "Record not found",
            );
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        sea_orm::DbErr::Json(_) | sea_orm::DbErr::Type(_) | sea_orm::DbErr::TryIntoErr { .. } => {
            error!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Stored row could not be decoded");
            return DomainError::infra(InfraErrorKind::DataCorruption, "Stored data is corrupt");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains(SQLITE_UNIQUE_PREFIX)
    {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unique constraint violation");

        if is_unique_email(&error_msg) {
            return DomainError::conflict(ConflictKind::UniqueEmail, "Email already registered");
        }
        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    error!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}

#[cfg(test)]
mod tests {
    use sea_orm::{DbErr, RuntimeErr};

    use super::{map_db_err, sqlite_unique_target};
    use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind};

    #[test]
    fn test_sqlite_unique_target() {
        assert_eq!(
            sqlite_unique_target("error: UNIQUE constraint failed: users.email (code 2067)"),
            Some("users.email")
        );
        assert_eq!(sqlite_unique_target("syntax error"), None);
    }

    #[test]
    fn test_unique_email_from_sqlite() {
        let err = DbErr::Exec(RuntimeErr::Internal(
            "UNIQUE constraint failed: users.email".into(),
        ));
        assert!(matches!(
            map_db_err(err),
            DomainError::Conflict(ConflictKind::UniqueEmail, _)
        ));
    }

    #[test]
    fn test_unique_email_from_postgres() {
        let err = DbErr::Exec(RuntimeErr::Internal(
            "duplicate key value violates unique constraint \"users_email_key\"".into(),
        ));
        assert!(matches!(
            map_db_err(err),
            DomainError::Conflict(ConflictKind::UniqueEmail, _)
        ));
    }

    #[test]
    fn test_other_errors_do_not_leak() {
        let err = DbErr::Custom("relation secret_table does not exist".into());
        match map_db_err(err) {
            DomainError::Infra(InfraErrorKind::Other(_), detail) => {
                assert!(!detail.contains("secret_table"));
            }
            other => panic!("unexpected mapping: {other:?}"),
        }
    }
}
