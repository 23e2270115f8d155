use std::env;
use std::str::FromStr;

use crate::error::AppError;

/// Which set of database names to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnv {
    Prod,
    /// Enforces a `_test` suffix on the Postgres database name
    Test,
}

/// Backing engine for the stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    Postgres,
    SqliteFile,
    SqliteMemory,
}

impl DbKind {
    pub fn is_sqlite(self) -> bool {
        matches!(self, DbKind::SqliteFile | DbKind::SqliteMemory)
    }
}

impl FromStr for DbKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(DbKind::Postgres),
            "sqlite-file" | "sqlite_file" => Ok(DbKind::SqliteFile),
            "sqlite-memory" | "sqlite_memory" => Ok(DbKind::SqliteMemory),
            other => Err(AppError::config(format!(
                "Unknown database kind '{other}' (expected postgres, sqlite-file or sqlite-memory)"
            ))),
        }
    }
}

const DEFAULT_SQLITE_PATH: &str = "cookbook.sqlite";

/// Build a connection URL for `kind` from environment variables.
pub fn db_url(env: RuntimeEnv, kind: DbKind) -> Result<String, AppError> {
    match kind {
        DbKind::Postgres => {
            let host = env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string());
            let port = env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string());
            let db_name = db_name(env)?;
            let username = must_var("APP_DB_USER")?;
            let password = must_var("APP_DB_PASSWORD")?;
            Ok(format!(
                "postgresql://{username}:{password}@{host}:{port}/{db_name}"
            ))
        }
        DbKind::SqliteFile => {
            let path =
                env::var("SQLITE_DB_PATH").unwrap_or_else(|_| DEFAULT_SQLITE_PATH.to_string());
            Ok(format!("sqlite://{path}?mode=rwc"))
        }
        DbKind::SqliteMemory => Ok("sqlite::memory:".to_string()),
    }
}

fn db_name(env: RuntimeEnv) -> Result<String, AppError> {
    match env {
        RuntimeEnv::Prod => must_var("PROD_DB"),
        RuntimeEnv::Test => {
            let db_name = must_var("TEST_DB")?;
            if !db_name.ends_with("_test") {
                return Err(AppError::config(format!(
                    "Test profile requires database name to end with '_test', but got: '{db_name}'"
                )));
            }
            Ok(db_name)
        }
    }
}

fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}
