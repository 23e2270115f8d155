use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::db::{db_url, DbKind, RuntimeEnv};
use crate::error::AppError;

fn connect_options(url: String, kind: DbKind) -> ConnectOptions {
    let mut opts = ConnectOptions::new(url);
    opts.connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    // Every pooled connection to `sqlite::memory:` is a separate database.
    if kind == DbKind::SqliteMemory {
        opts.max_connections(1).min_connections(1);
    }
    opts
}

/// Open a connection without touching the schema.
pub async fn connect(env: RuntimeEnv, kind: DbKind) -> Result<DatabaseConnection, AppError> {
    let url = db_url(env, kind)?;
    Ok(Database::connect(connect_options(url, kind)).await?)
}

/// Connect to the configured database and apply pending migrations.
pub async fn bootstrap_db(env: RuntimeEnv, kind: DbKind) -> Result<DatabaseConnection, AppError> {
    let conn = connect(env, kind).await?;

    migrate(&conn, MigrationCommand::Up).await?;

    info!(db_kind = ?kind, runtime_env = ?env, "database ready");
    Ok(conn)
}
