use actix_web::{web, HttpResponse};
use migration::get_latest_migration_version;
use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::AppError;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    app_version: &'static str,
    /// `ok`, `error`, or `memory` when no database is configured
    db: &'static str,
    migrations: String,
    time: String,
}

async fn health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let time = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    let (db, migrations) = match app_state.db() {
        None => ("memory", "n/a".to_string()),
        Some(conn) => {
            let ping = conn
                .execute_unprepared("SELECT 1")
                .await;
            match ping {
                Ok(_) => {
                    let version = match get_latest_migration_version(conn).await {
                        Ok(Some(v)) => v,
                        Ok(None) => "no_migrations".to_string(),
                        Err(_) => "unknown".to_string(),
                    };
                    ("ok", version)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "health check query failed");
                    ("error", "unknown".to_string())
                }
            }
        }
    };

    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        app_version: env!("CARGO_PKG_VERSION"),
        db,
        migrations,
        time,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}
