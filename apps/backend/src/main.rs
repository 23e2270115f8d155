use actix_web::{web, App, HttpServer};
use cookbook::bin_support::config_app::Config;
use cookbook::config::db::RuntimeEnv;
use cookbook::infra::state::build_state;
use cookbook::middleware::{
    cors_middleware, RequestTrace, SecurityHeaders, StructuredLogger, TraceSpan,
};
use cookbook::routes;
use tracing::{error, info};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (docker env_file, or `set -a; . ./.env; set +a` locally).
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    info!(host = %config.host, port = config.port, db = ?config.db_kind, "starting cookbook backend");

    let app_state = match build_state()
        .with_db(RuntimeEnv::Prod, config.db_kind)
        .with_security(config.security())
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };

    let data = web::Data::new(app_state);
    let origins = config.allowed_origins.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware(&origins))
            .wrap(SecurityHeaders)
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
            .default_service(web::to(routes::not_found))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
