use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use cookbook::middleware::{RequestTrace, SecurityHeaders, StructuredLogger, TraceSpan};
use cookbook::routes;
use cookbook::state::app_state::AppState;

/// Build the production route tree and middleware stack around `state`.
///
/// CORS is left out: it changes the body type and is covered by its own
/// unit tests.
pub async fn create_test_app(
    state: AppState,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error> {
    test::init_service(
        App::new()
            .wrap(SecurityHeaders)
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(web::Data::new(state))
            .configure(routes::configure)
            .default_service(web::to(routes::not_found)),
    )
    .await
}
