//! # Greeting Endpoints
//!
//! - `GET /v1/greetings/{name}` — greet by name; the path parameter
//!   always satisfies the `not_null` precondition.
//! - `GET /v1/greetings-broken` — calls the service with no name,
//!   tripping the precondition. Demonstrates that a contract failure
//!   inside the service surfaces as a `500` with a diagnostic body and
//!   a single severe log, never as a `400`.

use axum::extract::{OriginalUri, Path, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;

use crate::routes::service_failure;
use crate::state::AppState;

const GREETING_SITE: &str = "warden_api::service::GreetingService::greeting";

/// Build the greetings router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/greetings/{name}", get(greet))
        .route("/v1/greetings-broken", get(greet_broken))
}

/// GET /v1/greetings/{name}
async fn greet(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(name): Path<String>,
) -> Response {
    match state.service.greeting(Some(&name)) {
        Ok(message) => message.into_response(),
        Err(err) => service_failure(
            &state.reporter,
            &err,
            uri.path(),
            &[GREETING_SITE, concat!(module_path!(), "::greet")],
        ),
    }
}

/// GET /v1/greetings-broken
async fn greet_broken(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> Response {
    match state.service.greeting(None) {
        Ok(message) => message.into_response(),
        Err(err) => service_failure(
            &state.reporter,
            &err,
            uri.path(),
            &[GREETING_SITE, concat!(module_path!(), "::greet_broken")],
        ),
    }
}
