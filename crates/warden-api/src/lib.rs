//! # warden-api — HTTP Boundary for the Validation Engine
//!
//! Exposes the constraint engine over a small Axum surface and owns the
//! reporting pipeline that classifies failures into client and server
//! faults.
//!
//! ## API Surface
//!
//! | Route                              | Module                    | Failure class        |
//! |------------------------------------|---------------------------|----------------------|
//! | `GET /v1/validate/self-check`      | [`routes::self_check`]    | none (always 200)    |
//! | `GET /v1/scores/{score}`           | [`routes::scores`]        | user error (400)     |
//! | `GET /v1/scores/{score}/normalized`| [`routes::scores`]        | internal error (500) |
//! | `GET /v1/greetings/{name}`         | [`routes::greetings`]     | none                 |
//! | `GET /v1/greetings-broken`         | [`routes::greetings`]     | internal error (500) |
//!
//! ## Failure Classification
//!
//! Request-parameter violations are the client's fault: terse `400`,
//! nothing logged. Method-precondition and return-value violations are
//! server faults: diagnostic `500` plus exactly one severe log record
//! carrying the error id. See [`report`].

pub mod bootstrap;
pub mod report;
pub mod routes;
pub mod service;
pub mod sink;
pub mod state;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::self_check::router())
        .merge(routes::scores::router())
        .merge(routes::greetings::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
