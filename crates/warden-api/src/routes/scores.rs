//! # Score Endpoints
//!
//! - `GET /v1/scores/{score}` — validate the raw path parameter and
//!   echo it back. Violations here are user errors: `400`, no log.
//! - `GET /v1/scores/{score}/normalized` — parse and normalize the
//!   score. The return contract can fail after the computation, which
//!   is an internal error: `500`, one severe log.

use axum::extract::{OriginalUri, Path, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use serde_json::Value;

use warden_core::{ConstraintViolationError, ViolationOrigin};

use crate::routes::service_failure;
use crate::state::AppState;

/// Build the scores router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/scores/{score}", get(echo_score))
        .route("/v1/scores/{score}/normalized", get(normalized_score))
}

/// GET /v1/scores/{score}
///
/// The parameter is validated as received, before any parsing, so
/// non-numeric input surfaces as a digits violation rather than a
/// routing error.
async fn echo_score(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(score): Path<String>,
) -> Response {
    let raw = Value::String(score.clone());
    match state.validator.validate_parameter("scores", "score", &raw) {
        Ok(violations) if violations.is_empty() => score.into_response(),
        Ok(violations) => {
            let err =
                ConstraintViolationError::new(ViolationOrigin::RequestParameter, violations);
            state
                .reporter
                .report(&err, uri.path(), &[concat!(module_path!(), "::echo_score")])
                .into_response()
        }
        Err(e) => state.reporter.engine_failure(&e, uri.path()).into_response(),
    }
}

/// GET /v1/scores/{score}/normalized
async fn normalized_score(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(score): Path<String>,
) -> Response {
    // Parameter check first: bad input is the caller's fault, never a
    // return-contract failure.
    let raw = Value::String(score.clone());
    match state.validator.validate_parameter("scores", "score", &raw) {
        Ok(violations) if violations.is_empty() => {}
        Ok(violations) => {
            let err =
                ConstraintViolationError::new(ViolationOrigin::RequestParameter, violations);
            return state
                .reporter
                .report(
                    &err,
                    uri.path(),
                    &[concat!(module_path!(), "::normalized_score")],
                )
                .into_response();
        }
        Err(e) => return state.reporter.engine_failure(&e, uri.path()).into_response(),
    }

    // The digits contract on the parameter guarantees this parses.
    let parsed: i64 = score.parse().unwrap_or_default();
    match state.service.normalized_score(parsed) {
        Ok(normalized) => normalized.to_string().into_response(),
        Err(err) => service_failure(
            &state.reporter,
            &err,
            uri.path(),
            &[
                "warden_api::service::GreetingService::normalized_score",
                concat!(module_path!(), "::normalized_score"),
            ],
        ),
    }
}
