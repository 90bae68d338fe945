//! # Self-Check Endpoint
//!
//! Runs the validator against one document built to trip every profile
//! constraint and one that passes, and returns both rendered outcomes.
//! The response is deterministic, so a single string comparison covers
//! path rendering, message wording, and set ordering end to end.
//!
//! - `GET /v1/validate/self-check`

use axum::extract::{OriginalUri, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};

use crate::bootstrap::PROFILE_TYPE;
use crate::state::AppState;

/// Build the self-check router.
pub fn router() -> Router<AppState> {
    Router::new().route("/v1/validate/self-check", get(self_check))
}

/// One violation per declared constraint position.
fn failing_profile() -> Value {
    json!({
        "email": "oops",
        "additional_emails": ["nope"],
        "categorized_emails": {"a": ["bad"]},
        "score": -1
    })
}

fn passing_profile() -> Value {
    json!({
        "email": "dev@example.org",
        "additional_emails": [],
        "categorized_emails": {"work": ["dev@example.org"]},
        "score": 10
    })
}

/// GET /v1/validate/self-check
async fn self_check(State(state): State<AppState>, OriginalUri(uri): OriginalUri) -> Response {
    let failing = match state.validator.validate(&failing_profile(), PROFILE_TYPE) {
        Ok(v) => v,
        Err(e) => return state.reporter.engine_failure(&e, uri.path()).into_response(),
    };
    let passing = match state.validator.validate(&passing_profile(), PROFILE_TYPE) {
        Ok(v) => v,
        Err(e) => return state.reporter.engine_failure(&e, uri.path()).into_response(),
    };
    format!("{failing}\n{passing}").into_response()
}
