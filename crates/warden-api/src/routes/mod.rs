//! # Route Modules
//!
//! Handlers return `Response` directly: failure mapping needs the
//! request path and the reporter, so errors are classified inside each
//! handler rather than through a blanket `IntoResponse` impl.

pub mod greetings;
pub mod scores;
pub mod self_check;

use axum::response::{IntoResponse, Response};

use crate::report::Reporter;
use crate::service::ServiceError;

/// Map a service failure to a response via the reporter. `frames` are
/// the call-path identifiers shown in internal-error diagnostics,
/// innermost first.
pub(crate) fn service_failure(
    reporter: &Reporter,
    err: &ServiceError,
    request_path: &str,
    frames: &[&str],
) -> Response {
    match err {
        ServiceError::Violation(v) => reporter.report(v, request_path, frames).into_response(),
        ServiceError::Engine(e) => reporter.engine_failure(e, request_path).into_response(),
    }
}
