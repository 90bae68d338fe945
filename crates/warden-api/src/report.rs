//! # Violation Reporting
//!
//! Turns classified constraint failures into HTTP responses and
//! server-side log records.
//!
//! ## Contract
//!
//! - User errors (request-parameter violations) become a `400` with a
//!   terse plain-text body listing the constraint messages. Nothing is
//!   logged; a client sending bad input is not a server fault.
//! - Internal errors (method-precondition and return-value violations)
//!   become a `500` carrying a diagnostic body with the error type, the
//!   leading message and property path, and a fresh error id. Exactly
//!   one `SEVERE` record is emitted per failed request, tagged with the
//!   same error id so operators can join the response to the log line.

use std::fmt::Write as _;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use warden_core::{ConstraintViolationError, ErrorCategory, ErrorId};
use warden_engine::EngineError;

use crate::sink::{LogRecord, LogSink};

/// Outcome of reporting one failure: what the client sees.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorReport {
    pub status: StatusCode,
    pub body: String,
}

impl IntoResponse for ErrorReport {
    fn into_response(self) -> Response {
        (self.status, self.body).into_response()
    }
}

/// Classifies violation errors and emits the matching response and log
/// records. Cheap to clone; shared across handlers.
#[derive(Clone)]
pub struct Reporter {
    sink: Arc<dyn LogSink>,
}

impl Reporter {
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self { sink }
    }

    /// Report a constraint failure observed while serving
    /// `request_path`. `frames` names the code locations on the failing
    /// call path, innermost first (the raising method, then its
    /// caller), and appears as the frame dump of internal-error bodies.
    pub fn report(
        &self,
        err: &ConstraintViolationError,
        request_path: &str,
        frames: &[&str],
    ) -> ErrorReport {
        match err.category() {
            ErrorCategory::UserError => ErrorReport {
                status: StatusCode::BAD_REQUEST,
                body: err
                    .violations
                    .messages()
                    .collect::<Vec<_>>()
                    .join(", "),
            },
            ErrorCategory::InternalError => {
                let id = ErrorId::new();
                self.sink.record(LogRecord::severe(format!(
                    "HTTP Request to {request_path} failed, error id: {id}"
                )));
                ErrorReport {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    body: render_diagnostic(err, &id, frames),
                }
            }
        }
    }

    /// Report an engine fault (unknown type, unreadable schema). Always
    /// a server fault: logged severe, generic body, nothing internal
    /// exposed to the client.
    pub fn engine_failure(&self, err: &EngineError, request_path: &str) -> ErrorReport {
        let id = ErrorId::new();
        self.sink.record(LogRecord::severe(format!(
            "HTTP Request to {request_path} failed, error id: {id}"
        )));
        tracing::error!(error = %err, error_id = %id, "validation engine fault");
        ErrorReport {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: format!("internal error, error id: {id}"),
        }
    }
}

/// Diagnostic body for internal errors. Writing into a `String` cannot
/// fail, so write results are dropped.
fn render_diagnostic(err: &ConstraintViolationError, id: &ErrorId, frames: &[&str]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}: {err}",
        std::any::type_name::<ConstraintViolationError>()
    );
    if let Some(first) = err.violations.first() {
        let _ = writeln!(out, "message: {}", first.message());
        let _ = writeln!(out, "property path: {}", first.path());
    }
    for frame in frames {
        let _ = writeln!(out, "\tat {frame}");
    }
    let _ = write!(out, "error id: {id}");
    out
}
