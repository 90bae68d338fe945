//! # Violation Origins and Error Categories
//!
//! The boundary classifier: violations are categorized by *where the
//! violated value originated*, never by violation content.
//!
//! Values the caller directly controls (request parameters) that fail
//! before business logic runs are user mistakes. Values produced by the
//! service's own methods (precondition arguments wired internally, or
//! return values) indicate a developer bug and must be surfaced loudly.

use serde::{Deserialize, Serialize};

/// Where a violated value originated, tagged at the validation call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationOrigin {
    /// Untrusted external input bound from the request.
    RequestParameter,
    /// A precondition on an internally invoked method.
    MethodPrecondition,
    /// A postcondition on a value returned by business logic.
    ReturnValue,
}

/// Error-reporting policy bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Caller mistake: 400-class response, terse body, no log record.
    UserError,
    /// Developer bug: 500-class response, diagnostic body, one SEVERE log.
    InternalError,
}

impl ViolationOrigin {
    /// Classify this origin into its reporting category.
    pub fn category(self) -> ErrorCategory {
        match self {
            Self::RequestParameter => ErrorCategory::UserError,
            Self::MethodPrecondition | Self::ReturnValue => ErrorCategory::InternalError,
        }
    }
}
