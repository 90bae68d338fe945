//! # Bootstrap
//!
//! Builds the constraint registry and wires the application state.
//! Registration happens in code at startup so a misdeclared schema
//! fails the process before it ever binds a socket.

use std::sync::Arc;

use warden_engine::{
    Constraint, ConstraintRegistry, EngineError, MethodSchema, TypeSchema, Validator, ValueSchema,
};

use crate::report::Reporter;
use crate::service::GreetingService;
use crate::sink::LogSink;
use crate::state::{AppConfig, AppState};

/// Registry key for the profile document type.
pub const PROFILE_TYPE: &str = "profile";

/// Compile the full constraint registry for this deployment.
///
/// # Errors
///
/// Propagates registry build rejections. Any error here is a
/// programming mistake in the declarations below, so callers abort
/// startup on it.
pub fn registry() -> Result<ConstraintRegistry, EngineError> {
    ConstraintRegistry::builder()
        .register_type(
            TypeSchema::new(PROFILE_TYPE)
                .field(
                    "email",
                    ValueSchema::scalar([Constraint::NotNull, Constraint::Email]),
                )
                .field(
                    "additional_emails",
                    ValueSchema::list(ValueSchema::scalar([Constraint::Email])),
                )
                .field(
                    "categorized_emails",
                    ValueSchema::map(
                        [Constraint::length_min(3)],
                        ValueSchema::list(ValueSchema::scalar([Constraint::Email])),
                    ),
                )
                .field("score", ValueSchema::scalar([Constraint::Min { value: 0 }])),
        )
        .register_method(
            MethodSchema::new("greeting")
                .parameter("name", ValueSchema::scalar([Constraint::NotNull])),
        )
        .register_method(MethodSchema::new("scores").parameter(
            "score",
            ValueSchema::scalar([Constraint::Digits {
                integer: 3,
                fraction: 0,
            }]),
        ))
        .register_method(
            MethodSchema::new("normalized_score").returns(ValueSchema::scalar([
                Constraint::Digits {
                    integer: 3,
                    fraction: 0,
                },
            ])),
        )
        .build()
}

/// Validator over the bootstrap registry.
pub fn validator() -> Result<Validator, EngineError> {
    Ok(Validator::new(Arc::new(registry()?)))
}

/// Assemble the application state with the given log sink.
pub fn state(config: AppConfig, sink: Arc<dyn LogSink>) -> Result<AppState, EngineError> {
    let validator = validator()?;
    Ok(AppState {
        config,
        service: GreetingService::new(validator.clone()),
        validator,
        reporter: Reporter::new(sink),
    })
}
