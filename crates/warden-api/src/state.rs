//! # Application State
//!
//! Shared state for all handlers. Everything inside is immutable after
//! bootstrap; cloning the state clones `Arc`s, never the registry.

use warden_engine::Validator;

use crate::report::Reporter;
use crate::service::GreetingService;

/// Runtime configuration, read from the environment at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// TCP port the server binds to.
    pub port: u16,
}

impl AppConfig {
    /// Read configuration from the environment. Missing or unparseable
    /// values fall back to defaults.
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        Self { port }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub validator: Validator,
    pub service: GreetingService,
    pub reporter: Reporter,
}
