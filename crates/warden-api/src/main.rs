//! # warden-api — Binary Entry Point
//!
//! Starts the Axum HTTP server. Binds to a configurable port (default
//! 8080). Registry compilation happens before the socket binds, so a
//! bad constraint declaration fails the process immediately.

use std::sync::Arc;

use warden_api::sink::TracingSink;
use warden_api::state::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();
    let port = config.port;

    let state = warden_api::bootstrap::state(config, Arc::new(TracingSink)).map_err(|e| {
        tracing::error!("Registry bootstrap failed: {e}");
        e
    })?;

    let app = warden_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("warden API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
