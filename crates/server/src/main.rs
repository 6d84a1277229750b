//! techlens HTTP server entry point.
//!
//! Serves the contact relay, diagnostics, content JSON, robots and sitemap.
//! Logs are JSON on stderr.

use anyhow::{Context, Result};
use techlens_core::AppConfig;
use tracing_subscriber::EnvFilter;

mod error;
mod routes;
mod state;

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
    tracing::info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load().context("loading configuration")?;
    let addr = config.socket_addr()?;

    let state = state::AppState::from_config(config)?;
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(addr).await.with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "Starting techlens server");

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    Ok(())
}
