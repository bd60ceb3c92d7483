//! # packing-api — Binary Entry Point
//!
//! Loads configuration, connects the catalog backend, and serves the HTTP
//! API until Ctrl-C.

use anyhow::Context;
use packing_api::config::AppConfig;
use packing_api::middleware::metrics::install_recorder;
use packing_api::{db, telemetry, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load_default().context("loading configuration")?;

    telemetry::init(&config.logging, None)
        .map_err(|e| anyhow::anyhow!("initializing tracing: {e}"))?;

    let metrics = install_recorder().context("installing Prometheus recorder")?;

    // Absent database configuration means an in-memory catalog.
    let db_pool = db::init_pool(&config.database).await.map_err(|e| {
        tracing::error!("Database initialization failed: {e}");
        e
    })?;

    let addr = config.server.bind_addr();
    let state = AppState::with_config(config, db_pool).with_metrics(metrics);
    tracing::info!(
        persistent = state.is_persistent(),
        "pack-size catalog ready"
    );

    let app = packing_api::app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!("Packing API listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Packing API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
