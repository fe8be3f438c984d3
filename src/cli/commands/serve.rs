//! HTTP server command handler

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

use crate::api;
use crate::config::Settings;
use crate::db::Database;
use crate::state::AppState;

pub async fn cmd_serve(settings: Settings) -> anyhow::Result<()> {
    info!(
        "{} v{} starting...",
        settings.project_name,
        env!("CARGO_PKG_VERSION")
    );

    let db = Database::connect(&settings)
        .await
        .context("Failed to connect to database")?;
    db.migrate().await.context("Failed to apply migrations")?;

    let bind_addr = settings.server.bind_addr;
    let state = Arc::new(AppState::new(settings, db.clone()));
    let app = api::router(state);

    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("Failed to bind {bind_addr}"))?;
    info!("Web server running at http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Web server error")?;

    db.close().await?;
    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Error listening for shutdown: {}", e),
    }
}
