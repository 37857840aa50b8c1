use std::sync::Arc;

use anyhow::Context;
use six_schedule::config::AppConfig;
use six_schedule::logging::setup_logging;
use six_schedule::server::create_router;
use six_schedule::types::AppState;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    setup_logging(&config);

    let state = Arc::new(AppState::new(&config)?);
    let app = create_router(state);

    let listener = TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", config.host, config.port))?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        address = %listener.local_addr()?,
        upstream = %config.six_base_url,
        "Server starting"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
