//! Leads server binary.

use std::net::SocketAddr;

use lead_store::{Gateway, SqliteLeadStore};
use leads_server::{config::Config, create_app, create_state, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env if present
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.log_level);

    tracing::info!("Starting leads server");

    // The gateway connects on the first request, not here
    let store = SqliteLeadStore::new(Gateway::new(&config.database_url));

    // Create application state
    let state = create_state(config.clone(), store);

    // Create application router
    let app = create_app(state.clone());

    // Parse server address
    let addr: SocketAddr = config.server_addr().parse()?;

    tracing::info!(addr = %addr, "Server listening");

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.store.gateway().close().await;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
