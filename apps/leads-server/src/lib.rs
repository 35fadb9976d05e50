//! Leads server
//!
//! Exposes the lead repository and group directory over JSON POST endpoints
//! for the CRM front end.

pub mod api;
pub mod config;
pub mod error;
pub mod state;

use std::sync::Arc;

use axum::Router;
use lead_store::LeadStore;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::Config;
use crate::state::{AppState, create_shared_state};

/// Creates the application router with all routes configured.
pub fn create_app<S: LeadStore + 'static>(state: Arc<AppState<S>>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    api::create_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Creates the application state with the given configuration and store.
pub fn create_state<S: LeadStore>(config: Config, store: S) -> Arc<AppState<S>> {
    create_shared_state(config, store)
}

/// Initializes tracing with the given log level. `RUST_LOG` takes precedence.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
