//! API endpoints.

pub mod group;
pub mod lead;

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    routing::{get, post},
};
use lead_store::LeadStore;

use crate::error::ServerResult;
use crate::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router<S: LeadStore + 'static>() -> Router<Arc<AppState<S>>> {
    Router::new()
        // Lead endpoints
        .route("/api/lead/list", post(lead::list_leads))
        .route("/api/lead/search", post(lead::search_leads))
        .route("/api/lead/create", post(lead::create_lead))
        .route("/api/lead/update", post(lead::update_lead))
        .route("/api/lead/delete", post(lead::delete_lead))
        // Group endpoints
        .route("/api/group/list", post(group::list_groups))
        .route("/api/group/delete", post(group::delete_group))
        .route("/api/group/rename", post(group::rename_group))
        // Health checks
        .route("/health", get(health_check))
        .route("/health/store", get(store_health_check))
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

/// Connects to the store if needed and pings it.
async fn store_health_check<S: LeadStore>(
    State(state): State<Arc<AppState<S>>>,
) -> ServerResult<&'static str> {
    state.store.ping().await?;
    Ok("OK")
}
