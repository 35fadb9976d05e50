//! Application state.

use std::sync::Arc;

use lead_store::LeadStore;

use crate::config::Config;

/// Shared application state.
pub struct AppState<S: LeadStore> {
    /// Server configuration.
    pub config: Config,
    /// Lead store. Owns the store connection; handlers never see a raw pool.
    pub store: S,
}

impl<S: LeadStore> AppState<S> {
    /// Creates new application state.
    pub fn new(config: Config, store: S) -> Self {
        Self { config, store }
    }
}

/// Type alias for shared state.
pub type SharedState<S> = Arc<AppState<S>>;

/// Creates shared state from config and store.
pub fn create_shared_state<S: LeadStore>(config: Config, store: S) -> SharedState<S> {
    Arc::new(AppState::new(config, store))
}
