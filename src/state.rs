//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the automation API client and the per-browser session store.

use std::sync::Arc;

use crate::api::JobApi;
use crate::session::SessionStore;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn JobApi>,
    pub sessions: SessionStore,
}

impl AppState {
    #[must_use]
    pub fn new(api: Arc<dyn JobApi>) -> Self {
        Self { api, sessions: SessionStore::new() }
    }
}

#[cfg(test)]
#[path = "state_helpers_test.rs"]
pub mod test_helpers;
