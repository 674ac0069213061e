//! Application state management.
//!
//! Defines the AppState struct shared by every route handler. It holds no
//! per-request data; all diagram state lives in the store.

use crate::storage::DiagramStore;
use axum::extract::FromRef;
use std::path::PathBuf;
use std::sync::Arc;

/// Application state shared across all route handlers.
#[derive(Clone)]
pub struct AppState {
    /// Diagram storage backend
    pub store: Arc<dyn DiagramStore>,
    /// HTML page shell served at /
    pub index_template: PathBuf,
}

impl AppState {
    /// Create a new application state around a store.
    pub fn new(store: Arc<dyn DiagramStore>) -> Self {
        Self {
            store,
            index_template: PathBuf::from("templates/index.html"),
        }
    }

    /// Override the page shell location.
    pub fn with_index_template(mut self, path: impl Into<PathBuf>) -> Self {
        self.index_template = path.into();
        self
    }
}

// Allow the store to be extracted directly (for Axum)
impl FromRef<AppState> for Arc<dyn DiagramStore> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.store.clone()
    }
}
