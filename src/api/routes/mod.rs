//! API routes module - organizes all route handlers.
//!
//! Diagram endpoints live under /api/diagrams; the page shell and health check
//! sit at the root.

pub mod app_state;
pub mod diagrams;
pub mod error;
pub mod openapi;
pub mod page;

use axum::{Router, routing::get};
use std::sync::Arc;

pub use app_state::AppState;
pub use error::ApiError;

use crate::storage::DiagramStore;

/// Create the API router (mounted under /api by `create_router`)
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/diagrams", diagrams::diagrams_router())
        .merge(openapi::openapi_router())
}

/// Create the full application router with state applied.
///
/// Static file serving and middleware layers are added by the binary.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(page::index))
        .route("/health", get(page::health_check))
        .nest("/api", create_api_router())
        .with_state(app_state)
}

/// Create the application state around a store.
pub fn create_app_state(store: Arc<dyn DiagramStore>) -> AppState {
    AppState::new(store)
}
