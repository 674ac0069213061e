//! Local Mermaid Studio: a small HTTP service that stores, searches and edits
//! Mermaid diagram definitions in SQLite.

pub mod api;

// Re-export api modules at crate root (so routes can use crate::models, crate::storage)
pub use api::config;
pub use api::middleware;
pub use api::models;
pub use api::routes;
pub use api::storage;
