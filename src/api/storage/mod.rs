//! Storage module for the API.
//!
//! Owns the persisted diagram records. The SQLite backend is the only
//! implementation; routes depend on the `DiagramStore` trait.

pub mod error;
pub mod sqlite;
pub mod traits;

pub use error::StorageError;
pub use sqlite::SqliteDiagramStore;
pub use traits::DiagramStore;
