//! Storage trait definitions for the diagram store.

use crate::models::Diagram;

/// Persistence operations for diagram records.
///
/// Every operation is independent and auto-committed; concurrent updates to
/// the same id are last-write-wins.
#[async_trait::async_trait]
pub trait DiagramStore: Send + Sync {
    /// Ensure the schema exists. Idempotent.
    async fn initialize(&self) -> Result<(), super::StorageError>;

    /// Insert a new diagram and return its assigned id.
    async fn create(
        &self,
        title: &str,
        content: &str,
        tags: Option<&str>,
    ) -> Result<i64, super::StorageError>;

    /// Overwrite title, content and tags, bumping `updated_at`.
    ///
    /// Returns `false` when no diagram has this id.
    async fn update(
        &self,
        id: i64,
        title: &str,
        content: &str,
        tags: Option<&str>,
    ) -> Result<bool, super::StorageError>;

    /// Get diagram by ID
    async fn get(&self, id: i64) -> Result<Option<Diagram>, super::StorageError>;

    /// All diagrams, most recently updated first
    async fn list_all(&self) -> Result<Vec<Diagram>, super::StorageError>;

    /// Diagrams whose title or tags contain `query`, in `list_all` order
    async fn search(&self, query: &str) -> Result<Vec<Diagram>, super::StorageError>;

    /// Hard delete. Returns `false` when no diagram has this id.
    async fn delete(&self, id: i64) -> Result<bool, super::StorageError>;

    /// First element of the `list_all` ordering
    async fn most_recent(&self) -> Result<Option<Diagram>, super::StorageError> {
        Ok(self.list_all().await?.into_iter().next())
    }
}
