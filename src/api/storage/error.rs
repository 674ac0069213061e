//! Storage error types for the diagram store.

use thiserror::Error;

/// Storage operation errors.
///
/// A missing diagram is not an error at this layer; lookups return `None`
/// and mutations return `false`.
#[derive(Error, Debug, Clone)]
pub enum StorageError {
    /// Database could not be opened or reached
    #[error("Connection error: {0}")]
    Connection(String),
    /// Schema initialization failed
    #[error("Migration error: {0}")]
    Migration(String),
    /// A statement failed to execute or its row failed to decode
    #[error("Query error: {0}")]
    Query(String),
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Configuration(_) => StorageError::Connection(err.to_string()),
            sqlx::Error::Migrate(e) => StorageError::Migration(e.to_string()),
            other => StorageError::Query(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for StorageError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StorageError::Migration(err.to_string())
    }
}
