//! SQLite storage backend implementation.
//!
//! Uses a sqlx connection pool; each operation checks out one connection for a
//! single auto-committed statement and returns it when the guard drops.

use super::{DiagramStore, StorageError};
use crate::models::Diagram;
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

const SELECT_COLUMNS: &str = "SELECT id, title, content, created_at, updated_at, tags FROM diagrams";
const ORDER_BY_RECENT: &str = "ORDER BY updated_at DESC, id DESC";

/// SQLite storage backend implementation.
#[derive(Clone)]
pub struct SqliteDiagramStore {
    pool: SqlitePool,
}

impl SqliteDiagramStore {
    /// Wrap an existing pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if missing) the database at `url`, e.g. `sqlite://diagrams.db`.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| StorageError::Connection(format!("Invalid database URL {}: {}", url, e)))?;
        Self::connect_with(options, max_connections).await
    }

    /// Open (creating if missing) the database file at `path`.
    pub async fn connect_path(path: &Path, max_connections: u32) -> Result<Self, StorageError> {
        Self::connect_with(SqliteConnectOptions::new().filename(path), max_connections).await
    }

    async fn connect_with(
        options: SqliteConnectOptions,
        max_connections: u32,
    ) -> Result<Self, StorageError> {
        let options = options
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        Ok(Self::new(pool))
    }

    /// Close the pool, waiting for checked-out connections to return.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Fixed-width UTC timestamp so that text ordering matches time ordering.
fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Build a LIKE pattern matching `query` as a literal substring.
pub(crate) fn substring_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for ch in query.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl DiagramStore for SqliteDiagramStore {
    async fn initialize(&self) -> Result<(), StorageError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Diagram store initialized");
        Ok(())
    }

    async fn create(
        &self,
        title: &str,
        content: &str,
        tags: Option<&str>,
    ) -> Result<i64, StorageError> {
        let now = timestamp_now();

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO diagrams (title, content, created_at, updated_at, tags)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(title)
        .bind(content)
        .bind(now.as_str())
        .bind(now.as_str())
        .bind(tags)
        .fetch_one(&self.pool)
        .await?;

        info!("Created diagram {} '{}'", id, title);
        Ok(id)
    }

    async fn update(
        &self,
        id: i64,
        title: &str,
        content: &str,
        tags: Option<&str>,
    ) -> Result<bool, StorageError> {
        // MAX keeps updated_at monotonic if the wall clock steps backwards
        let rows_affected = sqlx::query(
            r#"
            UPDATE diagrams
            SET title = ?, content = ?, updated_at = MAX(?, COALESCE(updated_at, '')), tags = ?
            WHERE id = ?
            "#,
        )
        .bind(title)
        .bind(content)
        .bind(timestamp_now())
        .bind(tags)
        .bind(id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if rows_affected > 0 {
            info!("Updated diagram {}", id);
        }
        Ok(rows_affected > 0)
    }

    async fn get(&self, id: i64) -> Result<Option<Diagram>, StorageError> {
        let diagram = sqlx::query_as::<_, Diagram>(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(diagram)
    }

    async fn list_all(&self) -> Result<Vec<Diagram>, StorageError> {
        let diagrams =
            sqlx::query_as::<_, Diagram>(&format!("{} {}", SELECT_COLUMNS, ORDER_BY_RECENT))
                .fetch_all(&self.pool)
                .await?;

        debug!("Listed {} diagrams", diagrams.len());
        Ok(diagrams)
    }

    async fn search(&self, query: &str) -> Result<Vec<Diagram>, StorageError> {
        let pattern = substring_pattern(query);

        let diagrams = sqlx::query_as::<_, Diagram>(&format!(
            r"{} WHERE title LIKE ?1 ESCAPE '\' OR tags LIKE ?1 ESCAPE '\' {}",
            SELECT_COLUMNS, ORDER_BY_RECENT
        ))
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        debug!("Search '{}' matched {} diagrams", query, diagrams.len());
        Ok(diagrams)
    }

    async fn delete(&self, id: i64) -> Result<bool, StorageError> {
        let rows_affected = sqlx::query("DELETE FROM diagrams WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows_affected > 0 {
            info!("Deleted diagram {}", id);
        }
        Ok(rows_affected > 0)
    }

    async fn most_recent(&self) -> Result<Option<Diagram>, StorageError> {
        let diagram = sqlx::query_as::<_, Diagram>(&format!(
            "{} {} LIMIT 1",
            SELECT_COLUMNS, ORDER_BY_RECENT
        ))
        .fetch_optional(&self.pool)
        .await?;

        Ok(diagram)
    }
}
