//! Diagram model.
//!
//! A diagram wraps a title, the Mermaid source text and optional free-form tags.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Stored diagram record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Diagram {
    /// Store-assigned identifier, never reused
    pub id: i64,
    /// Diagram title
    pub title: String,
    /// Mermaid source, stored verbatim
    pub content: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
    /// Optional caller-defined tags (e.g. comma-separated)
    pub tags: Option<String>,
}

/// Request to create a diagram
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreateDiagramRequest {
    /// Diagram title, must not be empty
    pub title: String,
    /// Mermaid source
    pub content: String,
    /// Optional tags
    #[serde(default)]
    pub tags: Option<String>,
}

/// Request to update a diagram
///
/// All fields are overwritten; omitting `tags` clears them.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct UpdateDiagramRequest {
    /// New title, must not be empty
    pub title: String,
    /// New Mermaid source
    pub content: String,
    /// New tags
    #[serde(default)]
    pub tags: Option<String>,
}

/// Acknowledgement returned by delete
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteDiagramResponse {
    pub success: bool,
}

/// Reject payloads the store must never see.
pub fn validate_title(title: &str) -> Result<(), &'static str> {
    if title.is_empty() {
        return Err("title must not be empty");
    }
    Ok(())
}

impl CreateDiagramRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        validate_title(&self.title)
    }
}

impl UpdateDiagramRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        validate_title(&self.title)
    }
}
