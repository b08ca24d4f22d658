//! Document model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of a course document.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Pdf,
    Docx,
    Video,
    Link,
}

/// A document attached to a unit. Immutable after seeding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentFile {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DocumentType,
    pub url: String,
    pub uploaded_at: DateTime<Utc>,
    pub semester_id: String,
    pub unit_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}
