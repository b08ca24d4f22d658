//! Snapshot models covering every collection at once.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{AssignmentGroup, DocumentFile, NotificationMessage, Semester, Unit};

/// The full in-memory datastore at one revision.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Datastore {
    pub revision_id: i64,
    pub generated_at: DateTime<Utc>,
    pub semesters: Vec<Semester>,
    pub units: Vec<Unit>,
    pub documents: Vec<DocumentFile>,
    pub groups: Vec<AssignmentGroup>,
    pub notifications: Vec<NotificationMessage>,
}

/// Revision information for change detection.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionInfo {
    pub revision_id: i64,
    pub generated_at: DateTime<Utc>,
}

/// Headline counters for the dashboard.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_documents: usize,
    pub active_groups: usize,
    pub unread_notifications: usize,
}
