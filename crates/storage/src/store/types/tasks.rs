#![forbid(unsafe_code)]

use tv_core::model::{Priority, TaskStatus};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskRow {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: Priority,
    pub due_date: Option<String>,
    pub assigned_to: Option<i64>,
    pub version: i64,
    /// Metadata document as canonical JSON text; validated for
    /// well-formedness only.
    pub metadata: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
    pub tag_ids: Vec<i64>,
}

impl TaskRow {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Result of a physical delete request after interception.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The delete was redirected to a soft delete; the row survives.
    SoftDeleted(TaskRow),
    /// The row was already soft-deleted and has now been removed for real.
    HardDeleted,
}
