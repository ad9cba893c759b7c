#![forbid(unsafe_code)]

use tv_core::model::OperationKind;

/// One committed transition. Append-only: the store exposes no way to
/// update or delete these rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskLogRow {
    pub id: i64,
    pub task_id: i64,
    pub user_id: Option<i64>,
    pub operation: OperationKind,
    /// JSON document `{"old": {..changed fields only..}, "new": {..full state..}}`.
    pub changes: String,
    pub created_at: i64,
}
