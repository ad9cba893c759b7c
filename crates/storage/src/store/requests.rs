#![forbid(unsafe_code)]

#[derive(Clone, Debug, Default)]
pub struct TaskCreateRequest {
    pub title: String,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<String>,
    pub assigned_to: Option<i64>,
    pub metadata: Option<String>,
    pub tag_ids: Vec<i64>,
    pub actor_id: Option<i64>,
}

/// Partial patch. Outer `None` leaves a field untouched; for nullable columns
/// the inner option distinguishes "set" from "clear".
#[derive(Clone, Debug, Default)]
pub struct TaskEditRequest {
    pub id: i64,
    pub expected_version: Option<i64>,
    pub include_deleted: bool,
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<Option<String>>,
    pub assigned_to: Option<Option<i64>>,
    pub metadata: Option<Option<String>>,
    pub tag_ids: Option<Vec<i64>>,
    pub actor_id: Option<i64>,
}

#[derive(Clone, Debug)]
pub struct ToggleStatusRequest {
    pub id: i64,
    pub expected_version: Option<i64>,
    pub actor_id: Option<i64>,
}

#[derive(Clone, Debug, Default)]
pub struct TaskSearchRequest {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub assigned_to: Option<i64>,
    pub keyword: Option<String>,
    pub tag_ids: Vec<i64>,
    pub due_date_from: Option<String>,
    pub due_date_to: Option<String>,
    pub show_deleted: bool,
    pub limit: usize,
    pub offset: usize,
}

#[derive(Clone, Debug)]
pub struct TagCreateRequest {
    pub name: String,
    pub color: Option<String>,
}

#[derive(Clone, Debug)]
pub struct UserCreateRequest {
    pub username: String,
    pub role: String,
}
