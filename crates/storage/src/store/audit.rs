#![forbid(unsafe_code)]

use super::{SqliteStore, StoreError, TaskLogRow, TaskRow};
use rusqlite::{Transaction, params};
use serde_json::{Map, Value};
use tv_core::model::OperationKind;

fn opt_string(value: Option<&String>) -> Value {
    match value {
        Some(text) => Value::String(text.clone()),
        None => Value::Null,
    }
}

fn opt_i64(value: Option<i64>) -> Value {
    match value {
        Some(number) => Value::Number(number.into()),
        None => Value::Null,
    }
}

/// Complete post-transition field state, as audited under the `new` key.
pub(crate) fn snapshot_map(row: &TaskRow) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("id".to_string(), Value::Number(row.id.into()));
    map.insert("title".to_string(), Value::String(row.title.clone()));
    map.insert("description".to_string(), opt_string(row.description.as_ref()));
    map.insert(
        "status".to_string(),
        Value::String(row.status.as_str().to_string()),
    );
    map.insert(
        "priority".to_string(),
        Value::String(row.priority.as_str().to_string()),
    );
    map.insert("due_date".to_string(), opt_string(row.due_date.as_ref()));
    map.insert("assigned_to".to_string(), opt_i64(row.assigned_to));
    map.insert("version".to_string(), Value::Number(row.version.into()));
    map.insert("metadata".to_string(), opt_string(row.metadata.as_ref()));
    map.insert("created_at".to_string(), Value::Number(row.created_at.into()));
    map.insert("updated_at".to_string(), Value::Number(row.updated_at.into()));
    map.insert("deleted_at".to_string(), opt_i64(row.deleted_at));
    map
}

/// Pre-transition values of only the business fields whose value changed.
/// The old/new asymmetry is part of the audit contract.
pub(crate) fn changed_fields(old: &TaskRow, new: &TaskRow) -> Map<String, Value> {
    let mut map = Map::new();
    if old.title != new.title {
        map.insert("title".to_string(), Value::String(old.title.clone()));
    }
    if old.description != new.description {
        map.insert("description".to_string(), opt_string(old.description.as_ref()));
    }
    if old.status != new.status {
        map.insert(
            "status".to_string(),
            Value::String(old.status.as_str().to_string()),
        );
    }
    if old.priority != new.priority {
        map.insert(
            "priority".to_string(),
            Value::String(old.priority.as_str().to_string()),
        );
    }
    if old.due_date != new.due_date {
        map.insert("due_date".to_string(), opt_string(old.due_date.as_ref()));
    }
    if old.assigned_to != new.assigned_to {
        map.insert("assigned_to".to_string(), opt_i64(old.assigned_to));
    }
    if old.metadata != new.metadata {
        map.insert("metadata".to_string(), opt_string(old.metadata.as_ref()));
    }
    if old.deleted_at != new.deleted_at {
        map.insert("deleted_at".to_string(), opt_i64(old.deleted_at));
    }
    map
}

/// The operation kind is derived from the transition itself, never passed
/// through: a deleted-marker flip reclassifies an update as delete/restore.
pub(crate) fn derive_operation(old: Option<&TaskRow>, new: &TaskRow) -> OperationKind {
    let Some(old) = old else {
        return OperationKind::Create;
    };
    match (old.deleted_at, new.deleted_at) {
        (None, Some(_)) => OperationKind::Delete,
        (Some(_), None) => OperationKind::Restore,
        _ => OperationKind::Update,
    }
}

pub(crate) fn record_transition_tx(
    tx: &Transaction<'_>,
    task_id: i64,
    actor_id: Option<i64>,
    operation: OperationKind,
    old: Map<String, Value>,
    new: Map<String, Value>,
    now: i64,
) -> Result<(), StoreError> {
    let mut payload = Map::new();
    payload.insert("old".to_string(), Value::Object(old));
    payload.insert("new".to_string(), Value::Object(new));
    let changes = serde_json::to_string(&Value::Object(payload))
        .map_err(|_| StoreError::InvalidInput("audit payload could not be encoded"))?;

    tx.execute(
        "INSERT INTO task_log(task_id, user_id, operation_type, changes, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![task_id, actor_id, operation.as_str(), changes, now],
    )?;
    Ok(())
}

/// Best-effort audit append for a committed transition. A failure is logged
/// and swallowed; the business write stands either way.
pub(crate) fn audit_transition_tx(
    tx: &Transaction<'_>,
    actor_id: Option<i64>,
    old: Option<&TaskRow>,
    new: &TaskRow,
    now: i64,
) {
    let operation = derive_operation(old, new);
    let old_map = old.map(|row| changed_fields(row, new)).unwrap_or_default();
    let new_map = snapshot_map(new);
    if let Err(err) = record_transition_tx(tx, new.id, actor_id, operation, old_map, new_map, now)
    {
        eprintln!("task {}: audit log write failed: {err}", new.id);
    }
}

impl SqliteStore {
    /// Audit trail for one task, oldest entry first.
    pub fn task_logs(&self, task_id: i64) -> Result<Vec<TaskLogRow>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, task_id, user_id, operation_type, changes, created_at \
             FROM task_log \
             WHERE task_id = ?1 \
             ORDER BY id ASC",
        )?;
        let mut rows = stmt.query(params![task_id])?;
        let mut out = Vec::new();

        while let Some(row) = rows.next()? {
            let operation = row.get::<_, String>(3)?;
            let operation = OperationKind::parse(&operation)
                .ok_or(StoreError::InvalidInput("invalid operation in log row"))?;
            out.push(TaskLogRow {
                id: row.get(0)?,
                task_id: row.get(1)?,
                user_id: row.get(2)?,
                operation,
                changes: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
                created_at: row.get(5)?,
            });
        }

        Ok(out)
    }
}
