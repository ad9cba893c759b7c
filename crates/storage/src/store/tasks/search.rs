#![forbid(unsafe_code)]

use super::super::*;
use rusqlite::params_from_iter;
use rusqlite::types::Value;
use tv_core::model::{Priority, TaskStatus};
use tv_core::validate::FieldError;

impl SqliteStore {
    /// Conjunctive filtering over the base visibility rule. `show_deleted`
    /// lists only soft-deleted rows; the default excludes them.
    pub fn search_tasks(&self, request: TaskSearchRequest) -> Result<Vec<TaskRow>, StoreError> {
        let TaskSearchRequest {
            status,
            priority,
            assigned_to,
            keyword,
            tag_ids,
            due_date_from,
            due_date_to,
            show_deleted,
            limit,
            offset,
        } = request;

        let mut errors = Vec::new();
        let status = match status.as_deref() {
            Some(raw) => match TaskStatus::parse(raw) {
                Some(status) => Some(status),
                None => {
                    errors.push(FieldError::new(
                        "status",
                        "Status must be one of: pending, in_progress, completed.",
                    ));
                    None
                }
            },
            None => None,
        };
        let priority = match priority.as_deref() {
            Some(raw) => match Priority::parse(raw) {
                Some(priority) => Some(priority),
                None => {
                    errors.push(FieldError::new(
                        "priority",
                        "Priority must be one of: low, medium, high.",
                    ));
                    None
                }
            },
            None => None,
        };
        let due_from = due_date_from
            .as_deref()
            .and_then(|raw| parse_due_date_field(raw, &mut errors));
        let due_to = due_date_to
            .as_deref()
            .and_then(|raw| parse_due_date_field(raw, &mut errors));
        if !errors.is_empty() {
            return Err(StoreError::Validation(errors));
        }

        let mut sql = format!("SELECT {TASK_COLUMNS} FROM task WHERE ");
        sql.push_str(if show_deleted {
            "deleted_at IS NOT NULL"
        } else {
            "deleted_at IS NULL"
        });
        let mut binds: Vec<Value> = Vec::new();

        if let Some(status) = status {
            sql.push_str(" AND status = ?");
            binds.push(Value::Text(status.as_str().to_string()));
        }
        if let Some(priority) = priority {
            sql.push_str(" AND priority = ?");
            binds.push(Value::Text(priority.as_str().to_string()));
        }
        if let Some(user_id) = assigned_to {
            sql.push_str(" AND assigned_to = ?");
            binds.push(Value::Integer(user_id));
        }
        if let Some(keyword) = keyword.as_deref()
            && !keyword.is_empty()
        {
            sql.push_str(" AND (title LIKE ? OR description LIKE ?)");
            let pattern = format!("%{keyword}%");
            binds.push(Value::Text(pattern.clone()));
            binds.push(Value::Text(pattern));
        }
        if let Some(due) = &due_from {
            sql.push_str(" AND due_date >= ?");
            binds.push(Value::Text(due.as_str().to_string()));
        }
        if let Some(due) = &due_to {
            sql.push_str(" AND due_date <= ?");
            binds.push(Value::Text(due.as_str().to_string()));
        }
        if !tag_ids.is_empty() {
            let placeholders = vec!["?"; tag_ids.len()].join(", ");
            sql.push_str(&format!(
                " AND id IN (SELECT task_id FROM task_tag WHERE tag_id IN ({placeholders}))"
            ));
            for tag_id in &tag_ids {
                binds.push(Value::Integer(*tag_id));
            }
        }

        sql.push_str(" ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?");
        // limit 0 means unpaged; SQLite treats a negative limit as unbounded.
        let limit = if limit == 0 { -1 } else { to_sqlite_i64(limit)? };
        binds.push(Value::Integer(limit));
        binds.push(Value::Integer(to_sqlite_i64(offset)?));

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(binds))?;
        let mut found = Vec::new();
        while let Some(row) = rows.next()? {
            found.push((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, Option<String>>(5)?,
                row.get::<_, Option<i64>>(6)?,
                row.get::<_, i64>(7)?,
                row.get::<_, Option<String>>(8)?,
                row.get::<_, i64>(9)?,
                row.get::<_, i64>(10)?,
                row.get::<_, Option<i64>>(11)?,
            ));
        }

        let mut out = Vec::with_capacity(found.len());
        for (
            id,
            title,
            description,
            status,
            priority,
            due_date,
            assigned_to,
            version,
            metadata,
            created_at,
            updated_at,
            deleted_at,
        ) in found
        {
            let status = TaskStatus::parse(&status)
                .ok_or(StoreError::InvalidInput("invalid status in task row"))?;
            let priority = Priority::parse(&priority)
                .ok_or(StoreError::InvalidInput("invalid priority in task row"))?;
            let tag_ids = task_tag_ids(&self.conn, id)?;
            out.push(TaskRow {
                id,
                title,
                description,
                status,
                priority,
                due_date,
                assigned_to,
                version,
                metadata,
                created_at,
                updated_at,
                deleted_at,
                tag_ids,
            });
        }

        Ok(out)
    }
}

fn to_sqlite_i64(value: usize) -> Result<i64, StoreError> {
    i64::try_from(value).map_err(|_| StoreError::InvalidInput("numeric overflow"))
}
