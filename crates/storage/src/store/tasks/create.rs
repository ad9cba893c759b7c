#![forbid(unsafe_code)]

use super::super::*;
use rusqlite::params;
use tv_core::model::{Priority, TaskStatus, today_utc};
use tv_core::validate::{self, FieldError};

impl SqliteStore {
    pub fn create_task(&mut self, request: TaskCreateRequest) -> Result<TaskRow, StoreError> {
        let TaskCreateRequest {
            title,
            description,
            status,
            priority,
            due_date,
            assigned_to,
            metadata,
            tag_ids,
            actor_id,
        } = request;

        let now = now_ts();
        let tx = self.conn.transaction()?;

        let mut errors = Vec::new();
        let status = parse_status_field(status.as_deref(), TaskStatus::Pending, &mut errors);
        let priority = parse_priority_field(priority.as_deref(), Priority::Medium, &mut errors);
        let due = due_date
            .as_deref()
            .and_then(|raw| parse_due_date_field(raw, &mut errors));
        let metadata = metadata
            .as_deref()
            .and_then(|raw| canonical_metadata(raw, &mut errors));

        if let Some(error) = validate::title(&title) {
            errors.push(error);
        }
        if let Some(due) = &due
            && let Some(error) = validate::due_date(due, status, today_utc())
        {
            errors.push(error);
        }
        if let Some(user_id) = assigned_to
            && !user_exists(&tx, user_id)?
        {
            errors.push(FieldError::new("assigned_to", "Assigned user does not exist."));
        }
        if !errors.is_empty() {
            return Err(StoreError::Validation(errors));
        }

        tx.execute(
            r#"
            INSERT INTO task(title, description, status, priority, due_date, assigned_to,
                             version, metadata, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, ?7, ?8, ?8)
            "#,
            params![
                title,
                description,
                status.as_str(),
                priority.as_str(),
                due.as_ref().map(|d| d.as_str()),
                assigned_to,
                metadata,
                now
            ],
        )?;
        let id = tx.last_insert_rowid();

        if !tag_ids.is_empty() {
            replace_task_tags_tx(&tx, id, &tag_ids, now)?;
        }

        let Some(row) = read_task(&tx, id, true)? else {
            return Err(StoreError::UnknownId);
        };
        audit_transition_tx(&tx, actor_id, None, &row, now);

        tx.commit()?;
        Ok(row)
    }
}
