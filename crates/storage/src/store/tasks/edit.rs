#![forbid(unsafe_code)]

use super::super::*;
use rusqlite::params;
use tv_core::model::today_utc;
use tv_core::validate::{self, FieldError};

impl SqliteStore {
    pub fn edit_task(&mut self, request: TaskEditRequest) -> Result<TaskRow, StoreError> {
        let TaskEditRequest {
            id,
            expected_version,
            include_deleted,
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

        let patches_fields = title.is_some()
            || description.is_some()
            || status.is_some()
            || priority.is_some()
            || due_date.is_some()
            || assigned_to.is_some()
            || metadata.is_some();
        if !patches_fields && tag_ids.is_none() {
            return Err(StoreError::InvalidInput("no fields to edit"));
        }

        let now = now_ts();
        let tx = self.conn.transaction()?;

        let Some(current) = read_task(&tx, id, include_deleted)? else {
            return Err(StoreError::UnknownId);
        };

        // Tag links carry no version; a tag-only edit replaces them without
        // touching the row or the audit trail.
        if !patches_fields {
            if let Some(items) = &tag_ids {
                replace_task_tags_tx(&tx, id, items, now)?;
            }
            let Some(row) = read_task(&tx, id, true)? else {
                return Err(StoreError::UnknownId);
            };
            tx.commit()?;
            return Ok(row);
        }

        let mut errors = Vec::new();
        let new_title = title.unwrap_or_else(|| current.title.clone());
        let new_description = match description {
            Some(value) => value,
            None => current.description.clone(),
        };
        let new_status = parse_status_field(status.as_deref(), current.status, &mut errors);
        let new_priority = parse_priority_field(priority.as_deref(), current.priority, &mut errors);
        let new_due_raw = match due_date {
            Some(value) => value,
            None => current.due_date.clone(),
        };
        let new_due = new_due_raw
            .as_deref()
            .and_then(|raw| parse_due_date_field(raw, &mut errors));
        let new_assigned = match assigned_to {
            Some(value) => value,
            None => current.assigned_to,
        };
        let new_metadata = match metadata {
            Some(Some(raw)) => canonical_metadata(&raw, &mut errors),
            Some(None) => None,
            None => current.metadata.clone(),
        };

        if let Some(error) = validate::title(&new_title) {
            errors.push(error);
        }
        if let Some(due) = &new_due
            && let Some(error) = validate::due_date(due, new_status, today_utc())
        {
            errors.push(error);
        }
        if let Some(user_id) = new_assigned
            && !user_exists(&tx, user_id)?
        {
            errors.push(FieldError::new("assigned_to", "Assigned user does not exist."));
        }
        if !errors.is_empty() {
            return Err(StoreError::Validation(errors));
        }

        let expected = expected_version.unwrap_or(current.version);
        let new_version = expected + 1;
        let affected = tx.execute(
            r#"
            UPDATE task
            SET title = ?3,
                description = ?4,
                status = ?5,
                priority = ?6,
                due_date = ?7,
                assigned_to = ?8,
                metadata = ?9,
                version = ?10,
                updated_at = ?11
            WHERE id = ?1 AND version = ?2
            "#,
            params![
                id,
                expected,
                new_title,
                new_description,
                new_status.as_str(),
                new_priority.as_str(),
                new_due.as_ref().map(|d| d.as_str()),
                new_assigned,
                new_metadata,
                new_version,
                now
            ],
        )?;
        ensure_version_guard(&tx, id, expected, affected)?;

        if let Some(items) = &tag_ids {
            replace_task_tags_tx(&tx, id, items, now)?;
        }

        let Some(row) = read_task(&tx, id, true)? else {
            return Err(StoreError::UnknownId);
        };
        audit_transition_tx(&tx, actor_id, Some(&current), &row, now);

        tx.commit()?;
        Ok(row)
    }
}
