#![forbid(unsafe_code)]

use super::super::{StoreError, TaskRow};
use rusqlite::{Connection, OptionalExtension, Transaction, params};
use tv_core::model::{Priority, TaskStatus};

pub(crate) const TASK_COLUMNS: &str = "id, title, description, status, priority, due_date, \
     assigned_to, version, metadata, created_at, updated_at, deleted_at";

pub(crate) fn read_task(
    conn: &Connection,
    id: i64,
    include_deleted: bool,
) -> Result<Option<TaskRow>, StoreError> {
    let visibility = if include_deleted {
        ""
    } else {
        " AND deleted_at IS NULL"
    };
    let sql = format!("SELECT {TASK_COLUMNS} FROM task WHERE id = ?1{visibility}");

    let row = conn
        .query_row(&sql, params![id], |row| {
            Ok((
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
            ))
        })
        .optional()?;

    let Some((
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
    )) = row
    else {
        return Ok(None);
    };

    let status =
        TaskStatus::parse(&status).ok_or(StoreError::InvalidInput("invalid status in task row"))?;
    let priority = Priority::parse(&priority)
        .ok_or(StoreError::InvalidInput("invalid priority in task row"))?;
    let tag_ids = task_tag_ids(conn, id)?;

    Ok(Some(TaskRow {
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
    }))
}

pub(crate) fn task_tag_ids(conn: &Connection, task_id: i64) -> Result<Vec<i64>, StoreError> {
    let mut stmt =
        conn.prepare("SELECT tag_id FROM task_tag WHERE task_id = ?1 ORDER BY tag_id ASC")?;
    let mut rows = stmt.query(params![task_id])?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        out.push(row.get::<_, i64>(0)?);
    }
    Ok(out)
}

/// Replaces the tag links of a task, silently dropping ids that do not name
/// an existing tag. Links are timestamped but carry no version.
pub(crate) fn replace_task_tags_tx(
    tx: &Transaction<'_>,
    task_id: i64,
    tag_ids: &[i64],
    now: i64,
) -> Result<(), StoreError> {
    tx.execute("DELETE FROM task_tag WHERE task_id = ?1", params![task_id])?;
    let mut stmt = tx.prepare(
        "INSERT OR IGNORE INTO task_tag(task_id, tag_id, created_at) \
         SELECT ?1, id, ?2 FROM tag WHERE id = ?3",
    )?;
    for tag_id in tag_ids {
        stmt.execute(params![task_id, now, tag_id])?;
    }
    Ok(())
}

pub(crate) fn user_exists(conn: &Connection, user_id: i64) -> Result<bool, StoreError> {
    Ok(conn
        .query_row(
            "SELECT 1 FROM user WHERE id = ?1",
            params![user_id],
            |row| row.get::<_, i64>(0),
        )
        .optional()?
        .is_some())
}

/// Disambiguates a guarded `UPDATE .. WHERE id = ? AND version = ?` that
/// touched no rows: the row either vanished or its version moved on.
pub(crate) fn ensure_version_guard(
    conn: &Connection,
    id: i64,
    expected: i64,
    affected: usize,
) -> Result<(), StoreError> {
    if affected > 0 {
        return Ok(());
    }
    let actual = conn
        .query_row("SELECT version FROM task WHERE id = ?1", params![id], |row| {
            row.get::<_, i64>(0)
        })
        .optional()?;
    Err(match actual {
        Some(actual) => StoreError::VersionConflict { expected, actual },
        None => StoreError::UnknownId,
    })
}
