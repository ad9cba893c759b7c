#![forbid(unsafe_code)]

use super::super::*;
use rusqlite::{Transaction, params};
use serde_json::Map;
use tv_core::model::OperationKind;

impl SqliteStore {
    /// Physical delete request. Interception converts it to a soft delete for
    /// an active row; only a delete of an already-deleted row removes it for
    /// real, taking its audit trail with it.
    pub fn delete_task(
        &mut self,
        id: i64,
        expected_version: Option<i64>,
        actor_id: Option<i64>,
    ) -> Result<DeleteOutcome, StoreError> {
        let now = now_ts();
        let tx = self.conn.transaction()?;

        let Some(current) = read_task(&tx, id, true)? else {
            return Err(StoreError::UnknownId);
        };

        if !current.is_deleted() {
            let row = soft_delete_tx(&tx, &current, expected_version, actor_id, now)?;
            tx.commit()?;
            return Ok(DeleteOutcome::SoftDeleted(row));
        }

        let expected = expected_version.unwrap_or(current.version);
        let affected = tx.execute(
            "DELETE FROM task WHERE id = ?1 AND version = ?2",
            params![id, expected],
        )?;
        ensure_version_guard(&tx, id, expected, affected)?;

        // The row is gone, so this append fails on the foreign key and is
        // swallowed like any other audit failure.
        if let Err(err) = record_transition_tx(
            &tx,
            id,
            actor_id,
            OperationKind::Delete,
            Map::new(),
            snapshot_map(&current),
            now,
        ) {
            eprintln!("task {id}: audit log write failed: {err}");
        }

        tx.commit()?;
        Ok(DeleteOutcome::HardDeleted)
    }

    /// Explicit soft-delete helper. Calling it on an already-deleted task is a
    /// no-op success: no deleted-marker change, no version bump, no audit row.
    pub fn soft_delete_task(
        &mut self,
        id: i64,
        expected_version: Option<i64>,
        actor_id: Option<i64>,
    ) -> Result<TaskRow, StoreError> {
        let now = now_ts();
        let tx = self.conn.transaction()?;

        let Some(current) = read_task(&tx, id, true)? else {
            return Err(StoreError::UnknownId);
        };
        if current.is_deleted() {
            return Ok(current);
        }

        let row = soft_delete_tx(&tx, &current, expected_version, actor_id, now)?;
        tx.commit()?;
        Ok(row)
    }
}

fn soft_delete_tx(
    tx: &Transaction<'_>,
    current: &TaskRow,
    expected_version: Option<i64>,
    actor_id: Option<i64>,
    now: i64,
) -> Result<TaskRow, StoreError> {
    let expected = expected_version.unwrap_or(current.version);
    let new_version = expected + 1;
    let affected = tx.execute(
        "UPDATE task SET deleted_at = ?3, version = ?4, updated_at = ?5 \
         WHERE id = ?1 AND version = ?2",
        params![current.id, expected, now, new_version, now],
    )?;
    ensure_version_guard(tx, current.id, expected, affected)?;

    let Some(row) = read_task(tx, current.id, true)? else {
        return Err(StoreError::UnknownId);
    };
    audit_transition_tx(tx, actor_id, Some(current), &row, now);
    Ok(row)
}
