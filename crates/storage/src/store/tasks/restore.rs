#![forbid(unsafe_code)]

use super::super::*;
use rusqlite::params;

impl SqliteStore {
    /// Clears the deleted marker. The caller's copy is routinely stale here
    /// because the soft delete itself bumped the version, so the authoritative
    /// version is re-read inside the transaction immediately before the
    /// guarded write.
    pub fn restore_task(&mut self, id: i64, actor_id: Option<i64>) -> Result<TaskRow, StoreError> {
        let now = now_ts();
        let tx = self.conn.transaction()?;

        let Some(current) = read_task(&tx, id, true)? else {
            return Err(StoreError::UnknownId);
        };
        if !current.is_deleted() {
            return Err(StoreError::IllegalTransition(
                "cannot restore a task that is not soft-deleted",
            ));
        }

        let expected = tx.query_row(
            "SELECT version FROM task WHERE id = ?1",
            params![id],
            |row| row.get::<_, i64>(0),
        )?;
        let new_version = expected + 1;
        let affected = tx.execute(
            "UPDATE task SET deleted_at = NULL, version = ?3, updated_at = ?4 \
             WHERE id = ?1 AND version = ?2",
            params![id, expected, new_version, now],
        )?;
        ensure_version_guard(&tx, id, expected, affected)?;

        let Some(row) = read_task(&tx, id, true)? else {
            return Err(StoreError::UnknownId);
        };
        audit_transition_tx(&tx, actor_id, Some(&current), &row, now);

        tx.commit()?;
        Ok(row)
    }
}
