#![forbid(unsafe_code)]

use super::super::*;
use rusqlite::params;

impl SqliteStore {
    /// Advances the status one step in the cycle
    /// pending -> in_progress -> completed -> pending.
    pub fn toggle_status(&mut self, request: ToggleStatusRequest) -> Result<TaskRow, StoreError> {
        let ToggleStatusRequest {
            id,
            expected_version,
            actor_id,
        } = request;

        let now = now_ts();
        let tx = self.conn.transaction()?;

        let Some(current) = read_task(&tx, id, true)? else {
            return Err(StoreError::UnknownId);
        };
        if current.is_deleted() {
            return Err(StoreError::IllegalTransition(
                "cannot toggle status of a soft-deleted task",
            ));
        }

        let next = current.status.next();
        let expected = expected_version.unwrap_or(current.version);
        let new_version = expected + 1;
        let affected = tx.execute(
            "UPDATE task SET status = ?3, version = ?4, updated_at = ?5 \
             WHERE id = ?1 AND version = ?2",
            params![id, expected, next.as_str(), new_version, now],
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
