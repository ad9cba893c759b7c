#![forbid(unsafe_code)]

use super::super::*;

impl SqliteStore {
    /// Default visibility: soft-deleted rows are invisible.
    pub fn get_task(&self, id: i64) -> Result<Option<TaskRow>, StoreError> {
        read_task(&self.conn, id, false)
    }

    pub fn get_task_with_deleted(&self, id: i64) -> Result<Option<TaskRow>, StoreError> {
        read_task(&self.conn, id, true)
    }
}
