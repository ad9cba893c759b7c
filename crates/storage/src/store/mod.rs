#![forbid(unsafe_code)]

mod audit;
mod error;
mod requests;
mod support;
mod tags;
mod tasks;
mod types;
mod users;

pub use error::StoreError;
pub use requests::*;
pub use types::*;

pub(crate) use audit::*;
pub(crate) use support::*;
pub(crate) use tags::is_constraint_violation;

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
    storage_dir: PathBuf,
}

impl SqliteStore {
    pub fn open(storage_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let storage_dir = storage_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&storage_dir)?;

        let db_path = storage_dir.join("taskvault.db");
        let conn = Connection::open(db_path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        install_schema(&conn)?;

        Ok(Self { conn, storage_dir })
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }
}

fn install_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        r#"
        PRAGMA journal_mode=WAL;
        PRAGMA synchronous=NORMAL;

        CREATE TABLE IF NOT EXISTS user (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          username TEXT NOT NULL UNIQUE,
          role TEXT NOT NULL,
          created_at INTEGER NOT NULL,
          updated_at INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS task (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          title TEXT NOT NULL,
          description TEXT,
          status TEXT NOT NULL DEFAULT 'pending',
          priority TEXT NOT NULL DEFAULT 'medium',
          due_date TEXT,
          assigned_to INTEGER,
          version INTEGER NOT NULL DEFAULT 0,
          metadata TEXT,
          created_at INTEGER NOT NULL,
          updated_at INTEGER NOT NULL,
          deleted_at INTEGER,
          FOREIGN KEY(assigned_to) REFERENCES user(id) ON DELETE SET NULL
        );

        CREATE INDEX IF NOT EXISTS idx_task_status ON task(status);
        CREATE INDEX IF NOT EXISTS idx_task_priority ON task(priority);
        CREATE INDEX IF NOT EXISTS idx_task_due_date ON task(due_date);
        CREATE INDEX IF NOT EXISTS idx_task_assigned_to ON task(assigned_to);
        CREATE INDEX IF NOT EXISTS idx_task_deleted_at ON task(deleted_at);
        CREATE INDEX IF NOT EXISTS idx_task_created_at ON task(created_at);

        CREATE TABLE IF NOT EXISTS tag (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          name TEXT NOT NULL UNIQUE,
          color TEXT,
          created_at INTEGER NOT NULL,
          updated_at INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS task_tag (
          task_id INTEGER NOT NULL,
          tag_id INTEGER NOT NULL,
          created_at INTEGER NOT NULL,
          PRIMARY KEY(task_id, tag_id),
          FOREIGN KEY(task_id) REFERENCES task(id) ON DELETE CASCADE,
          FOREIGN KEY(tag_id) REFERENCES tag(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_task_tag_tag_id ON task_tag(tag_id);

        CREATE TABLE IF NOT EXISTS task_log (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          task_id INTEGER NOT NULL,
          user_id INTEGER,
          operation_type TEXT NOT NULL,
          changes TEXT,
          created_at INTEGER NOT NULL,
          FOREIGN KEY(task_id) REFERENCES task(id) ON DELETE CASCADE,
          FOREIGN KEY(user_id) REFERENCES user(id) ON DELETE SET NULL
        );

        CREATE INDEX IF NOT EXISTS idx_task_log_task_id ON task_log(task_id);
        CREATE INDEX IF NOT EXISTS idx_task_log_created_at ON task_log(created_at);
        "#,
    )?;

    Ok(())
}
