#![forbid(unsafe_code)]

use super::*;
use rusqlite::{OptionalExtension, params};
use tv_core::validate::FieldError;

impl SqliteStore {
    /// Minimal identity row for actors and assignees. Authentication happens
    /// elsewhere; the store only consumes already-resolved ids.
    pub fn create_user(&mut self, request: UserCreateRequest) -> Result<UserRow, StoreError> {
        let UserCreateRequest { username, role } = request;

        let mut errors = Vec::new();
        if username.is_empty() {
            errors.push(FieldError::new("username", "Username cannot be blank."));
        }
        if role.is_empty() {
            errors.push(FieldError::new("role", "Role cannot be blank."));
        }
        if !errors.is_empty() {
            return Err(StoreError::Validation(errors));
        }

        let now = now_ts();
        let insert = self.conn.execute(
            "INSERT INTO user(username, role, created_at, updated_at) VALUES (?1, ?2, ?3, ?3)",
            params![username, role, now],
        );
        if let Err(err) = insert {
            if is_constraint_violation(&err) {
                return Err(StoreError::InvalidInput("username already taken"));
            }
            return Err(StoreError::Sql(err));
        }
        let id = self.conn.last_insert_rowid();

        Ok(UserRow {
            id,
            username,
            role,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn get_user(&self, id: i64) -> Result<Option<UserRow>, StoreError> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, username, role, created_at, updated_at FROM user WHERE id = ?1",
                params![id],
                |row| {
                    Ok(UserRow {
                        id: row.get(0)?,
                        username: row.get(1)?,
                        role: row.get(2)?,
                        created_at: row.get(3)?,
                        updated_at: row.get(4)?,
                    })
                },
            )
            .optional()?)
    }
}
