#![forbid(unsafe_code)]

use super::*;
use rusqlite::{ErrorCode, params};
use tv_core::validate::FieldError;

const TAG_NAME_MAX_CHARS: usize = 100;
const TAG_COLOR_MAX_CHARS: usize = 50;

impl SqliteStore {
    pub fn create_tag(&mut self, request: TagCreateRequest) -> Result<TagRow, StoreError> {
        let TagCreateRequest { name, color } = request;

        let mut errors = Vec::new();
        let name_chars = name.chars().count();
        if name_chars == 0 {
            errors.push(FieldError::new("name", "Name cannot be blank."));
        } else if name_chars > TAG_NAME_MAX_CHARS {
            errors.push(FieldError::new(
                "name",
                format!("Name must contain at most {TAG_NAME_MAX_CHARS} characters."),
            ));
        }
        if let Some(color) = &color
            && color.chars().count() > TAG_COLOR_MAX_CHARS
        {
            errors.push(FieldError::new(
                "color",
                format!("Color must contain at most {TAG_COLOR_MAX_CHARS} characters."),
            ));
        }
        if !errors.is_empty() {
            return Err(StoreError::Validation(errors));
        }

        let now = now_ts();
        let insert = self.conn.execute(
            "INSERT INTO tag(name, color, created_at, updated_at) VALUES (?1, ?2, ?3, ?3)",
            params![name, color, now],
        );
        if let Err(err) = insert {
            return Err(map_tag_conflict(err));
        }
        let id = self.conn.last_insert_rowid();

        Ok(TagRow {
            id,
            name,
            color,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn list_tags(&self) -> Result<Vec<TagRow>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, color, created_at, updated_at FROM tag ORDER BY name ASC",
        )?;
        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            out.push(TagRow {
                id: row.get(0)?,
                name: row.get(1)?,
                color: row.get(2)?,
                created_at: row.get(3)?,
                updated_at: row.get(4)?,
            });
        }
        Ok(out)
    }

    /// Hard delete; junction rows cascade. Tags carry no version counter.
    pub fn delete_tag(&mut self, id: i64) -> Result<(), StoreError> {
        let affected = self
            .conn
            .execute("DELETE FROM tag WHERE id = ?1", params![id])?;
        if affected == 0 {
            return Err(StoreError::UnknownId);
        }
        Ok(())
    }
}

fn map_tag_conflict(err: rusqlite::Error) -> StoreError {
    if is_constraint_violation(&err) {
        return StoreError::TagNameTaken;
    }
    StoreError::Sql(err)
}

pub(crate) fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(code, message) => {
            code.code == ErrorCode::ConstraintViolation
                || message.as_deref().is_some_and(|value| {
                    value.contains("UNIQUE constraint failed")
                        || value.contains("PRIMARY KEY constraint failed")
                })
        }
        _ => false,
    }
}
