#![forbid(unsafe_code)]

use tv_core::validate::FieldError;

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Sql(rusqlite::Error),
    InvalidInput(&'static str),
    Validation(Vec<FieldError>),
    VersionConflict { expected: i64, actual: i64 },
    IllegalTransition(&'static str),
    UnknownId,
    TagNameTaken,
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io: {err}"),
            Self::Sql(err) => write!(f, "sqlite: {err}"),
            Self::InvalidInput(message) => write!(f, "invalid input: {message}"),
            Self::Validation(errors) => {
                write!(f, "validation failed:")?;
                for error in errors {
                    write!(f, " {}: {}", error.field, error.message)?;
                }
                Ok(())
            }
            Self::VersionConflict { expected, actual } => {
                write!(f, "version conflict (expected={expected}, actual={actual})")
            }
            Self::IllegalTransition(message) => write!(f, "illegal transition: {message}"),
            Self::UnknownId => write!(f, "unknown id"),
            Self::TagNameTaken => write!(f, "tag name already taken"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sql(value)
    }
}
