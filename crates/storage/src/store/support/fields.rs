#![forbid(unsafe_code)]

use tv_core::model::{DueDate, Priority, TaskStatus};
use tv_core::validate::FieldError;

pub(crate) fn parse_status_field(
    raw: Option<&str>,
    fallback: TaskStatus,
    errors: &mut Vec<FieldError>,
) -> TaskStatus {
    let Some(raw) = raw else {
        return fallback;
    };
    match TaskStatus::parse(raw) {
        Some(status) => status,
        None => {
            errors.push(FieldError::new(
                "status",
                "Status must be one of: pending, in_progress, completed.",
            ));
            fallback
        }
    }
}

pub(crate) fn parse_priority_field(
    raw: Option<&str>,
    fallback: Priority,
    errors: &mut Vec<FieldError>,
) -> Priority {
    let Some(raw) = raw else {
        return fallback;
    };
    match Priority::parse(raw) {
        Some(priority) => priority,
        None => {
            errors.push(FieldError::new(
                "priority",
                "Priority must be one of: low, medium, high.",
            ));
            fallback
        }
    }
}

pub(crate) fn parse_due_date_field(raw: &str, errors: &mut Vec<FieldError>) -> Option<DueDate> {
    match DueDate::try_new(raw) {
        Ok(due) => Some(due),
        Err(_) => {
            errors.push(FieldError::new(
                "due_date",
                "Due date must be a valid date in YYYY-MM-DD format.",
            ));
            None
        }
    }
}

/// Accepts any well-formed JSON document and normalizes it to compact text.
pub(crate) fn canonical_metadata(raw: &str, errors: &mut Vec<FieldError>) -> Option<String> {
    let parsed = match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(value) => value,
        Err(_) => {
            errors.push(FieldError::new(
                "metadata",
                "Metadata must be a well-formed JSON document.",
            ));
            return None;
        }
    };
    match serde_json::to_string(&parsed) {
        Ok(canonical) => Some(canonical),
        Err(_) => {
            errors.push(FieldError::new(
                "metadata",
                "Metadata could not be re-encoded as JSON.",
            ));
            None
        }
    }
}
