#![forbid(unsafe_code)]

pub mod model {
    use time::Date;
    use time::format_description::BorrowedFormatItem;
    use time::macros::format_description;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum TaskStatus {
        Pending,
        InProgress,
        Completed,
    }

    impl TaskStatus {
        pub fn as_str(self) -> &'static str {
            match self {
                TaskStatus::Pending => "pending",
                TaskStatus::InProgress => "in_progress",
                TaskStatus::Completed => "completed",
            }
        }

        pub fn parse(value: &str) -> Option<Self> {
            match value {
                "pending" => Some(TaskStatus::Pending),
                "in_progress" => Some(TaskStatus::InProgress),
                "completed" => Some(TaskStatus::Completed),
                _ => None,
            }
        }

        /// Advances one step in the toggle cycle:
        /// pending -> in_progress -> completed -> pending.
        pub fn next(self) -> Self {
            match self {
                TaskStatus::Pending => TaskStatus::InProgress,
                TaskStatus::InProgress => TaskStatus::Completed,
                TaskStatus::Completed => TaskStatus::Pending,
            }
        }
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum Priority {
        Low,
        Medium,
        High,
    }

    impl Priority {
        pub fn as_str(self) -> &'static str {
            match self {
                Priority::Low => "low",
                Priority::Medium => "medium",
                Priority::High => "high",
            }
        }

        pub fn parse(value: &str) -> Option<Self> {
            match value {
                "low" => Some(Priority::Low),
                "medium" => Some(Priority::Medium),
                "high" => Some(Priority::High),
                _ => None,
            }
        }
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum OperationKind {
        Create,
        Update,
        Delete,
        Restore,
    }

    impl OperationKind {
        pub fn as_str(self) -> &'static str {
            match self {
                OperationKind::Create => "create",
                OperationKind::Update => "update",
                OperationKind::Delete => "delete",
                OperationKind::Restore => "restore",
            }
        }

        pub fn parse(value: &str) -> Option<Self> {
            match value {
                "create" => Some(OperationKind::Create),
                "update" => Some(OperationKind::Update),
                "delete" => Some(OperationKind::Delete),
                "restore" => Some(OperationKind::Restore),
                _ => None,
            }
        }
    }

    const DUE_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
        format_description!("[year]-[month]-[day]");

    /// Calendar date in `YYYY-MM-DD` form.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct DueDate {
        raw: String,
        date: Date,
    }

    impl DueDate {
        pub fn try_new(value: impl Into<String>) -> Result<Self, DueDateError> {
            let raw = value.into();
            let date = Date::parse(&raw, DUE_DATE_FORMAT).map_err(|_| DueDateError::Invalid)?;
            Ok(Self { raw, date })
        }

        pub fn as_str(&self) -> &str {
            &self.raw
        }

        pub fn date(&self) -> Date {
            self.date
        }
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum DueDateError {
        Invalid,
    }

    /// Today's UTC calendar date, for the past-due-date rule.
    pub fn today_utc() -> Date {
        time::OffsetDateTime::now_utc().date()
    }
}

pub mod validate {
    use super::model::{DueDate, TaskStatus};
    use time::Date;

    pub const TITLE_MIN_CHARS: usize = 5;
    pub const TITLE_MAX_CHARS: usize = 255;

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct FieldError {
        pub field: &'static str,
        pub message: String,
    }

    impl FieldError {
        pub fn new(field: &'static str, message: impl Into<String>) -> Self {
            Self {
                field,
                message: message.into(),
            }
        }
    }

    pub fn title(value: &str) -> Option<FieldError> {
        let chars = value.chars().count();
        if chars == 0 {
            return Some(FieldError::new("title", "Title cannot be blank."));
        }
        if chars < TITLE_MIN_CHARS || chars > TITLE_MAX_CHARS {
            return Some(FieldError::new(
                "title",
                format!("Title must contain {TITLE_MIN_CHARS} to {TITLE_MAX_CHARS} characters."),
            ));
        }
        None
    }

    /// A due date may not lie in the past while the task is still open.
    pub fn due_date(due: &DueDate, status: TaskStatus, today: Date) -> Option<FieldError> {
        if matches!(status, TaskStatus::Pending | TaskStatus::InProgress) && due.date() < today {
            return Some(FieldError::new(
                "due_date",
                "Due date cannot be in the past for pending or in-progress tasks.",
            ));
        }
        None
    }
}
