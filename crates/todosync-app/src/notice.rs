//! Transient user-facing notifications raised by task operations.

use std::time::{Duration, Instant};

use crate::service::{OperationError, OperationOutcome};

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A message shown to the user for a fixed time.
#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub level: NoticeLevel,
    pub duration: Duration,
    created_at: Instant,
}

impl Notice {
    #[must_use]
    pub fn success(text: impl Into<String>, duration: Duration) -> Self {
        Self::new(text, NoticeLevel::Success, duration)
    }

    #[must_use]
    pub fn error(text: impl Into<String>, duration: Duration) -> Self {
        Self::new(text, NoticeLevel::Error, duration)
    }

    fn new(text: impl Into<String>, level: NoticeLevel, duration: Duration) -> Self {
        Self {
            text: text.into(),
            level,
            duration,
            created_at: Instant::now(),
        }
    }

    /// Notification for an operation result; `None` when nothing changed.
    #[must_use]
    pub fn for_result(
        result: &Result<OperationOutcome, OperationError>,
        duration: Duration,
    ) -> Option<Self> {
        match result {
            Ok(OperationOutcome::Created(_)) => Some(Self::success("Task created successfully", duration)),
            Ok(OperationOutcome::Completed(_)) => {
                Some(Self::success("Task completed successfully", duration))
            }
            Ok(OperationOutcome::Deleted(_)) => Some(Self::success("Task deleted successfully", duration)),
            Ok(OperationOutcome::Unchanged) => None,
            Err(err) => Some(Self::error(error_text(err), duration)),
        }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.level, NoticeLevel::Error)
    }

    /// Whether the display time has elapsed.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.duration
    }
}

fn error_text(err: &OperationError) -> String {
    match err {
        OperationError::EmptyTitle => "Enter a title for the task".to_owned(),
        OperationError::DuplicateTitle(_) => "A task with this description already exists".to_owned(),
        OperationError::CreateInFlight => "A task is already being created, please wait".to_owned(),
        OperationError::NotActive { status, .. } => format!("This task is already {status}"),
        OperationError::Persist { operation, source } => {
            format!("Failed to {operation} your task! | {source}")
        }
    }
}
