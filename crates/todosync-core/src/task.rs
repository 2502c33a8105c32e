use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;

use crate::id::TaskId;
use crate::state::TaskStatus;

/// A single to-do item as held in memory and persisted in the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier assigned at creation.
    pub id: TaskId,
    /// Title entered by the user.
    pub title: String,
    /// Creation timestamp in UTC.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Completion timestamp, set together with `completed`.
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub completed_at: Option<OffsetDateTime>,
    /// Soft-delete marker.
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub deleted_at: Option<OffsetDateTime>,
    /// Completion flag.
    pub completed: bool,
}

/// Violations of the task record schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Title is empty or whitespace only.
    #[error("task {0} has an empty title")]
    EmptyTitle(TaskId),
    /// `completed` and `completedAt` disagree.
    #[error("task {0} has inconsistent completion fields")]
    CompletionMismatch(TaskId),
    /// Task is marked both completed and deleted.
    #[error("task {0} is both completed and deleted")]
    CompletedAndDeleted(TaskId),
    /// A lifecycle timestamp precedes the creation timestamp.
    #[error("task {0} has a {1} timestamp earlier than its creation")]
    TimestampBeforeCreation(TaskId, &'static str),
}

impl Task {
    /// Build a fresh active task stamped with `now`.
    #[must_use]
    pub fn new(title: impl Into<String>, now: OffsetDateTime) -> Self {
        Self {
            id: TaskId::new(),
            title: title.into(),
            created_at: now,
            completed_at: None,
            deleted_at: None,
            completed: false,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        if self.deleted_at.is_some() {
            TaskStatus::Deleted
        } else if self.completed {
            TaskStatus::Completed
        } else {
            TaskStatus::Active
        }
    }

    /// Shorthand for `status() == Active`.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.status().is_active()
    }

    /// Mark the task completed at `now`, never earlier than its creation.
    pub fn mark_completed(&mut self, now: OffsetDateTime) {
        self.completed = true;
        self.completed_at = Some(self.not_before_creation(now));
    }

    /// Soft-delete the task at `now`, never earlier than its creation.
    pub fn mark_deleted(&mut self, now: OffsetDateTime) {
        self.deleted_at = Some(self.not_before_creation(now));
    }

    // Wall clocks can step backwards between creation and a later transition.
    fn not_before_creation(&self, now: OffsetDateTime) -> OffsetDateTime {
        now.max(self.created_at)
    }

    /// Check the record against the task schema.
    ///
    /// # Errors
    /// Returns the first [`SchemaError`] found.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.title.trim().is_empty() {
            return Err(SchemaError::EmptyTitle(self.id));
        }
        if self.completed != self.completed_at.is_some() {
            return Err(SchemaError::CompletionMismatch(self.id));
        }
        if self.completed && self.deleted_at.is_some() {
            return Err(SchemaError::CompletedAndDeleted(self.id));
        }
        if self.completed_at.is_some_and(|ts| ts < self.created_at) {
            return Err(SchemaError::TimestampBeforeCreation(self.id, "completion"));
        }
        if self.deleted_at.is_some_and(|ts| ts < self.created_at) {
            return Err(SchemaError::TimestampBeforeCreation(self.id, "deletion"));
        }
        Ok(())
    }
}
