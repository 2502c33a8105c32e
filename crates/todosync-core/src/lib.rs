//! Domain types, snapshot codec and derived views for todosync.

/// Identifier types.
pub mod id;
/// Snapshot encoding for the persistence slot.
pub mod snapshot;
/// Task lifecycle states.
pub mod state;
/// The task record and its schema.
pub mod task;
/// Title search.
pub mod text_matcher;
pub mod views;

pub use id::TaskId;
pub use snapshot::SnapshotError;
pub use state::TaskStatus;
pub use task::{SchemaError, Task};
pub use text_matcher::TextMatcher;
pub use views::{TaskCounts, TaskViews};
