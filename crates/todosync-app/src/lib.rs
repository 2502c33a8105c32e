//! Application layer logic for todosync.
//!
//! This crate owns the session task store, the task operations and the
//! configuration shared by the CLI and the terminal UI.

pub mod config;
pub mod notice;
pub mod service;
pub mod task_store;

// Re-exports for convenience
pub use config::{AppConfig, NotificationConfig, OperationsConfig, StorageConfig, UiConfig};
pub use notice::{Notice, NoticeLevel};
pub use service::{
    Dispatched, Operation, OperationError, OperationOutcome, ServiceOptions, TaskCommand, TaskService,
};
pub use task_store::{PersistError, TaskStore, rejected_key};
