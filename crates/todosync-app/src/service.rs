//! Task operations shared by the CLI and the terminal UI.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use thiserror::Error;
use time::OffsetDateTime;
use todosync_core::{Task, TaskId, TaskStatus};
use todosync_store::KeyValueStore;
use tokio::sync::{Mutex, watch};
use tracing::{debug, error, info};

use crate::config::AppConfig;
use crate::notice::Notice;
use crate::task_store::{PersistError, TaskStore};

/// Kind of mutating operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Complete,
    Delete,
}

impl Operation {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Complete => "complete",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user intent dispatched to [`TaskService::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskCommand {
    Create(String),
    Complete(TaskId),
    Delete(TaskId),
}

impl TaskCommand {
    #[must_use]
    pub const fn operation(&self) -> Operation {
        match self {
            Self::Create(_) => Operation::Create,
            Self::Complete(_) => Operation::Complete,
            Self::Delete(_) => Operation::Delete,
        }
    }

    /// Task addressed by the command; `None` for creates.
    #[must_use]
    pub const fn target(&self) -> Option<TaskId> {
        match self {
            Self::Create(_) => None,
            Self::Complete(id) | Self::Delete(id) => Some(*id),
        }
    }
}

/// Successful result of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationOutcome {
    /// A new task was appended.
    Created(Task),
    /// The task was marked completed.
    Completed(Task),
    /// The task was soft-deleted.
    Deleted(Task),
    /// No task matched the id; nothing was written.
    Unchanged,
}

/// Rejections and failures of an operation. The store is never modified.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("task title must not be empty")]
    EmptyTitle,
    #[error("an active task titled '{0}' already exists")]
    DuplicateTitle(String),
    #[error("another task is already being created")]
    CreateInFlight,
    #[error("task {id} is already {status}")]
    NotActive { id: TaskId, status: TaskStatus },
    #[error("failed to {operation} task: {source}")]
    Persist {
        operation: Operation,
        #[source]
        source: PersistError,
    },
}

/// Result of [`TaskService::run`] bundled with its notification.
#[derive(Debug)]
pub struct Dispatched {
    pub operation: Operation,
    pub result: Result<OperationOutcome, OperationError>,
    pub notice: Option<Notice>,
}

/// Timing knobs for [`TaskService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceOptions {
    /// Wait before each operation takes effect.
    pub simulated_delay: Duration,
    /// How long notifications stay visible.
    pub notice_duration: Duration,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

impl ServiceOptions {
    #[must_use]
    pub const fn from_config(config: &AppConfig) -> Self {
        Self {
            simulated_delay: config.operations.simulated_delay(),
            notice_duration: config.notifications.duration(),
        }
    }
}

/// Service façade owning the task store for one session.
///
/// Cloning is cheap; clones share the same store.
pub struct TaskService<K> {
    store: Arc<Mutex<TaskStore<K>>>,
    updates: watch::Receiver<Vec<Task>>,
    create_in_flight: Arc<AtomicBool>,
    options: ServiceOptions,
}

impl<K> Clone for TaskService<K> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            updates: self.updates.clone(),
            create_in_flight: Arc::clone(&self.create_in_flight),
            options: self.options,
        }
    }
}

impl<K: KeyValueStore> TaskService<K> {
    #[must_use]
    pub fn new(store: TaskStore<K>, options: ServiceOptions) -> Self {
        let updates = store.subscribe();
        Self {
            store: Arc::new(Mutex::new(store)),
            updates,
            create_in_flight: Arc::new(AtomicBool::new(false)),
            options,
        }
    }

    #[must_use]
    pub const fn options(&self) -> &ServiceOptions {
        &self.options
    }

    /// Latest committed collection, without waiting for in-flight operations.
    #[must_use]
    pub fn tasks(&self) -> Vec<Task> {
        self.updates.borrow().clone()
    }

    /// Watch the committed collection.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<Task>> {
        self.updates.clone()
    }

    #[must_use]
    pub fn is_create_in_flight(&self) -> bool {
        self.create_in_flight.load(Ordering::Acquire)
    }

    /// Execute `command` and build its notification.
    pub async fn run(&self, command: TaskCommand) -> Dispatched {
        let operation = command.operation();
        let result = match command {
            TaskCommand::Create(title) => self.create(&title).await,
            TaskCommand::Complete(id) => self.complete(id).await,
            TaskCommand::Delete(id) => self.delete(id).await,
        };
        let notice = Notice::for_result(&result, self.options.notice_duration);
        Dispatched {
            operation,
            result,
            notice,
        }
    }

    /// Append a new active task titled `title`, stored as given.
    ///
    /// # Errors
    /// Rejects blank titles, titles identical to an active task, and creates issued
    /// while another create is pending. Returns [`OperationError::Persist`] if
    /// the snapshot cannot be written.
    pub async fn create(&self, title: &str) -> Result<OperationOutcome, OperationError> {
        if title.trim().is_empty() {
            return Err(OperationError::EmptyTitle);
        }
        let _guard = InFlightGuard::acquire(&self.create_in_flight).ok_or(OperationError::CreateInFlight)?;

        self.simulate_delay().await;

        let mut store = self.store.lock().await;
        if store.find_active_by_title(title).is_some() {
            debug!(%title, "Rejected duplicate title");
            return Err(OperationError::DuplicateTitle(title.to_owned()));
        }

        let task = Task::new(title, OffsetDateTime::now_utc());
        store
            .append(task.clone())
            .map_err(|source| persist_failure(Operation::Create, source))?;
        drop(store);

        info!(task = %task.id, "Created task");
        Ok(OperationOutcome::Created(task))
    }

    /// Mark an active task completed.
    ///
    /// # Errors
    /// Returns [`OperationError::NotActive`] for completed or deleted tasks and
    /// [`OperationError::Persist`] if the snapshot cannot be written.
    pub async fn complete(&self, id: TaskId) -> Result<OperationOutcome, OperationError> {
        self.transition(Operation::Complete, id, Task::mark_completed, OperationOutcome::Completed)
            .await
    }

    /// Soft-delete an active task.
    ///
    /// # Errors
    /// Returns [`OperationError::NotActive`] for completed or deleted tasks and
    /// [`OperationError::Persist`] if the snapshot cannot be written.
    pub async fn delete(&self, id: TaskId) -> Result<OperationOutcome, OperationError> {
        self.transition(Operation::Delete, id, Task::mark_deleted, OperationOutcome::Deleted)
            .await
    }

    async fn transition(
        &self,
        operation: Operation,
        id: TaskId,
        mutate: fn(&mut Task, OffsetDateTime),
        outcome: fn(Task) -> OperationOutcome,
    ) -> Result<OperationOutcome, OperationError> {
        self.simulate_delay().await;

        let mut store = self.store.lock().await;
        let Some(status) = store.get(id).map(Task::status) else {
            debug!(%id, %operation, "Ignoring unknown task");
            return Ok(OperationOutcome::Unchanged);
        };
        if !status.is_active() {
            return Err(OperationError::NotActive { id, status });
        }

        let now = OffsetDateTime::now_utc();
        let updated = store
            .update(id, |task| mutate(task, now))
            .map_err(|source| persist_failure(operation, source))?;
        drop(store);

        Ok(updated.map_or(OperationOutcome::Unchanged, |task| {
            info!(task = %id, %operation, "Updated task");
            outcome(task)
        }))
    }

    async fn simulate_delay(&self) {
        let delay = self.options.simulated_delay;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

fn persist_failure(operation: Operation, source: PersistError) -> OperationError {
    error!(%operation, error = %source, "Task operation failed");
    OperationError::Persist { operation, source }
}

/// Holds the create slot; released on drop.
struct InFlightGuard(Arc<AtomicBool>);

impl InFlightGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(Arc::clone(flag)))
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use todosync_store::MemoryStore;

    fn service() -> TaskService<MemoryStore> {
        let store = TaskStore::open(MemoryStore::new(), "tasks").unwrap_or_else(|err| panic!("open: {err}"));
        TaskService::new(store, ServiceOptions::default())
    }

    #[test]
    fn command_reports_its_operation() {
        assert_eq!(TaskCommand::Create("a".into()).operation(), Operation::Create);
        assert_eq!(TaskCommand::Complete(TaskId::new()).operation(), Operation::Complete);
        assert_eq!(TaskCommand::Delete(TaskId::new()).operation(), Operation::Delete);
    }

    #[test]
    fn guard_is_exclusive_and_released_on_drop() {
        let flag = Arc::new(AtomicBool::new(false));
        let first = InFlightGuard::acquire(&flag);
        assert!(first.is_some());
        assert!(InFlightGuard::acquire(&flag).is_none());
        drop(first);
        assert!(InFlightGuard::acquire(&flag).is_some());
    }

    #[tokio::test]
    async fn blank_titles_are_rejected_before_anything_else() {
        let service = service();
        assert!(matches!(service.create("   ").await, Err(OperationError::EmptyTitle)));
        assert!(!service.is_create_in_flight());
        assert!(service.tasks().is_empty());
    }

    #[tokio::test]
    async fn titles_are_stored_as_entered() {
        let service = service();
        let Ok(OperationOutcome::Created(task)) = service.create("Buy milk ").await else {
            panic!("create should succeed");
        };
        assert_eq!(task.title, "Buy milk ");
        assert!(matches!(
            service.create("Buy milk").await,
            Ok(OperationOutcome::Created(_))
        ));
        assert!(matches!(
            service.create("Buy milk ").await,
            Err(OperationError::DuplicateTitle(_))
        ));
    }

    #[test]
    fn command_target_is_the_addressed_task() {
        let id = TaskId::new();
        assert_eq!(TaskCommand::Complete(id).target(), Some(id));
        assert_eq!(TaskCommand::Delete(id).target(), Some(id));
        assert_eq!(TaskCommand::Create("a".into()).target(), None);
    }

    #[tokio::test]
    async fn complete_and_delete_report_their_outcome() {
        let service = service();
        let Ok(OperationOutcome::Created(first)) = service.create("Write report").await else {
            panic!("create should succeed");
        };
        let Ok(OperationOutcome::Created(second)) = service.create("Clean house").await else {
            panic!("create should succeed");
        };
        assert!(matches!(
            service.complete(first.id).await,
            Ok(OperationOutcome::Completed(task)) if task.completed
        ));
        assert!(matches!(
            service.delete(second.id).await,
            Ok(OperationOutcome::Deleted(task)) if task.deleted_at.is_some()
        ));
    }

    #[tokio::test]
    async fn run_attaches_notice() {
        let service = service();
        let dispatched = service.run(TaskCommand::Create("Buy milk".into())).await;
        assert_eq!(dispatched.operation, Operation::Create);
        assert!(dispatched.result.is_ok());
        assert!(dispatched.notice.is_some_and(|notice| !notice.is_error()));

        let dispatched = service.run(TaskCommand::Complete(TaskId::new())).await;
        assert!(matches!(dispatched.result, Ok(OperationOutcome::Unchanged)));
        assert!(dispatched.notice.is_none());
    }
}
