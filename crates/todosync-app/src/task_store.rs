//! Authoritative in-memory task collection mirrored to a persistence slot.

use thiserror::Error;
use todosync_core::snapshot::{self, SnapshotError};
use todosync_core::{SchemaError, Task, TaskCounts, TaskId, TaskViews};
use todosync_store::{KeyValueStore, StoreError, validate_key};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Failure to mirror a mutation into the slot.
#[derive(Debug, Error)]
pub enum PersistError {
    /// The mutated record violates the task schema.
    #[error("task record rejected: {0}")]
    Schema(#[from] SchemaError),
    /// The snapshot could not be encoded.
    #[error(transparent)]
    Encode(#[from] SnapshotError),
    /// The slot write failed.
    #[error("failed to write task snapshot: {0}")]
    Write(#[from] StoreError),
}

/// Slot that receives a snapshot rejected while loading `key`.
#[must_use]
pub fn rejected_key(key: &str) -> String {
    format!("{key}.rejected")
}

/// Ordered task records for the current session.
///
/// Every mutation writes the full post-mutation snapshot to the slot before it
/// is applied in memory, so a failed write leaves the collection untouched.
pub struct TaskStore<K> {
    slot: K,
    key: String,
    tasks: Vec<Task>,
    published: watch::Sender<Vec<Task>>,
}

impl<K: KeyValueStore> TaskStore<K> {
    /// Load the collection stored under `key`.
    ///
    /// A missing snapshot starts an empty collection. An unparseable or
    /// schema-invalid one is copied to [`rejected_key`] and also starts empty.
    ///
    /// # Errors
    /// Returns a [`StoreError`] if the key is invalid, the slot cannot be read,
    /// or a rejected snapshot cannot be set aside.
    pub fn open(slot: K, key: impl Into<String>) -> Result<Self, StoreError> {
        let key = key.into();
        validate_key(&key)?;
        let tasks = match slot.get(&key)? {
            None => {
                debug!(%key, "No task snapshot found");
                Vec::new()
            }
            Some(raw) => match snapshot::decode(&raw) {
                Ok(tasks) => {
                    debug!(%key, count = tasks.len(), "Loaded task snapshot");
                    tasks
                }
                Err(err) => {
                    let backup = rejected_key(&key);
                    slot.set(&backup, &raw)?;
                    warn!(%key, %backup, error = %err, "Set aside unreadable task snapshot");
                    Vec::new()
                }
            },
        };
        let (published, _) = watch::channel(tasks.clone());
        Ok(Self {
            slot,
            key,
            tasks,
            published,
        })
    }

    /// Slot name this store mirrors to.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Borrow the backing slot.
    #[must_use]
    pub const fn slot(&self) -> &K {
        &self.slot
    }

    /// Records in creation order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Active task whose title equals `title` exactly.
    #[must_use]
    pub fn find_active_by_title(&self, title: &str) -> Option<&Task> {
        self.tasks
            .iter()
            .find(|task| task.is_active() && task.title == title)
    }

    /// Derived lists and counts for `search`.
    #[must_use]
    pub fn views(&self, search: &str) -> TaskViews<'_> {
        TaskViews::derive(&self.tasks, search)
    }

    #[must_use]
    pub fn counts(&self) -> TaskCounts {
        TaskCounts::from_tasks(&self.tasks)
    }

    /// Receive the committed collection after every successful mutation.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<Task>> {
        self.published.subscribe()
    }

    /// Append a new record.
    ///
    /// # Errors
    /// Returns [`PersistError`] if the record is invalid or the slot write fails.
    pub fn append(&mut self, task: Task) -> Result<(), PersistError> {
        task.validate()?;
        let mut next = self.tasks.clone();
        next.push(task);
        self.commit(next)
    }

    /// Apply `mutate` to the record with `id`.
    ///
    /// Returns the updated record, or `None` without writing when no record
    /// has that id.
    ///
    /// # Errors
    /// Returns [`PersistError`] if the result is invalid or the slot write fails.
    pub fn update<F>(&mut self, id: TaskId, mutate: F) -> Result<Option<Task>, PersistError>
    where
        F: FnOnce(&mut Task),
    {
        let Some(index) = self.tasks.iter().position(|task| task.id == id) else {
            return Ok(None);
        };
        let mut next = self.tasks.clone();
        let task = &mut next[index];
        mutate(task);
        task.validate()?;
        let updated = task.clone();
        self.commit(next)?;
        Ok(Some(updated))
    }

    fn commit(&mut self, next: Vec<Task>) -> Result<(), PersistError> {
        let raw = snapshot::encode(&next)?;
        self.slot.set(&self.key, &raw)?;
        info!(key = %self.key, count = next.len(), "Persisted task snapshot");
        self.tasks = next;
        self.published.send_replace(self.tasks.clone());
        Ok(())
    }
}
