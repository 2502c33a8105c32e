use std::collections::HashSet;

use todosync_app::{Dispatched, TaskCommand, TaskService};
use todosync_core::{Task, TaskId};
use todosync_store::KeyValueStore;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, watch};

/// Session state shared between the TUI event loop and rendering.
///
/// Operations run on the tokio runtime; their results come back through a
/// channel so the event loop never blocks on them.
pub(super) struct App<K> {
    service: TaskService<K>,
    runtime: Handle,
    updates: watch::Receiver<Vec<Task>>,
    completions_tx: mpsc::UnboundedSender<(Option<TaskId>, Dispatched)>,
    completions_rx: mpsc::UnboundedReceiver<(Option<TaskId>, Dispatched)>,
    /// Tasks with a complete or delete still running.
    in_flight: HashSet<TaskId>,
    /// Latest committed task collection in store order.
    pub(super) tasks: Vec<Task>,
    pending: usize,
}

impl<K: KeyValueStore + 'static> App<K> {
    pub(super) fn new(service: TaskService<K>, runtime: Handle) -> Self {
        let mut updates = service.subscribe();
        let tasks = updates.borrow_and_update().clone();
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            service,
            runtime,
            updates,
            completions_tx,
            completions_rx,
            in_flight: HashSet::new(),
            tasks,
            pending: 0,
        }
    }

    pub(super) const fn service(&self) -> &TaskService<K> {
        &self.service
    }

    /// Number of dispatched operations without a result yet.
    pub(super) const fn pending(&self) -> usize {
        self.pending
    }

    /// Whether a complete or delete for `id` has not reported back yet.
    #[cfg(test)]
    pub(super) fn is_in_flight(&self, id: TaskId) -> bool {
        self.in_flight.contains(&id)
    }

    /// Start `command` in the background.
    ///
    /// A command addressing a task that already has one running is dropped.
    pub(super) fn dispatch(&mut self, command: TaskCommand) {
        let target = command.target();
        if let Some(id) = target
            && !self.in_flight.insert(id)
        {
            return;
        }
        let service = self.service.clone();
        let tx = self.completions_tx.clone();
        self.pending += 1;
        self.runtime.spawn(async move {
            let dispatched = service.run(command).await;
            let _ = tx.send((target, dispatched));
        });
    }

    /// Collect finished operations and pick up the latest committed tasks.
    pub(super) fn poll(&mut self) -> Vec<Dispatched> {
        let mut finished = Vec::new();
        while let Ok(completion) = self.completions_rx.try_recv() {
            finished.push(self.finish(completion));
        }
        self.sync_tasks();
        finished
    }

    fn finish(&mut self, (target, dispatched): (Option<TaskId>, Dispatched)) -> Dispatched {
        self.pending = self.pending.saturating_sub(1);
        if let Some(id) = target {
            self.in_flight.remove(&id);
        }
        dispatched
    }

    fn sync_tasks(&mut self) {
        if self.updates.has_changed().unwrap_or(false) {
            self.tasks = self.updates.borrow_and_update().clone();
        }
    }

    /// Block until every pending operation reports back.
    ///
    /// Must not be called from inside the runtime.
    pub(super) fn wait_for_pending(&mut self) -> Vec<Dispatched> {
        let mut finished = Vec::new();
        while self.pending > 0 {
            match self.completions_rx.blocking_recv() {
                Some(completion) => finished.push(self.finish(completion)),
                None => break,
            }
        }
        self.sync_tasks();
        finished
    }
}
