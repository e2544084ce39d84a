//! Task store.
//!
//! # Responsibility
//! - Own the ordered task list (insertion order, newest last).
//! - Persist the whole list under `TASKS_KEY` after every mutation; an
//!   empty patch is not a mutation.
//! - Report created and toggled tasks to the injected `TaskNotifier`.
//!
//! # Invariants
//! - Task ids are unique within the live list.
//! - Unknown ids are silent no-ops for update/delete/toggle.
//! - Persistence runs after the in-memory change and never rolls it back.

use crate::clock::Clock;
use crate::model::task::{NewTask, Task, TaskId, TaskPatch};
use crate::repo::blob_repo::{BlobRepository, TASKS_KEY};
use crate::service::notification_service::TaskNotifier;
use crate::service::persist::{load_snapshot, save_snapshot, LoadOutcome, Mutation, PersistOutcome};
use log::{debug, info};
use std::sync::Arc;

const MODULE: &str = "task_store";

/// Aggregate counts for the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskSummary {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

/// Task store over a blob repository and a notification sink.
pub struct TaskStore<R: BlobRepository, N: TaskNotifier> {
    tasks: Vec<Task>,
    repo: R,
    notifier: N,
    clock: Arc<dyn Clock>,
}

impl<R: BlobRepository, N: TaskNotifier> TaskStore<R, N> {
    /// Creates an empty store. Call `load` to restore persisted tasks.
    pub fn new(repo: R, notifier: N, clock: Arc<dyn Clock>) -> Self {
        Self {
            tasks: Vec::new(),
            repo,
            notifier,
            clock,
        }
    }

    /// Replaces the in-memory list with the persisted one, best effort.
    ///
    /// Missing or unreadable blobs leave the current list untouched.
    pub fn load(&mut self) -> LoadOutcome {
        let (loaded, outcome) = load_snapshot::<Vec<Task>>(&self.repo, TASKS_KEY, MODULE);
        if let Some(tasks) = loaded {
            info!(
                "event=task_load module={MODULE} status=ok count={}",
                tasks.len()
            );
            self.tasks = tasks;
        }
        outcome
    }

    /// Snapshot in display order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get_task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn summary(&self) -> TaskSummary {
        let completed = self.tasks.iter().filter(|task| task.completed).count();
        TaskSummary {
            total: self.tasks.len(),
            completed,
            pending: self.tasks.len() - completed,
        }
    }

    /// Appends a new task, derives its notifications, then persists.
    pub fn add_task(&mut self, input: NewTask) -> Mutation<Task> {
        let task = Task::from_new(input, self.clock.now_epoch_ms());
        self.tasks.push(task.clone());
        let emitted = self.notifier.task_changed(&task);
        info!(
            "event=task_add module={MODULE} status=ok task_id={} priority={} has_due_date={} notifications={}",
            task.id,
            task.priority.as_str(),
            task.due_date.is_some(),
            emitted.len()
        );
        Mutation::new(task, self.persist())
    }

    /// Merges `patch` into the task with `id`.
    ///
    /// Returns the updated task, or `None` when the id is unknown. An empty
    /// patch changes nothing and skips the write.
    pub fn update_task(&mut self, id: TaskId, patch: &TaskPatch) -> Mutation<Option<Task>> {
        if patch.is_empty() {
            let current = self.get_task(id).cloned();
            debug!(
                "event=task_update module={MODULE} status=skipped task_id={id} found={} reason=empty_patch",
                current.is_some()
            );
            return Mutation::new(current, PersistOutcome::Skipped);
        }
        let updated = self.tasks.iter_mut().find(|task| task.id == id).map(|task| {
            task.apply_patch(patch);
            task.clone()
        });
        self.log_lookup("task_update", id, updated.is_some());
        Mutation::new(updated, self.persist())
    }

    /// Removes the task with `id`. Related notifications are kept.
    pub fn delete_task(&mut self, id: TaskId) -> Mutation<bool> {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        let removed = self.tasks.len() != before;
        self.log_lookup("task_delete", id, removed);
        Mutation::new(removed, self.persist())
    }

    /// Flips `completed` and re-runs notification derivation on the result.
    ///
    /// Derivation sees only the new state, so un-completing a task emits a
    /// fresh pending alert just like creating it did.
    pub fn toggle_task_completion(&mut self, id: TaskId) -> Mutation<Option<Task>> {
        let toggled = self.tasks.iter_mut().find(|task| task.id == id).map(|task| {
            task.completed = !task.completed;
            task.clone()
        });
        if let Some(task) = &toggled {
            let emitted = self.notifier.task_changed(task);
            info!(
                "event=task_toggle module={MODULE} status=ok task_id={id} completed={} notifications={}",
                task.completed,
                emitted.len()
            );
        } else {
            self.log_lookup("task_toggle", id, false);
        }
        Mutation::new(toggled, self.persist())
    }

    fn persist(&self) -> PersistOutcome {
        save_snapshot(&self.repo, TASKS_KEY, MODULE, &self.tasks)
    }

    fn log_lookup(&self, event: &str, id: TaskId, found: bool) {
        if found {
            info!("event={event} module={MODULE} status=ok task_id={id}");
        } else {
            debug!("event={event} module={MODULE} status=noop task_id={id} reason=not_found");
        }
    }
}
