//! Notification store and task-derived alert rules.
//!
//! # Responsibility
//! - Own the in-memory notification inbox (newest first).
//! - Derive task alerts whenever the task store reports a task change.
//!
//! # Invariants
//! - New notifications are prepended; the inbox is never persisted.
//! - Read-marking only ever sets `read = true`.
//! - Derivation checks current task state, not the transition, and never
//!   de-duplicates.

use crate::clock::{Clock, MILLIS_PER_DAY};
use crate::model::notification::{NewNotification, Notification, NotificationId, NotificationKind};
use crate::model::task::{Priority, Task};
use log::debug;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

const PENDING_TITLE: &str = "Tarea Pendiente";
const DUE_SOON_TITLE: &str = "Fecha Límite Próxima";

/// In-memory notification inbox.
pub struct NotificationStore {
    notifications: Vec<Notification>,
    clock: Arc<dyn Clock>,
}

impl NotificationStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            notifications: Vec::new(),
            clock,
        }
    }

    /// Snapshot in display order (newest first).
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn get_notification(&self, id: NotificationId) -> Option<&Notification> {
        self.notifications.iter().find(|item| item.id == id)
    }

    /// Creates a notification with a fresh id and timestamp at the front.
    pub fn add_notification(&mut self, data: NewNotification) -> NotificationId {
        let notification = data.into_notification(self.clock.now_epoch_ms());
        let id = notification.id;
        debug!(
            "event=notification_add module=notification_store status=ok notification_id={id} type={} priority={}",
            notification.kind.as_str(),
            notification.priority.as_str()
        );
        self.notifications.insert(0, notification);
        id
    }

    /// Returns whether a notification with `id` exists.
    pub fn mark_notification_as_read(&mut self, id: NotificationId) -> bool {
        match self.notifications.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.read = true;
                true
            }
            None => false,
        }
    }

    pub fn mark_all_notifications_as_read(&mut self) {
        for item in &mut self.notifications {
            item.read = true;
        }
    }

    /// Returns whether anything was removed.
    pub fn delete_notification(&mut self, id: NotificationId) -> bool {
        let before = self.notifications.len();
        self.notifications.retain(|item| item.id != id);
        self.notifications.len() != before
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|item| !item.read).count()
    }

    /// Emits zero, one or two task alerts for the task's current state.
    ///
    /// - Incomplete task: one pending alert mirroring the task priority.
    /// - Due date within one day from now (overdue included): one high
    ///   priority due-soon alert.
    ///
    /// Returns ids in emission order.
    pub fn generate_task_notification(&mut self, task: &Task) -> Vec<NotificationId> {
        let mut emitted = Vec::with_capacity(2);

        if !task.completed {
            emitted.push(self.add_notification(NewNotification {
                title: PENDING_TITLE.to_string(),
                message: format!("Recuerda completar la tarea: {}", task.title),
                kind: NotificationKind::Task,
                related_entity_id: Some(task.id),
                read: false,
                priority: task.priority,
            }));
        }

        if let Some(due) = task.due_date {
            if is_due_soon(due, self.clock.now_epoch_ms()) {
                emitted.push(self.add_notification(NewNotification {
                    title: DUE_SOON_TITLE.to_string(),
                    message: format!(
                        "La tarea \"{}\" está cerca de su fecha límite",
                        task.title
                    ),
                    kind: NotificationKind::Task,
                    related_entity_id: Some(task.id),
                    read: false,
                    priority: Priority::High,
                }));
            }
        }

        debug!(
            "event=notification_derive module=notification_store status=ok task_id={} emitted={}",
            task.id,
            emitted.len()
        );
        emitted
    }
}

/// True when `due` is at most one day after `now`, including any past date.
fn is_due_soon(due_epoch_ms: i64, now_epoch_ms: i64) -> bool {
    due_epoch_ms.saturating_sub(now_epoch_ms) <= MILLIS_PER_DAY
}

/// Receiver of task changes that may derive notifications.
pub trait TaskNotifier: Send + Sync {
    fn task_changed(&self, task: &Task) -> Vec<NotificationId>;
}

/// Cloneable shared handle to one `NotificationStore`.
///
/// The task store holds one clone for derivation; readers hold another.
#[derive(Clone)]
pub struct NotificationHub {
    inner: Arc<Mutex<NotificationStore>>,
}

impl NotificationHub {
    pub fn new(store: NotificationStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Locks the underlying store.
    ///
    /// Store mutations cannot leave the list half-updated, so a poisoned
    /// lock is recovered instead of propagated.
    pub fn lock(&self) -> MutexGuard<'_, NotificationStore> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TaskNotifier for NotificationHub {
    fn task_changed(&self, task: &Task) -> Vec<NotificationId> {
        self.lock().generate_task_notification(task)
    }
}

#[cfg(test)]
mod tests {
    use super::is_due_soon;
    use crate::clock::MILLIS_PER_DAY;

    #[test]
    fn due_soon_window_includes_boundary_and_past() {
        let now = 1_700_000_000_000;
        assert!(is_due_soon(now + MILLIS_PER_DAY, now));
        assert!(!is_due_soon(now + MILLIS_PER_DAY + 1, now));
        assert!(is_due_soon(now - 365 * MILLIS_PER_DAY, now));
        assert!(is_due_soon(i64::MIN, now));
    }
}
