//! Notification domain model.
//!
//! # Responsibility
//! - Define locally derived alerts shown in the notification inbox.
//!
//! # Invariants
//! - `id` and `timestamp` are assigned by the notification store only.
//! - `read` transitions from `false` to `true`, never back.
//! - `related_entity_id` is a weak reference; the task may no longer exist.

use crate::model::task::{Priority, TaskId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type NotificationId = Uuid;

/// Notification category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Task,
    Reminder,
    System,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Reminder => "reminder",
            Self::System => "system",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    pub title: String,
    pub message: String,
    /// Serialized as `type` to match the front-end shape.
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    #[serde(default)]
    pub related_entity_id: Option<TaskId>,
    /// Unix epoch milliseconds.
    pub timestamp: i64,
    #[serde(default)]
    pub read: bool,
    pub priority: Priority,
}

/// Creation input; the store fills `id` and `timestamp`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub related_entity_id: Option<TaskId>,
    pub read: bool,
    pub priority: Priority,
}

impl NewNotification {
    pub(crate) fn into_notification(self, timestamp: i64) -> Notification {
        Notification {
            id: Uuid::new_v4(),
            title: self.title,
            message: self.message,
            kind: self.kind,
            related_entity_id: self.related_entity_id,
            timestamp,
            read: self.read,
            priority: self.priority,
        }
    }
}
