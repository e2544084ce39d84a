//! Task domain model.
//!
//! # Responsibility
//! - Define the user-managed to-do record persisted under the `tasks` blob key.
//! - Provide creation input and partial-merge patch shapes.
//!
//! # Invariants
//! - `id` is generated once at creation and never reused.
//! - `created_at` is set at creation and never changed by a patch.
//! - Title emptiness is a caller concern; the model does not validate it.

use super::wire_time;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a task in the live list.
pub type TaskId = Uuid;

/// Shared priority scale for tasks and notifications.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Lowercase wire label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Parses a wire label; unknown labels yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// Canonical task record.
///
/// Serialized with camelCase field names so blobs keep the shape the mobile
/// front-end has always written (`dueDate`, `createdAt`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub priority: Priority,
    /// Unix epoch milliseconds. ISO strings are accepted on read.
    #[serde(default, deserialize_with = "wire_time::optional_epoch_ms")]
    pub due_date: Option<i64>,
    /// Unix epoch milliseconds. ISO strings are accepted on read.
    #[serde(deserialize_with = "wire_time::epoch_ms")]
    pub created_at: i64,
}

impl Task {
    /// Builds a task from creation input with a fresh ID.
    pub fn from_new(input: NewTask, created_at: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description.unwrap_or_default(),
            completed: input.completed,
            priority: input.priority.unwrap_or_default(),
            due_date: input.due_date,
            created_at,
        }
    }

    /// Merges every present field of `patch` into this task.
    ///
    /// `id` and `created_at` are not patchable.
    pub fn apply_patch(&mut self, patch: &TaskPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
    }
}

/// Creation input for `TaskStore::add_task`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub priority: Option<Priority>,
    pub due_date: Option<i64>,
}

impl NewTask {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_due_date(mut self, due_epoch_ms: i64) -> Self {
        self.due_date = Some(due_epoch_ms);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Partial update for `TaskStore::update_task`.
///
/// `None` leaves the field unchanged. `due_date: Some(None)` clears the date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<Priority>,
    pub due_date: Option<Option<i64>>,
}

impl TaskPatch {
    /// True when applying the patch cannot change any task.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.completed.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
    }
}
