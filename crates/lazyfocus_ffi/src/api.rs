//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Own the process-wide store wiring (one task store, one inbox, one
//!   profile, one timer).
//! - Run the caller-side input checks the screens rely on.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Store access is serialized through one process-wide lock.
//! - IDs cross the boundary as UTF-8 strings; times as epoch milliseconds.

use lazyfocus_core::db::open_db;
use lazyfocus_core::{
    core_version as core_version_inner, format_clock, Clock, init_logging as init_logging_inner,
    ping as ping_inner, progress_percent, tips, LoadOutcome, NewTask, Notification,
    NotificationHub, NotificationStore, PersistOutcome, Priority, ProfileStore, RegistrationForm,
    SqliteBlobRepository, SystemClock, Task, TaskId, TaskPatch, TaskStore, TimerDriver, TimerMode,
    TimerState,
};
use log::{info, warn};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

const STATE_DB_FILE_NAME: &str = "lazyfocus_state.sqlite3";
static STATE_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static APP_STATE: Mutex<Option<AppState>> = Mutex::new(None);
static TIMER: OnceLock<TimerDriver> = OnceLock::new();

type SharedRepo = Arc<SqliteBlobRepository>;

struct AppState {
    tasks: TaskStore<SharedRepo, NotificationHub>,
    profile: ProfileStore<SharedRepo>,
    inbox: NotificationHub,
}

impl AppState {
    fn open() -> Result<Self, String> {
        let db_path = resolve_state_db_path();
        let conn = open_db(&db_path).map_err(|err| format!("state DB open failed: {err}"))?;
        let repo = Arc::new(SqliteBlobRepository::new(conn));
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        let inbox = NotificationHub::new(NotificationStore::new(clock.clone()));
        let mut tasks = TaskStore::new(Arc::clone(&repo), inbox.clone(), clock);
        let mut profile = ProfileStore::new(repo);
        let task_load = tasks.load();
        let profile_load = profile.load();
        info!(
            "event=app_state_open module=ffi status=ok tasks_loaded={} profile_loaded={}",
            task_load == LoadOutcome::Loaded,
            profile_load == LoadOutcome::Loaded
        );

        Ok(Self {
            tasks,
            profile,
            inbox,
        })
    }
}

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Task projection for list rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub task_id: String,
    pub title: String,
    pub description: String,
    pub completed: bool,
    /// `low|medium|high`.
    pub priority: String,
    pub due_epoch_ms: Option<i64>,
    pub created_epoch_ms: i64,
}

/// Notification projection for the inbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationItem {
    pub notification_id: String,
    pub title: String,
    pub message: String,
    /// `task|reminder|system`.
    pub kind: String,
    pub related_task_id: Option<String>,
    pub timestamp_epoch_ms: i64,
    pub read: bool,
    pub priority: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileItem {
    pub name: String,
    pub display_name: String,
    pub age: Option<u32>,
    pub profile_completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSummaryItem {
    pub total: u32,
    pub completed: u32,
    pub pending: u32,
    pub unread_notifications: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimerSnapshot {
    pub remaining_seconds: u32,
    pub is_running: bool,
    pub is_break: bool,
    /// `MM:SS` label.
    pub clock_label: String,
    /// Remaining time relative to the mode default, in percent.
    pub progress_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TipItem {
    pub tip_id: String,
    pub title: String,
    pub description: String,
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether the operation was applied.
    pub ok: bool,
    /// Affected entity ID, when any.
    pub entity_id: Option<String>,
    /// False only when the follow-up blob write failed.
    pub persisted: bool,
    /// Human-readable message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn applied(
        message: impl Into<String>,
        entity_id: Option<String>,
        persisted: &PersistOutcome,
    ) -> Self {
        let mut message = message.into();
        if let PersistOutcome::Failed(reason) = persisted {
            message = format!("{message} (not saved: {reason})");
        }
        Self {
            ok: true,
            entity_id,
            persisted: persisted.is_durable(),
            message,
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            entity_id: None,
            persisted: false,
            message: message.into(),
        }
    }
}

/// Lists tasks in display order (oldest first).
///
/// # FFI contract
/// - Returns an empty list when the state database cannot be opened.
#[flutter_rust_bridge::frb(sync)]
pub fn task_list() -> Vec<TaskItem> {
    with_app_state(|app| app.tasks.tasks().iter().map(to_task_item).collect())
        .unwrap_or_else(|err| {
            warn!("event=task_list module=ffi status=error error={err}");
            Vec::new()
        })
}

/// Creates a task and derives its notifications.
///
/// Input semantics:
/// - `title` is trimmed and must not be empty.
/// - `priority` is `low|medium|high`; `None` means medium.
#[flutter_rust_bridge::frb(sync)]
pub fn task_add(
    title: String,
    description: Option<String>,
    priority: Option<String>,
    due_epoch_ms: Option<i64>,
) -> ActionResponse {
    let title = title.trim().to_string();
    if title.is_empty() {
        return ActionResponse::failure("task_add failed: title is required");
    }
    let priority = match parse_priority(priority) {
        Ok(priority) => priority,
        Err(message) => return ActionResponse::failure(format!("task_add failed: {message}")),
    };

    let input = NewTask {
        title,
        description,
        completed: false,
        priority,
        due_date: due_epoch_ms,
    };
    match with_app_state(|app| app.tasks.add_task(input)) {
        Ok(mutation) => ActionResponse::applied(
            "Task created.",
            Some(mutation.output.id.to_string()),
            &mutation.persisted,
        ),
        Err(err) => ActionResponse::failure(format!("task_add failed: {err}")),
    }
}

/// Partially updates a task. `None` arguments leave fields unchanged;
/// `clear_due_date` removes the due date.
#[flutter_rust_bridge::frb(sync)]
pub fn task_update(
    task_id: String,
    title: Option<String>,
    description: Option<String>,
    priority: Option<String>,
    due_epoch_ms: Option<i64>,
    clear_due_date: bool,
) -> ActionResponse {
    let id = match parse_id(&task_id) {
        Ok(id) => id,
        Err(message) => return ActionResponse::failure(format!("task_update failed: {message}")),
    };
    let title = title.map(|value| value.trim().to_string());
    if title.as_deref() == Some("") {
        return ActionResponse::failure("task_update failed: title is required");
    }
    let priority = match parse_priority(priority) {
        Ok(priority) => priority,
        Err(message) => return ActionResponse::failure(format!("task_update failed: {message}")),
    };

    let patch = TaskPatch {
        title,
        description,
        completed: None,
        priority,
        due_date: if clear_due_date {
            Some(None)
        } else {
            due_epoch_ms.map(Some)
        },
    };
    match with_app_state(|app| app.tasks.update_task(id, &patch)) {
        Ok(mutation) => match mutation.output {
            Some(task) => ActionResponse::applied(
                "Task updated.",
                Some(task.id.to_string()),
                &mutation.persisted,
            ),
            None => ActionResponse::failure(format!("task not found: {id}")),
        },
        Err(err) => ActionResponse::failure(format!("task_update failed: {err}")),
    }
}

/// Deletes a task; related notifications stay in the inbox.
#[flutter_rust_bridge::frb(sync)]
pub fn task_delete(task_id: String) -> ActionResponse {
    let id = match parse_id(&task_id) {
        Ok(id) => id,
        Err(message) => return ActionResponse::failure(format!("task_delete failed: {message}")),
    };
    match with_app_state(|app| app.tasks.delete_task(id)) {
        Ok(mutation) if mutation.output => {
            ActionResponse::applied("Task deleted.", Some(id.to_string()), &mutation.persisted)
        }
        Ok(_) => ActionResponse::failure(format!("task not found: {id}")),
        Err(err) => ActionResponse::failure(format!("task_delete failed: {err}")),
    }
}

/// Flips completion and re-derives notifications for the new state.
#[flutter_rust_bridge::frb(sync)]
pub fn task_toggle(task_id: String) -> ActionResponse {
    let id = match parse_id(&task_id) {
        Ok(id) => id,
        Err(message) => return ActionResponse::failure(format!("task_toggle failed: {message}")),
    };
    match with_app_state(|app| app.tasks.toggle_task_completion(id)) {
        Ok(mutation) => match mutation.output {
            Some(task) => {
                let message = if task.completed {
                    "Task completed."
                } else {
                    "Task reopened."
                };
                ActionResponse::applied(message, Some(task.id.to_string()), &mutation.persisted)
            }
            None => ActionResponse::failure(format!("task not found: {id}")),
        },
        Err(err) => ActionResponse::failure(format!("task_toggle failed: {err}")),
    }
}

/// Dashboard counters.
#[flutter_rust_bridge::frb(sync)]
pub fn task_summary() -> TaskSummaryItem {
    with_app_state(|app| {
        let summary = app.tasks.summary();
        TaskSummaryItem {
            total: saturating_u32(summary.total),
            completed: saturating_u32(summary.completed),
            pending: saturating_u32(summary.pending),
            unread_notifications: saturating_u32(app.inbox.lock().unread_count()),
        }
    })
    .unwrap_or(TaskSummaryItem {
        total: 0,
        completed: 0,
        pending: 0,
        unread_notifications: 0,
    })
}

/// Inbox in display order (newest first).
#[flutter_rust_bridge::frb(sync)]
pub fn notification_list() -> Vec<NotificationItem> {
    with_app_state(|app| {
        app.inbox
            .lock()
            .notifications()
            .iter()
            .map(to_notification_item)
            .collect()
    })
    .unwrap_or_default()
}

#[flutter_rust_bridge::frb(sync)]
pub fn notification_unread_count() -> u32 {
    with_app_state(|app| saturating_u32(app.inbox.lock().unread_count())).unwrap_or(0)
}

/// Marks one notification read. Unknown ids are a successful no-op.
#[flutter_rust_bridge::frb(sync)]
pub fn notification_mark_read(notification_id: String) -> bool {
    let Ok(id) = parse_id(&notification_id) else {
        return false;
    };
    with_app_state(|app| {
        app.inbox.lock().mark_notification_as_read(id);
    })
    .is_ok()
}

#[flutter_rust_bridge::frb(sync)]
pub fn notification_mark_all_read() -> bool {
    with_app_state(|app| app.inbox.lock().mark_all_notifications_as_read()).is_ok()
}

/// Deletes one notification. Unknown ids are a successful no-op.
#[flutter_rust_bridge::frb(sync)]
pub fn notification_delete(notification_id: String) -> bool {
    let Ok(id) = parse_id(&notification_id) else {
        return false;
    };
    with_app_state(|app| {
        app.inbox.lock().delete_notification(id);
    })
    .is_ok()
}

#[flutter_rust_bridge::frb(sync)]
pub fn profile_get() -> ProfileItem {
    with_app_state(|app| {
        let profile = app.profile.profile();
        ProfileItem {
            name: profile.name.clone(),
            display_name: profile.display_name().to_string(),
            age: profile.age,
            profile_completed: profile.profile_completed,
        }
    })
    .unwrap_or_else(|_| ProfileItem {
        name: String::new(),
        display_name: lazyfocus_core::UserProfile::default().display_name().to_string(),
        age: None,
        profile_completed: false,
    })
}

/// Validates registration input and completes the profile.
///
/// # FFI contract
/// - Returns after the profile write finished, so the UI can navigate on
///   `ok == true`.
/// - Validation failures leave the stored profile untouched.
#[flutter_rust_bridge::frb(sync)]
pub fn profile_register(name: String, age: String) -> ActionResponse {
    let patch = match RegistrationForm::new(name, age).validate() {
        Ok(patch) => patch,
        Err(err) => return ActionResponse::failure(format!("profile_register failed: {err}")),
    };
    match with_app_state(|app| app.profile.update_user_data(&patch)) {
        Ok(persisted) => ActionResponse::applied("Profile saved.", None, &persisted),
        Err(err) => ActionResponse::failure(format!("profile_register failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn timer_state() -> TimerSnapshot {
    to_timer_snapshot(timer().state())
}

/// Starts a countdown of `duration_seconds`, replacing any running one.
#[flutter_rust_bridge::frb(sync)]
pub fn timer_start(duration_seconds: u32) -> TimerSnapshot {
    to_timer_snapshot(timer().start_timer(duration_seconds))
}

#[flutter_rust_bridge::frb(sync)]
pub fn timer_pause() -> TimerSnapshot {
    to_timer_snapshot(timer().pause_timer())
}

#[flutter_rust_bridge::frb(sync)]
pub fn timer_resume() -> TimerSnapshot {
    to_timer_snapshot(timer().resume_timer())
}

#[flutter_rust_bridge::frb(sync)]
pub fn timer_reset() -> TimerSnapshot {
    to_timer_snapshot(timer().reset_timer())
}

#[flutter_rust_bridge::frb(sync)]
pub fn timer_switch_mode() -> TimerSnapshot {
    to_timer_snapshot(timer().switch_mode())
}

#[flutter_rust_bridge::frb(sync)]
pub fn tips_list() -> Vec<TipItem> {
    tips::tips()
        .iter()
        .map(|tip| TipItem {
            tip_id: tip.id.to_string(),
            title: tip.title.to_string(),
            description: tip.description.to_string(),
        })
        .collect()
}

fn resolve_state_db_path() -> PathBuf {
    STATE_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("LAZYFOCUS_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(STATE_DB_FILE_NAME)
        })
        .clone()
}

fn with_app_state<T>(f: impl FnOnce(&mut AppState) -> T) -> Result<T, String> {
    let mut guard: MutexGuard<'_, Option<AppState>> =
        APP_STATE.lock().unwrap_or_else(PoisonError::into_inner);
    if guard.is_none() {
        *guard = Some(AppState::open()?);
    }
    match guard.as_mut() {
        Some(app) => Ok(f(app)),
        None => Err("app state unavailable".to_string()),
    }
}

fn timer() -> &'static TimerDriver {
    TIMER.get_or_init(TimerDriver::new)
}

fn parse_id(raw: &str) -> Result<TaskId, String> {
    uuid::Uuid::parse_str(raw.trim()).map_err(|_| format!("invalid id `{}`", raw.trim()))
}

fn parse_priority(raw: Option<String>) -> Result<Option<Priority>, String> {
    match raw {
        None => Ok(None),
        Some(value) => Priority::parse(&value)
            .map(Some)
            .ok_or_else(|| {
                format!(
                    "unsupported priority `{}`; expected low|medium|high",
                    value.trim()
                )
            }),
    }
}

fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

fn to_task_item(task: &Task) -> TaskItem {
    TaskItem {
        task_id: task.id.to_string(),
        title: task.title.clone(),
        description: task.description.clone(),
        completed: task.completed,
        priority: task.priority.as_str().to_string(),
        due_epoch_ms: task.due_date,
        created_epoch_ms: task.created_at,
    }
}

fn to_notification_item(notification: &Notification) -> NotificationItem {
    NotificationItem {
        notification_id: notification.id.to_string(),
        title: notification.title.clone(),
        message: notification.message.clone(),
        kind: notification.kind.as_str().to_string(),
        related_task_id: notification.related_entity_id.map(|id| id.to_string()),
        timestamp_epoch_ms: notification.timestamp,
        read: notification.read,
        priority: notification.priority.as_str().to_string(),
    }
}

fn to_timer_snapshot(state: TimerState) -> TimerSnapshot {
    let mode = if state.is_break {
        TimerMode::Break
    } else {
        TimerMode::Work
    };
    TimerSnapshot {
        remaining_seconds: state.remaining_seconds,
        is_running: state.is_running,
        is_break: state.is_break,
        clock_label: format_clock(state.remaining_seconds),
        progress_percent: progress_percent(state.remaining_seconds, mode),
    }
}
