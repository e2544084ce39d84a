//! Core state engine for LazyFocus.
//! This crate is the single source of truth for task, notification,
//! profile and timer behavior.

pub mod clock;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod timer;
pub mod tips;

pub use clock::{Clock, FixedClock, SystemClock, MILLIS_PER_DAY};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::notification::{NewNotification, Notification, NotificationId, NotificationKind};
pub use model::profile::{
    ProfilePatch, ProfileValidationError, RegistrationForm, UserProfile, MAX_AGE, MIN_AGE,
};
pub use model::task::{NewTask, Priority, Task, TaskId, TaskPatch};
pub use repo::blob_repo::{
    BlobError, BlobRepository, BlobResult, MemoryBlobRepository, SqliteBlobRepository, TASKS_KEY,
    USER_DATA_KEY,
};
pub use service::notification_service::{NotificationHub, NotificationStore, TaskNotifier};
pub use service::persist::{LoadOutcome, Mutation, PersistOutcome};
pub use service::profile_service::ProfileStore;
pub use service::task_service::{TaskStore, TaskSummary};
pub use timer::driver::TimerDriver;
pub use timer::interval::{
    CountdownToken, IntervalTimer, TickOutcome, TimerMode, TimerState, TimerStatus,
    BREAK_SECONDS, WORK_SECONDS,
};
pub use timer::{format_clock, progress_percent, TimerPreset};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
