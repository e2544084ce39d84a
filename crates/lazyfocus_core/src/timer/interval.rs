//! Work/break countdown state machine.
//!
//! # Responsibility
//! - Track remaining seconds, run status and work/break mode.
//! - Hand out one countdown token per started countdown.
//!
//! # Invariants
//! - At most one countdown token is live; every start/stop transition
//!   invalidates the previous one, and ticks carrying a stale token are
//!   ignored.
//! - Reaching zero stops the countdown without switching mode.
//! - `remaining_seconds` never underflows.

use serde::{Deserialize, Serialize};

pub const WORK_SECONDS: u32 = 25 * 60;
pub const BREAK_SECONDS: u32 = 5 * 60;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    #[default]
    Work,
    Break,
}

impl TimerMode {
    pub fn default_seconds(self) -> u32 {
        match self {
            Self::Work => WORK_SECONDS,
            Self::Break => BREAK_SECONDS,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Self::Work => Self::Break,
            Self::Break => Self::Work,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    #[default]
    Idle,
    Running,
    Paused,
}

/// Identifies one started countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CountdownToken(u64);

/// Read-only projection for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    pub remaining_seconds: u32,
    pub is_running: bool,
    pub is_break: bool,
    pub status: TimerStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Decremented; countdown continues with this many seconds left.
    Counting(u32),
    /// Countdown reached zero and stopped.
    Finished,
    /// Token stale or timer not running; nothing changed.
    Ignored,
}

#[derive(Debug, Clone)]
pub struct IntervalTimer {
    remaining_seconds: u32,
    status: TimerStatus,
    mode: TimerMode,
    generation: u64,
}

impl Default for IntervalTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl IntervalTimer {
    /// Idle work-mode timer at the work default.
    pub fn new() -> Self {
        Self {
            remaining_seconds: WORK_SECONDS,
            status: TimerStatus::Idle,
            mode: TimerMode::Work,
            generation: 0,
        }
    }

    pub fn state(&self) -> TimerState {
        TimerState {
            remaining_seconds: self.remaining_seconds,
            is_running: self.status == TimerStatus::Running,
            is_break: self.mode == TimerMode::Break,
            status: self.status,
        }
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// Token of the live countdown, if one is running.
    pub fn active_token(&self) -> Option<CountdownToken> {
        (self.status == TimerStatus::Running).then_some(CountdownToken(self.generation))
    }

    /// Starts a fresh countdown from `duration_seconds`, cancelling any
    /// previous one.
    pub fn start_timer(&mut self, duration_seconds: u32) -> CountdownToken {
        self.cancel_countdown();
        self.remaining_seconds = duration_seconds;
        self.status = TimerStatus::Running;
        CountdownToken(self.generation)
    }

    /// Applies one one-second tick for `token`.
    pub fn tick(&mut self, token: CountdownToken) -> TickOutcome {
        if self.status != TimerStatus::Running || token.0 != self.generation {
            return TickOutcome::Ignored;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.cancel_countdown();
            self.status = TimerStatus::Idle;
            return TickOutcome::Finished;
        }
        TickOutcome::Counting(self.remaining_seconds)
    }

    /// Running -> paused, keeping the remaining time. Returns whether the
    /// timer was running.
    pub fn pause_timer(&mut self) -> bool {
        if self.status != TimerStatus::Running {
            return false;
        }
        self.cancel_countdown();
        self.status = TimerStatus::Paused;
        true
    }

    /// Same as `start_timer(remaining_seconds)`.
    pub fn resume_timer(&mut self) -> CountdownToken {
        self.start_timer(self.remaining_seconds)
    }

    /// Stops counting and restores the current mode's default duration.
    pub fn reset_timer(&mut self) {
        self.cancel_countdown();
        self.remaining_seconds = self.mode.default_seconds();
        self.status = TimerStatus::Idle;
    }

    /// Stops counting, flips work/break and loads the new mode's default.
    pub fn switch_mode(&mut self) {
        self.cancel_countdown();
        self.mode = self.mode.flipped();
        self.remaining_seconds = self.mode.default_seconds();
        self.status = TimerStatus::Idle;
    }

    fn cancel_countdown(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{IntervalTimer, TickOutcome, TimerStatus};

    #[test]
    fn zero_duration_finishes_on_first_tick() {
        let mut timer = IntervalTimer::new();
        let token = timer.start_timer(0);
        assert_eq!(timer.tick(token), TickOutcome::Finished);
        assert_eq!(timer.state().remaining_seconds, 0);
        assert_eq!(timer.state().status, TimerStatus::Idle);
    }

    #[test]
    fn finished_countdown_token_is_dead() {
        let mut timer = IntervalTimer::new();
        let token = timer.start_timer(1);
        assert_eq!(timer.tick(token), TickOutcome::Finished);
        assert_eq!(timer.tick(token), TickOutcome::Ignored);
        assert_eq!(timer.active_token(), None);
    }
}
