//! Work/break interval timer.
//!
//! `interval` holds the pure state machine; `driver` feeds it real
//! one-second ticks. Display helpers live here.

pub mod driver;
pub mod interval;

use interval::TimerMode;

/// Session lengths offered by the timer screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPreset {
    Short,
    Standard,
    Long,
}

impl TimerPreset {
    pub const ALL: [TimerPreset; 3] = [Self::Short, Self::Standard, Self::Long];

    pub fn minutes(self) -> u32 {
        match self {
            Self::Short => 25,
            Self::Standard => 50,
            Self::Long => 90,
        }
    }

    pub fn seconds(self) -> u32 {
        self.minutes() * 60
    }
}

/// Formats seconds as zero-padded `MM:SS`; minutes may exceed two digits.
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Remaining time as a percentage of the mode's default duration.
///
/// Exceeds 100 when a preset longer than the default is running.
pub fn progress_percent(remaining_seconds: u32, mode: TimerMode) -> f64 {
    f64::from(remaining_seconds) / f64::from(mode.default_seconds()) * 100.0
}
