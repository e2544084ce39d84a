//! Real-time tick source for `IntervalTimer`.
//!
//! # Responsibility
//! - Drive the live countdown with one tick per interval on a background
//!   thread.
//! - Cancel the previous tick thread on every start/stop transition.
//!
//! # Invariants
//! - At most one tick thread is registered at a time.
//! - A late tick from a cancelled thread carries a stale token and is
//!   ignored by the state machine.
//! - The timer lock is never held while joining a tick thread.

use crate::timer::interval::{CountdownToken, IntervalTimer, TickOutcome, TimerState};
use log::{debug, error, info};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Callback invoked after every applied tick, on the tick thread.
///
/// Must not call back into the owning `TimerDriver`.
pub type TickObserver = Arc<dyn Fn(TimerState) + Send + Sync>;

struct Ticker {
    cancel: Sender<()>,
    handle: JoinHandle<()>,
}

/// Thread-backed countdown driver sharing one `IntervalTimer`.
pub struct TimerDriver {
    timer: Arc<Mutex<IntervalTimer>>,
    ticker: Mutex<Option<Ticker>>,
    interval: Duration,
    observer: Option<TickObserver>,
}

impl Default for TimerDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerDriver {
    pub fn new() -> Self {
        Self::with_interval(TICK_INTERVAL)
    }

    /// Driver with a custom tick period (shortened in tests).
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            timer: Arc::new(Mutex::new(IntervalTimer::new())),
            ticker: Mutex::new(None),
            interval,
            observer: None,
        }
    }

    pub fn with_observer(mut self, observer: TickObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn state(&self) -> TimerState {
        lock_timer(&self.timer).state()
    }

    pub fn start_timer(&self, duration_seconds: u32) -> TimerState {
        let token = lock_timer(&self.timer).start_timer(duration_seconds);
        info!("event=timer_start module=timer status=ok duration_s={duration_seconds}");
        self.spawn_ticker(token)
    }

    pub fn pause_timer(&self) -> TimerState {
        let paused = lock_timer(&self.timer).pause_timer();
        self.cancel_ticker();
        debug!("event=timer_pause module=timer status={}", status_label(paused));
        self.state()
    }

    pub fn resume_timer(&self) -> TimerState {
        let token = lock_timer(&self.timer).resume_timer();
        info!("event=timer_resume module=timer status=ok");
        self.spawn_ticker(token)
    }

    pub fn reset_timer(&self) -> TimerState {
        lock_timer(&self.timer).reset_timer();
        self.cancel_ticker();
        info!("event=timer_reset module=timer status=ok");
        self.state()
    }

    pub fn switch_mode(&self) -> TimerState {
        lock_timer(&self.timer).switch_mode();
        self.cancel_ticker();
        let state = self.state();
        info!(
            "event=timer_switch_mode module=timer status=ok is_break={}",
            state.is_break
        );
        state
    }

    fn spawn_ticker(&self, token: CountdownToken) -> TimerState {
        let mut slot = self.ticker.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = slot.take() {
            stop_ticker(previous);
        }

        let (cancel, cancelled) = mpsc::channel::<()>();
        let timer = Arc::clone(&self.timer);
        let observer = self.observer.clone();
        let interval = self.interval;

        let spawned = thread::Builder::new()
            .name("lazyfocus-timer".to_string())
            .spawn(move || loop {
                match cancelled.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {}
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }

                let (outcome, state) = {
                    let mut guard = lock_timer(&timer);
                    let outcome = guard.tick(token);
                    (outcome, guard.state())
                };
                if outcome == TickOutcome::Ignored {
                    break;
                }
                if let Some(observer) = &observer {
                    observer(state);
                }
                if outcome == TickOutcome::Finished {
                    info!("event=timer_finish module=timer status=ok");
                    break;
                }
            });

        match spawned {
            Ok(handle) => *slot = Some(Ticker { cancel, handle }),
            Err(err) => {
                // Without a tick source the countdown cannot progress; park it.
                error!("event=timer_start module=timer status=error error_code=spawn_failed error={err}");
                lock_timer(&self.timer).pause_timer();
            }
        }
        drop(slot);
        self.state()
    }

    fn cancel_ticker(&self) {
        let previous = self
            .ticker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(previous) = previous {
            stop_ticker(previous);
        }
    }
}

impl Drop for TimerDriver {
    fn drop(&mut self) {
        self.cancel_ticker();
    }
}

fn stop_ticker(ticker: Ticker) {
    // Send fails only when the thread already exited.
    let _ = ticker.cancel.send(());
    if ticker.handle.join().is_err() {
        error!("event=timer_cancel module=timer status=error error_code=ticker_panicked");
    }
}

fn lock_timer(timer: &Mutex<IntervalTimer>) -> MutexGuard<'_, IntervalTimer> {
    timer.lock().unwrap_or_else(PoisonError::into_inner)
}

fn status_label(applied: bool) -> &'static str {
    if applied {
        "ok"
    } else {
        "noop"
    }
}
