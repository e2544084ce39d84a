use lazyfocus_core::{
    IntervalTimer, TickOutcome, TimerDriver, TimerMode, TimerPreset, TimerState, TimerStatus,
    BREAK_SECONDS, WORK_SECONDS,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

#[test]
fn new_timer_is_idle_work_session() {
    let timer = IntervalTimer::new();
    let state = timer.state();
    assert_eq!(state.remaining_seconds, 1500);
    assert!(!state.is_running);
    assert!(!state.is_break);
    assert_eq!(state.status, TimerStatus::Idle);
}

#[test]
fn full_work_session_counts_down_to_idle() {
    let mut timer = IntervalTimer::new();
    let token = timer.start_timer(WORK_SECONDS);

    for expected in (1..WORK_SECONDS).rev() {
        assert_eq!(timer.tick(token), TickOutcome::Counting(expected));
    }
    assert_eq!(timer.tick(token), TickOutcome::Finished);

    let state = timer.state();
    assert_eq!(state.remaining_seconds, 0);
    assert!(!state.is_running);
    assert_eq!(state.status, TimerStatus::Idle);
    assert_eq!(timer.mode(), TimerMode::Work);
}

#[test]
fn pause_preserves_remaining_and_resume_restarts_from_it() {
    let mut timer = IntervalTimer::new();
    let token = timer.start_timer(10);
    timer.tick(token);
    timer.tick(token);

    assert!(timer.pause_timer());
    assert_eq!(timer.state().status, TimerStatus::Paused);
    assert_eq!(timer.remaining_seconds(), 8);
    assert_eq!(timer.tick(token), TickOutcome::Ignored);
    assert!(!timer.pause_timer());

    let resumed = timer.resume_timer();
    assert_ne!(resumed, token);
    assert!(timer.state().is_running);
    assert_eq!(timer.tick(resumed), TickOutcome::Counting(7));
}

#[test]
fn restarting_cancels_previous_countdown() {
    let mut timer = IntervalTimer::new();
    let stale = timer.start_timer(100);
    let live = timer.start_timer(50);

    assert_eq!(timer.tick(stale), TickOutcome::Ignored);
    assert_eq!(timer.remaining_seconds(), 50);
    assert_eq!(timer.tick(live), TickOutcome::Counting(49));
    assert_eq!(timer.active_token(), Some(live));
}

#[test]
fn reset_restores_mode_default_and_stops() {
    let mut timer = IntervalTimer::new();
    let token = timer.start_timer(TimerPreset::Long.seconds());
    timer.tick(token);

    timer.reset_timer();

    assert_eq!(timer.remaining_seconds(), WORK_SECONDS);
    assert_eq!(timer.state().status, TimerStatus::Idle);
    assert_eq!(timer.tick(token), TickOutcome::Ignored);
}

#[test]
fn switch_mode_always_loads_exact_default() {
    let mut timer = IntervalTimer::new();
    let token = timer.start_timer(777);
    timer.tick(token);

    timer.switch_mode();
    let state = timer.state();
    assert!(state.is_break);
    assert!(!state.is_running);
    assert_eq!(state.remaining_seconds, BREAK_SECONDS);
    assert_eq!(timer.tick(token), TickOutcome::Ignored);

    timer.switch_mode();
    let state = timer.state();
    assert!(!state.is_break);
    assert!(!state.is_running);
    assert_eq!(state.remaining_seconds, WORK_SECONDS);
}

#[test]
fn finishing_break_does_not_switch_back_to_work() {
    let mut timer = IntervalTimer::new();
    timer.switch_mode();
    let token = timer.resume_timer();
    for _ in 0..BREAK_SECONDS {
        timer.tick(token);
    }

    assert_eq!(timer.remaining_seconds(), 0);
    assert!(timer.state().is_break);

    timer.reset_timer();
    assert_eq!(timer.remaining_seconds(), BREAK_SECONDS);
}

#[test]
fn driver_counts_down_with_real_ticks() {
    let ticks = Arc::new(AtomicUsize::new(0));
    let observed = Arc::clone(&ticks);
    let driver = TimerDriver::with_interval(Duration::from_millis(5)).with_observer(Arc::new(
        move |_state: TimerState| {
            observed.fetch_add(1, Ordering::SeqCst);
        },
    ));

    driver.start_timer(3);
    wait_until(|| !driver.state().is_running);

    assert_eq!(driver.state().remaining_seconds, 0);
    assert_eq!(ticks.load(Ordering::SeqCst), 3);
}

#[test]
fn driver_pause_stops_ticking() {
    let driver = TimerDriver::with_interval(Duration::from_millis(5));
    driver.start_timer(10_000);
    wait_until(|| driver.state().remaining_seconds < 10_000);

    let paused = driver.pause_timer();
    assert_eq!(paused.status, TimerStatus::Paused);
    thread::sleep(Duration::from_millis(50));
    assert_eq!(driver.state().remaining_seconds, paused.remaining_seconds);

    let resumed = driver.resume_timer();
    assert!(resumed.is_running);
    wait_until(|| driver.state().remaining_seconds < paused.remaining_seconds);
    driver.reset_timer();
    assert_eq!(driver.state().remaining_seconds, WORK_SECONDS);
}

#[test]
fn driver_restart_leaves_single_countdown() {
    let driver = TimerDriver::with_interval(Duration::from_millis(5));
    driver.start_timer(10_000);
    driver.start_timer(10_000);
    driver.start_timer(4);

    wait_until(|| !driver.state().is_running);
    assert_eq!(driver.state().remaining_seconds, 0);
    assert_eq!(driver.state().status, TimerStatus::Idle);
}

#[test]
fn driver_switch_mode_cancels_countdown() {
    let driver = TimerDriver::with_interval(Duration::from_millis(5));
    driver.start_timer(10_000);

    let state = driver.switch_mode();
    assert!(state.is_break);
    assert!(!state.is_running);
    thread::sleep(Duration::from_millis(30));
    assert_eq!(driver.state().remaining_seconds, BREAK_SECONDS);
}

fn wait_until(mut condition: impl FnMut() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !condition() {
        assert!(Instant::now() < deadline, "condition not met within 5s");
        thread::sleep(Duration::from_millis(2));
    }
}
