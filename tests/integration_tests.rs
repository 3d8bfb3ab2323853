//! Integration tests for the timer engine through the public API.
//!
//! These tests drive full periods tick by tick and check:
//! - Mode alternation and period reloading
//! - Reminder cadence, including the expiry boundary
//! - Duration edits while idle and while running
//! - Command idempotence

use lychee_clock::timer::{TimerEngine, TimerEvent};
use lychee_clock::types::{TimerMode, TimerSettings};

// ============================================================================
// Test Helpers
// ============================================================================

/// Creates an engine that records its events.
fn create_engine(focus: u32, break_minutes: u32, remind: u32) -> TimerEngine<Vec<TimerEvent>> {
    let settings = TimerSettings::default()
        .with_focus_minutes(focus)
        .with_break_minutes(break_minutes)
        .with_reminder_minutes(remind);
    TimerEngine::new(settings, Vec::new())
}

/// Ticks `count` times.
fn tick_n<S: lychee_clock::timer::NotificationSink>(engine: &mut TimerEngine<S>, count: u32) {
    for _ in 0..count {
        engine.tick();
    }
}

fn reminder_count(events: &[TimerEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, TimerEvent::Reminder { .. }))
        .count()
}

fn elapsed_events(events: &[TimerEvent]) -> Vec<TimerEvent> {
    events
        .iter()
        .copied()
        .filter(|e| matches!(e, TimerEvent::Elapsed { .. }))
        .collect()
}

// ============================================================================
// Full Periods
// ============================================================================

/// Default settings: one full focus period with reminders off.
#[test]
fn test_default_focus_period_runs_to_break() {
    let mut engine = create_engine(25, 5, 0);
    engine.start();

    tick_n(&mut engine, 1499);
    assert!(engine.sink().is_empty());
    assert_eq!(engine.remaining_seconds(), 1);
    assert!(engine.is_running());

    engine.tick();
    assert_eq!(
        engine.sink().as_slice(),
        &[TimerEvent::Elapsed {
            finished: TimerMode::Focus,
            next: TimerMode::Break,
        }]
    );
    assert_eq!(engine.mode(), TimerMode::Break);
    assert_eq!(engine.remaining_seconds(), 300);
    assert!(!engine.is_running());
}

/// A reminder interval longer than the period never fires.
#[test]
fn test_reminder_longer_than_period_is_silent() {
    let mut engine = create_engine(1, 1, 2);
    engine.start();
    tick_n(&mut engine, 60);

    assert_eq!(reminder_count(engine.sink()), 0);
    assert_eq!(elapsed_events(engine.sink()).len(), 1);
}

#[test]
fn test_focus_and_break_alternate() {
    let mut engine = create_engine(2, 1, 0);

    engine.start();
    tick_n(&mut engine, 120);
    assert_eq!(engine.mode(), TimerMode::Break);
    assert_eq!(engine.remaining_seconds(), 60);

    engine.start();
    tick_n(&mut engine, 60);
    assert_eq!(engine.mode(), TimerMode::Focus);
    assert_eq!(engine.remaining_seconds(), 120);

    assert_eq!(
        elapsed_events(engine.sink()),
        vec![
            TimerEvent::Elapsed {
                finished: TimerMode::Focus,
                next: TimerMode::Break,
            },
            TimerEvent::Elapsed {
                finished: TimerMode::Break,
                next: TimerMode::Focus,
            },
        ]
    );
}

#[test]
fn test_ticks_after_expiry_wait_for_start() {
    let mut engine = create_engine(1, 1, 0);
    engine.start();
    tick_n(&mut engine, 60);

    tick_n(&mut engine, 30);
    assert_eq!(engine.mode(), TimerMode::Break);
    assert_eq!(engine.remaining_seconds(), 60);
    assert_eq!(engine.sink().len(), 1);
}

// ============================================================================
// Reminder Cadence
// ============================================================================

/// Expected reminders for a period of `total` seconds with an `r` minute interval.
fn expected_reminders(total: u32, r: u32) -> usize {
    let interval = 60 * r;
    let full = total / interval;
    (if total % interval == 0 { full - 1 } else { full }) as usize
}

#[test]
fn test_reminder_cadence_matches_formula() {
    for (focus, remind) in [(25, 5), (25, 7), (10, 1), (3, 3), (1, 1), (7, 2)] {
        let mut engine = create_engine(focus, 5, remind);
        engine.start();
        tick_n(&mut engine, focus * 60);

        assert_eq!(
            reminder_count(engine.sink()),
            expected_reminders(focus * 60, remind),
            "focus={} remind={}",
            focus,
            remind
        );
        assert_eq!(elapsed_events(engine.sink()).len(), 1);
    }
}

#[test]
fn test_reminder_suppressed_on_expiry_tick() {
    let mut engine = create_engine(10, 5, 5);
    engine.start();
    tick_n(&mut engine, 600);

    assert_eq!(
        engine.sink().as_slice(),
        &[
            TimerEvent::Reminder {
                mode: TimerMode::Focus,
                elapsed_seconds: 300,
            },
            TimerEvent::Elapsed {
                finished: TimerMode::Focus,
                next: TimerMode::Break,
            },
        ]
    );
}

#[test]
fn test_disabling_reminders_mid_period() {
    let mut engine = create_engine(10, 5, 1);
    engine.start();
    tick_n(&mut engine, 120);
    assert_eq!(reminder_count(engine.sink()), 2);

    engine.set_reminder_minutes(0);
    tick_n(&mut engine, 300);
    assert_eq!(reminder_count(engine.sink()), 2);
}

#[test]
fn test_reminders_restart_counting_in_new_period() {
    let mut engine = create_engine(2, 2, 1);
    engine.start();
    tick_n(&mut engine, 120);
    engine.start();
    tick_n(&mut engine, 60);

    let reminders: Vec<_> = engine
        .sink()
        .iter()
        .filter_map(|e| match e {
            TimerEvent::Reminder {
                mode,
                elapsed_seconds,
            } => Some((*mode, *elapsed_seconds)),
            _ => None,
        })
        .collect();
    assert_eq!(
        reminders,
        vec![(TimerMode::Focus, 60), (TimerMode::Break, 60)]
    );
}

// ============================================================================
// Duration Edits
// ============================================================================

/// Editing the active duration resyncs only while idle.
#[test]
fn test_focus_edit_idle_and_running() {
    let mut engine = create_engine(25, 5, 0);
    assert_eq!(engine.remaining_seconds(), 1500);

    engine.set_focus_minutes(10);
    assert_eq!(engine.remaining_seconds(), 600);

    engine.start();
    tick_n(&mut engine, 5);
    engine.set_focus_minutes(20);
    assert_eq!(engine.remaining_seconds(), 595);

    engine.reset();
    assert_eq!(engine.remaining_seconds(), 1200);
    assert!(!engine.is_running());
}

#[test]
fn test_editing_inactive_mode_leaves_countdown() {
    let mut engine = create_engine(25, 5, 0);
    engine.set_break_minutes(15);
    assert_eq!(engine.remaining_seconds(), 1500);
    assert_eq!(engine.snapshot().break_minutes, 15);
}

#[test]
fn test_zero_durations_clamp_to_one_minute() {
    let mut engine = create_engine(25, 5, 0);
    engine.set_focus_minutes(0);
    engine.set_break_minutes(0);

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.focus_minutes, 1);
    assert_eq!(snapshot.break_minutes, 1);
    assert_eq!(snapshot.remaining_seconds, 60);
}

// ============================================================================
// Idempotence
// ============================================================================

#[test]
fn test_start_and_pause_are_idempotent() {
    let mut engine = create_engine(25, 5, 0);

    engine.start();
    engine.start();
    tick_n(&mut engine, 3);
    assert_eq!(engine.remaining_seconds(), 1497);

    engine.pause();
    engine.pause();
    assert!(!engine.is_running());
    tick_n(&mut engine, 3);
    assert_eq!(engine.remaining_seconds(), 1497);
}

#[test]
fn test_reset_keeps_mode() {
    let mut engine = create_engine(1, 3, 0);
    engine.start();
    tick_n(&mut engine, 60);
    engine.start();
    tick_n(&mut engine, 10);

    engine.reset();
    assert_eq!(engine.mode(), TimerMode::Break);
    assert_eq!(engine.remaining_seconds(), 180);
    assert!(!engine.is_running());
}
