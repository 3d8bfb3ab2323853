//! Timer engine for the Lychee Clock.
//!
//! The engine is a pure state machine. It owns the mode, the remaining time,
//! the running flag and the configured durations, and it advances only when
//! the host calls [`TimerEngine::tick`]. Reminder and elapse notifications are
//! delivered synchronously to a [`NotificationSink`].

use tokio::sync::mpsc;
use tracing::{debug, trace, warn};

use crate::types::{
    clamp_period_minutes, clamp_reminder_minutes, TimerMode, TimerSettings, TimerSnapshot,
};

// ============================================================================
// TimerEvent
// ============================================================================

/// Notification events emitted by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// A periodic reminder fired inside the current period
    Reminder {
        /// Mode of the period the reminder belongs to
        mode: TimerMode,
        /// Seconds elapsed in the period when the reminder fired
        elapsed_seconds: u32,
    },
    /// A period ran down to zero
    Elapsed {
        /// Mode that just finished
        finished: TimerMode,
        /// Mode now loaded and awaiting start
        next: TimerMode,
    },
}

// ============================================================================
// NotificationSink
// ============================================================================

/// Receiver for engine notifications.
///
/// Implementations must return quickly; the engine calls them inline while
/// processing a tick.
pub trait NotificationSink {
    /// Called every N minutes of elapsed time within a period.
    fn on_reminder(&mut self, mode: TimerMode, elapsed_seconds: u32);

    /// Called when a period reaches zero, before the mode flips.
    fn on_elapsed(&mut self, finished: TimerMode);
}

/// Forwards notifications as [`TimerEvent`]s over an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    event_tx: mpsc::UnboundedSender<TimerEvent>,
}

impl ChannelSink {
    /// Creates a sink that sends into `event_tx`.
    pub fn new(event_tx: mpsc::UnboundedSender<TimerEvent>) -> Self {
        Self { event_tx }
    }

    fn send(&self, event: TimerEvent) {
        if self.event_tx.send(event).is_err() {
            warn!("Event receiver dropped, discarding {:?}", event);
        }
    }
}

impl NotificationSink for ChannelSink {
    fn on_reminder(&mut self, mode: TimerMode, elapsed_seconds: u32) {
        self.send(TimerEvent::Reminder {
            mode,
            elapsed_seconds,
        });
    }

    fn on_elapsed(&mut self, finished: TimerMode) {
        self.send(TimerEvent::Elapsed {
            finished,
            next: finished.next(),
        });
    }
}

/// Collects events in order. Handy for tests and scripted runs.
impl NotificationSink for Vec<TimerEvent> {
    fn on_reminder(&mut self, mode: TimerMode, elapsed_seconds: u32) {
        self.push(TimerEvent::Reminder {
            mode,
            elapsed_seconds,
        });
    }

    fn on_elapsed(&mut self, finished: TimerMode) {
        self.push(TimerEvent::Elapsed {
            finished,
            next: finished.next(),
        });
    }
}

// ============================================================================
// TimerEngine
// ============================================================================

/// Focus/break countdown state machine.
pub struct TimerEngine<S: NotificationSink> {
    mode: TimerMode,
    remaining_seconds: u32,
    running: bool,
    settings: TimerSettings,
    sink: S,
}

impl<S: NotificationSink> TimerEngine<S> {
    /// Creates an engine in Focus mode, stopped, loaded with a full period.
    pub fn new(settings: TimerSettings, sink: S) -> Self {
        let settings = settings.clamped();
        Self {
            mode: TimerMode::Focus,
            remaining_seconds: settings.period_seconds(TimerMode::Focus),
            running: false,
            settings,
            sink,
        }
    }

    /// Starts the countdown.
    ///
    /// No-op if already running or if no time is left.
    pub fn start(&mut self) {
        if self.running || self.remaining_seconds == 0 {
            return;
        }
        self.running = true;
        debug!(mode = %self.mode, remaining = self.remaining_seconds, "Timer started");
    }

    /// Pauses the countdown. No-op if not running.
    pub fn pause(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        debug!(mode = %self.mode, remaining = self.remaining_seconds, "Timer paused");
    }

    /// Starts when paused, pauses when running.
    pub fn toggle(&mut self) {
        if self.running {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Stops the countdown and reloads the current mode's full period.
    pub fn reset(&mut self) {
        self.running = false;
        self.remaining_seconds = self.period_total_seconds();
        debug!(mode = %self.mode, remaining = self.remaining_seconds, "Timer reset");
    }

    /// Advances the countdown by one second.
    ///
    /// On the tick that reaches zero only the elapsed notification fires;
    /// a reminder that would coincide with expiry is suppressed.
    pub fn tick(&mut self) {
        if !self.running || self.remaining_seconds == 0 {
            return;
        }

        self.remaining_seconds -= 1;
        trace!(remaining = self.remaining_seconds, "Tick");

        if self.remaining_seconds == 0 {
            self.elapse();
            return;
        }

        if let Some(interval) = self.settings.reminder_interval_seconds() {
            let elapsed = self
                .period_total_seconds()
                .saturating_sub(self.remaining_seconds);
            if elapsed > 0 && elapsed % interval == 0 {
                debug!(mode = %self.mode, elapsed, "Reminder");
                self.sink.on_reminder(self.mode, elapsed);
            }
        }
    }

    fn elapse(&mut self) {
        let finished = self.mode;
        self.running = false;
        self.sink.on_elapsed(finished);

        self.mode = finished.next();
        self.remaining_seconds = self.period_total_seconds();
        debug!(
            finished = %finished,
            next = %self.mode,
            remaining = self.remaining_seconds,
            "Period elapsed"
        );
    }

    /// Sets the focus duration (clamped to >= 1 minute).
    ///
    /// Resyncs the countdown when stopped in Focus mode.
    pub fn set_focus_minutes(&mut self, minutes: u32) {
        self.settings.focus_minutes = clamp_period_minutes(minutes);
        self.resync_if_idle(TimerMode::Focus);
    }

    /// Sets the break duration (clamped to >= 1 minute).
    ///
    /// Resyncs the countdown when stopped in Break mode.
    pub fn set_break_minutes(&mut self, minutes: u32) {
        self.settings.break_minutes = clamp_period_minutes(minutes);
        self.resync_if_idle(TimerMode::Break);
    }

    /// Sets the reminder interval. Zero disables reminders.
    pub fn set_reminder_minutes(&mut self, minutes: u32) {
        self.settings.reminder_minutes = clamp_reminder_minutes(minutes);
    }

    fn resync_if_idle(&mut self, edited: TimerMode) {
        if !self.running && self.mode == edited {
            self.remaining_seconds = self.period_total_seconds();
        }
    }

    /// Full length of the current period in seconds.
    pub fn period_total_seconds(&self) -> u32 {
        self.settings.period_seconds(self.mode)
    }

    /// Returns the current mode.
    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    /// Returns the seconds left in the current period.
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// Returns true while the countdown is active.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Returns the configured durations.
    pub fn settings(&self) -> &TimerSettings {
        &self.settings
    }

    /// Returns a read-only snapshot of the engine.
    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            mode: self.mode,
            remaining_seconds: self.remaining_seconds,
            running: self.running,
            focus_minutes: self.settings.focus_minutes,
            break_minutes: self.settings.break_minutes,
            reminder_minutes: self.settings.reminder_minutes,
        }
    }

    /// Returns the notification sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Returns the notification sink mutably.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

impl<S: NotificationSink + std::fmt::Debug> std::fmt::Debug for TimerEngine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerEngine")
            .field("mode", &self.mode)
            .field("remaining_seconds", &self.remaining_seconds)
            .field("running", &self.running)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
