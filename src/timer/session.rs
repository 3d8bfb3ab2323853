//! Session host for the timer engine.
//!
//! A [`Session`] owns the engine and serializes every stimulus through one
//! `tokio::select!` loop:
//! - commands arriving over an mpsc channel from a [`SessionHandle`]
//! - ticks from a [`Ticker`] that exists only while the engine is running
//!
//! After each command or tick the current [`TimerSnapshot`] is published on a
//! watch channel for renderers. [`SessionHandle::query`] goes through the
//! command channel instead, so its answer reflects every command sent before it.

use anyhow::Result;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::{interval_at, Duration, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, trace};

use crate::types::TimerSnapshot;

use super::engine::{NotificationSink, TimerEngine};

/// Nominal tick period.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_secs(1);

// ============================================================================
// SessionError
// ============================================================================

/// Session-specific error types.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The session loop has exited and no longer accepts commands
    #[error("Timer session has shut down")]
    Closed,
}

// ============================================================================
// SessionCommand
// ============================================================================

/// Commands accepted by a running session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    /// Start the countdown
    Start,
    /// Pause the countdown
    Pause,
    /// Start if paused, pause if running
    Toggle,
    /// Reload the current period
    Reset,
    /// Change the focus duration
    SetFocusMinutes(u32),
    /// Change the break duration
    SetBreakMinutes(u32),
    /// Change the reminder interval
    SetReminderMinutes(u32),
    /// Stop the session loop
    Shutdown,
}

/// Message carried by the session channel.
#[derive(Debug)]
enum Request {
    Command(SessionCommand),
    Snapshot(oneshot::Sender<TimerSnapshot>),
}

// ============================================================================
// Ticker
// ============================================================================

/// Recurring tick subscription.
///
/// The first tick arrives one full period after creation. Dropping the
/// ticker cancels the subscription.
#[derive(Debug)]
pub struct Ticker {
    interval: Interval,
}

impl Ticker {
    /// Subscribes to a tick every `period`.
    pub fn every(period: Duration) -> Self {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        trace!(?period, "Ticker subscribed");
        Self { interval }
    }

    /// Waits for the next tick.
    pub async fn tick(&mut self) {
        self.interval.tick().await;
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        trace!("Ticker released");
    }
}

/// Waits on the ticker if one is active, otherwise never resolves.
async fn next_tick(ticker: &mut Option<Ticker>) {
    match ticker {
        Some(ticker) => ticker.tick().await,
        None => std::future::pending().await,
    }
}

// ============================================================================
// Session
// ============================================================================

/// Drives a [`TimerEngine`] from commands and a scoped ticker.
pub struct Session<S: NotificationSink> {
    engine: TimerEngine<S>,
    tick_period: Duration,
    ticker: Option<Ticker>,
    requests: mpsc::UnboundedReceiver<Request>,
    snapshot_tx: watch::Sender<TimerSnapshot>,
}

impl<S: NotificationSink> Session<S> {
    /// Creates a session around `engine` and the handle that controls it.
    pub fn new(engine: TimerEngine<S>, tick_period: Duration) -> (Self, SessionHandle) {
        let (request_tx, requests) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(engine.snapshot());

        let session = Self {
            engine,
            tick_period,
            ticker: None,
            requests,
            snapshot_tx,
        };
        let handle = SessionHandle {
            request_tx,
            snapshot_rx,
        };
        (session, handle)
    }

    /// Runs until a shutdown command arrives or every handle is dropped.
    ///
    /// Returns the final snapshot. The ticker is released on every exit path.
    pub async fn run(mut self) -> Result<TimerSnapshot> {
        self.sync_ticker();

        loop {
            tokio::select! {
                request = self.requests.recv() => match request {
                    Some(Request::Command(SessionCommand::Shutdown)) | None => break,
                    Some(Request::Command(command)) => self.apply(command),
                    Some(Request::Snapshot(reply)) => {
                        let _ = reply.send(self.engine.snapshot());
                    }
                },
                _ = next_tick(&mut self.ticker), if self.ticker.is_some() => {
                    self.engine.tick();
                }
            }

            self.sync_ticker();
            self.publish();
        }

        self.ticker = None;
        self.engine.pause();
        self.publish();
        info!("Timer session stopped");

        Ok(self.engine.snapshot())
    }

    /// Applies a command to the engine.
    fn apply(&mut self, command: SessionCommand) {
        debug!(?command, "Applying command");
        match command {
            SessionCommand::Start => self.engine.start(),
            SessionCommand::Pause => self.engine.pause(),
            SessionCommand::Toggle => self.engine.toggle(),
            SessionCommand::Reset => self.engine.reset(),
            SessionCommand::SetFocusMinutes(minutes) => self.engine.set_focus_minutes(minutes),
            SessionCommand::SetBreakMinutes(minutes) => self.engine.set_break_minutes(minutes),
            SessionCommand::SetReminderMinutes(minutes) => {
                self.engine.set_reminder_minutes(minutes)
            }
            SessionCommand::Shutdown => {}
        }
    }

    /// Keeps the ticker subscription in step with the running flag.
    fn sync_ticker(&mut self) {
        match (self.engine.is_running(), self.ticker.is_some()) {
            (true, false) => self.ticker = Some(Ticker::every(self.tick_period)),
            (false, true) => self.ticker = None,
            _ => {}
        }
    }

    fn publish(&self) {
        let snapshot = self.engine.snapshot();
        self.snapshot_tx.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });
    }

    /// Returns the engine (for inspection before running).
    pub fn engine(&self) -> &TimerEngine<S> {
        &self.engine
    }

    /// Returns true while a tick subscription is held.
    pub fn has_ticker(&self) -> bool {
        self.ticker.is_some()
    }
}

// ============================================================================
// SessionHandle
// ============================================================================

/// Cloneable control surface for a [`Session`].
#[derive(Debug, Clone)]
pub struct SessionHandle {
    request_tx: mpsc::UnboundedSender<Request>,
    snapshot_rx: watch::Receiver<TimerSnapshot>,
}

impl SessionHandle {
    /// Sends a command to the session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Closed` if the session loop has exited.
    pub fn send(&self, command: SessionCommand) -> Result<(), SessionError> {
        self.request_tx
            .send(Request::Command(command))
            .map_err(|_| SessionError::Closed)
    }

    /// Reads the state after every command sent before this call has
    /// been applied.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Closed` if the session loop has exited.
    pub async fn query(&self) -> Result<TimerSnapshot, SessionError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.request_tx
            .send(Request::Snapshot(reply_tx))
            .map_err(|_| SessionError::Closed)?;
        reply_rx.await.map_err(|_| SessionError::Closed)
    }

    /// Starts the countdown.
    pub fn start(&self) -> Result<(), SessionError> {
        self.send(SessionCommand::Start)
    }

    /// Pauses the countdown.
    pub fn pause(&self) -> Result<(), SessionError> {
        self.send(SessionCommand::Pause)
    }

    /// Toggles between running and paused.
    pub fn toggle(&self) -> Result<(), SessionError> {
        self.send(SessionCommand::Toggle)
    }

    /// Resets the current period.
    pub fn reset(&self) -> Result<(), SessionError> {
        self.send(SessionCommand::Reset)
    }

    /// Sets the focus duration.
    pub fn set_focus_minutes(&self, minutes: u32) -> Result<(), SessionError> {
        self.send(SessionCommand::SetFocusMinutes(minutes))
    }

    /// Sets the break duration.
    pub fn set_break_minutes(&self, minutes: u32) -> Result<(), SessionError> {
        self.send(SessionCommand::SetBreakMinutes(minutes))
    }

    /// Sets the reminder interval.
    pub fn set_reminder_minutes(&self, minutes: u32) -> Result<(), SessionError> {
        self.send(SessionCommand::SetReminderMinutes(minutes))
    }

    /// Asks the session loop to exit.
    pub fn shutdown(&self) -> Result<(), SessionError> {
        self.send(SessionCommand::Shutdown)
    }

    /// Returns the most recently published snapshot.
    ///
    /// May lag behind commands the loop has not processed yet; use
    /// [`SessionHandle::query`] when ordering matters.
    pub fn snapshot(&self) -> TimerSnapshot {
        *self.snapshot_rx.borrow()
    }

    /// Returns a receiver that is notified on every snapshot change.
    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.snapshot_rx.clone()
    }
}

// ============================================================================
// Tests
// ============================================================================
