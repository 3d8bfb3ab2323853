//! Routes engine events to sound, desktop alerts and the terminal.
//!
//! The dispatcher runs as its own task so slow audio or notification backends
//! never hold up the session loop.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::cli::Display;
use crate::notification::{Alert, AlertSender};
use crate::sound::{SoundPlayer, SoundSource};

use super::engine::TimerEvent;

/// Longest wait for sounds still playing when the event channel closes.
pub const SOUND_DRAIN_LIMIT: Duration = Duration::from_secs(5);

/// Consumes [`TimerEvent`]s and fans them out to the host collaborators.
pub struct EventDispatcher {
    sound: Option<Arc<dyn SoundPlayer + Send + Sync>>,
    reminder_sound: SoundSource,
    elapsed_sound: SoundSource,
    alerts: Option<Arc<dyn AlertSender + Send + Sync>>,
    echo: bool,
}

impl EventDispatcher {
    /// Creates a dispatcher with no sound, no alerts and no terminal output.
    pub fn new() -> Self {
        Self {
            sound: None,
            reminder_sound: SoundSource::reminder_chime(),
            elapsed_sound: SoundSource::elapsed_chime(),
            alerts: None,
            echo: false,
        }
    }

    /// Plays sounds through `player`.
    #[must_use]
    pub fn with_sound(mut self, player: Arc<dyn SoundPlayer + Send + Sync>) -> Self {
        self.sound = Some(player);
        self
    }

    /// Uses `source` for the end-of-period sound.
    #[must_use]
    pub fn with_elapsed_sound(mut self, source: SoundSource) -> Self {
        self.elapsed_sound = source;
        self
    }

    /// Shows visual alerts through `sender`.
    #[must_use]
    pub fn with_alerts(mut self, sender: Arc<dyn AlertSender + Send + Sync>) -> Self {
        self.alerts = Some(sender);
        self
    }

    /// Prints event lines to the terminal.
    #[must_use]
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Processes events until the channel closes, then lets queued sounds
    /// play out (up to [`SOUND_DRAIN_LIMIT`]) before the player is released.
    pub async fn run(self, mut events: mpsc::UnboundedReceiver<TimerEvent>) {
        while let Some(event) = events.recv().await {
            self.dispatch(event).await;
        }
        debug!("Event channel closed, dispatcher exiting");
        self.finish_sounds().await;
    }

    /// Handles a single event.
    pub async fn dispatch(&self, event: TimerEvent) {
        debug!(?event, "Dispatching timer event");
        match event {
            TimerEvent::Reminder {
                mode,
                elapsed_seconds,
            } => {
                if self.echo {
                    Display::show_reminder(mode, elapsed_seconds);
                }
                self.play(&self.reminder_sound);
            }
            TimerEvent::Elapsed { finished, next } => {
                if self.echo {
                    Display::show_elapsed(finished, next);
                }
                self.play(&self.elapsed_sound);
                self.alert(Alert::period_finished(finished)).await;
            }
        }
    }

    fn play(&self, source: &SoundSource) {
        let Some(player) = &self.sound else {
            return;
        };
        if let Err(e) = player.play(source) {
            warn!("Failed to play sound: {} ({})", e, e.suggestion());
        }
    }

    async fn finish_sounds(&self) {
        let Some(player) = &self.sound else {
            return;
        };
        let player = Arc::clone(player);
        if let Err(e) =
            tokio::task::spawn_blocking(move || player.finish(SOUND_DRAIN_LIMIT)).await
        {
            warn!("Sound drain task failed: {}", e);
        }
    }

    async fn alert(&self, alert: Alert) {
        let Some(sender) = &self.alerts else {
            return;
        };
        let sender = Arc::clone(sender);
        let result = tokio::task::spawn_blocking(move || sender.send(&alert)).await;
        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!("Failed to show alert: {} ({})", e, e.suggestion()),
            Err(e) => warn!("Alert task failed: {}", e),
        }
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
