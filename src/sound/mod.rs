//! Sound playback for timer notifications.
//!
//! This module provides audio notification capabilities, including:
//!
//! - A synthesized double-beep chime (no bundled audio data)
//! - Optional user supplied sound files with chime fallback
//! - Non-blocking audio playback, drained before exit
//! - Graceful degradation when audio is unavailable
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │   SoundPlayer    │ ← Main interface
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │   SoundSource    │────▶│  ChimeSource     │
//! │                  │     │  (synthesized)   │
//! │                  │     ├──────────────────┤
//! │                  │────▶│  Audio file      │
//! └──────────────────┘     │  (--sound-file)  │
//!                          └──────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::time::Duration;
//!
//! use lychee_clock::sound::{RodioSoundPlayer, SoundPlayer, SoundSource};
//!
//! let player = RodioSoundPlayer::new().expect("audio init");
//! player.play(&SoundSource::elapsed_chime()).expect("playback failed");
//! player.finish(Duration::from_secs(2));
//! ```

mod chime;
mod error;
mod player;
mod source;

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub use chime::ChimeSource;
pub use error::SoundError;
pub use player::{try_create_player, RodioSoundPlayer};
pub use source::SoundSource;

/// Trait for sound playback implementations.
pub trait SoundPlayer {
    /// Plays a sound from the given source.
    ///
    /// This method should be non-blocking; the sound plays in the background.
    ///
    /// # Errors
    ///
    /// Returns an error if playback fails.
    fn play(&self, source: &SoundSource) -> Result<(), SoundError>;

    /// Blocks until every sound started by `play` has ended, or `limit`
    /// has passed. Sounds still playing at the limit are cut off.
    fn finish(&self, limit: Duration);
}

impl SoundPlayer for RodioSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        RodioSoundPlayer::play(self, source)
    }

    fn finish(&self, limit: Duration) {
        RodioSoundPlayer::finish(self, limit)
    }
}

/// Mock sound player for testing.
#[derive(Debug, Default)]
pub struct MockSoundPlayer {
    play_calls: Mutex<Vec<SoundSource>>,
    finish_calls: AtomicUsize,
    plays_before_finish: AtomicUsize,
    should_fail: AtomicBool,
}

impl MockSoundPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn play_count(&self) -> usize {
        self.play_calls.lock().unwrap().len()
    }

    #[must_use]
    pub fn get_play_calls(&self) -> Vec<SoundSource> {
        self.play_calls.lock().unwrap().clone()
    }

    /// Number of times `finish` was called.
    #[must_use]
    pub fn finish_count(&self) -> usize {
        self.finish_calls.load(Ordering::SeqCst)
    }

    /// Number of recorded plays at the time of the last `finish` call.
    #[must_use]
    pub fn plays_before_finish(&self) -> usize {
        self.plays_before_finish.load(Ordering::SeqCst)
    }
}

impl SoundPlayer for MockSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(SoundError::PlaybackError("Mock failure".to_string()));
        }
        self.play_calls.lock().unwrap().push(source.clone());
        Ok(())
    }

    fn finish(&self, _limit: Duration) {
        self.plays_before_finish
            .store(self.play_count(), Ordering::SeqCst);
        self.finish_calls.fetch_add(1, Ordering::SeqCst);
    }
}
