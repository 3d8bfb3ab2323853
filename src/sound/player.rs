//! Sound player implementation using rodio.
//!
//! The rodio output stream is not `Send`, so it lives on a dedicated audio
//! thread for the lifetime of the player. The player itself only keeps the
//! stream handle plus the sinks of sounds still playing, and can be shared
//! across tasks.

use std::fs::File;
use std::io::BufReader;
use std::sync::{mpsc, Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use tracing::{debug, warn};

use super::chime::ChimeSource;
use super::error::SoundError;
use super::source::SoundSource;

/// How often `finish` checks whether playback has ended.
const FINISH_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Keeps the audio thread (and its output stream) alive until dropped.
struct StreamGuard {
    _stop_tx: mpsc::Sender<()>,
}

/// Opens the default output stream on its own thread.
fn open_output_stream() -> Result<(OutputStreamHandle, StreamGuard), SoundError> {
    let (handle_tx, handle_rx) = mpsc::channel();
    let (stop_tx, stop_rx) = mpsc::channel::<()>();

    thread::Builder::new()
        .name("lychee-audio".to_string())
        .spawn(move || match OutputStream::try_default() {
            Ok((stream, handle)) => {
                let _ = handle_tx.send(Ok(handle));
                // Blocks until the guard's sender is dropped.
                let _ = stop_rx.recv();
                drop(stream);
                debug!("Audio output stream closed");
            }
            Err(e) => {
                let _ = handle_tx.send(Err(SoundError::DeviceNotAvailable(e.to_string())));
            }
        })
        .map_err(|e| SoundError::StreamError(e.to_string()))?;

    let handle = handle_rx
        .recv()
        .map_err(|e| SoundError::StreamError(e.to_string()))??;

    Ok((handle, StreamGuard { _stop_tx: stop_tx }))
}

/// A sound player that uses rodio for audio playback.
///
/// Sound playback is non-blocking. Each sound keeps its sink until it ends so
/// [`RodioSoundPlayer::finish`] can wait for it before the stream closes.
pub struct RodioSoundPlayer {
    stream_handle: OutputStreamHandle,
    sinks: Mutex<Vec<Sink>>,
    _guard: StreamGuard,
}

impl RodioSoundPlayer {
    /// Creates a new sound player on the default output device.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::DeviceNotAvailable` if no audio output device
    /// is available.
    pub fn new() -> Result<Self, SoundError> {
        let (stream_handle, guard) = open_output_stream()?;

        debug!("Audio output stream initialized");

        Ok(Self {
            stream_handle,
            sinks: Mutex::new(Vec::new()),
            _guard: guard,
        })
    }

    /// Plays a sound from the given source.
    ///
    /// A file that cannot be opened or decoded falls back to the chime.
    ///
    /// # Errors
    ///
    /// Returns an error if the output sink cannot be created.
    pub fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        match source {
            SoundSource::File { path, name } => {
                debug!("Playing sound file: {}", name);
                match self.play_file(path) {
                    Ok(()) => Ok(()),
                    Err(e) if e.should_fallback_to_chime() => {
                        warn!("Failed to play '{}': {}, falling back to chime", name, e);
                        self.play_chime()
                    }
                    Err(e) => Err(e),
                }
            }
            SoundSource::Chime { name } => {
                debug!("Playing chime: {}", name);
                self.play_chime()
            }
        }
    }

    /// Blocks until all started sounds have ended, or `limit` has passed.
    ///
    /// Sounds still playing at the limit are stopped.
    pub fn finish(&self, limit: Duration) {
        let deadline = Instant::now() + limit;
        let sinks = std::mem::take(&mut *self.lock_sinks());

        for sink in &sinks {
            while !sink.empty() {
                if Instant::now() >= deadline {
                    debug!("Sound still playing at shutdown, stopping it");
                    return;
                }
                thread::sleep(FINISH_POLL_INTERVAL);
            }
        }
        debug!(count = sinks.len(), "Queued sounds finished");
    }

    /// Number of sounds that have not finished yet.
    #[must_use]
    pub fn active_sounds(&self) -> usize {
        self.lock_sinks().iter().filter(|sink| !sink.empty()).count()
    }

    fn play_file(&self, path: &std::path::Path) -> Result<(), SoundError> {
        let file = File::open(path)
            .map_err(|e| SoundError::FileNotFound(format!("{}: {}", path.display(), e)))?;

        let decoder = Decoder::new(BufReader::new(file))
            .map_err(|e| SoundError::DecodeError(e.to_string()))?;

        self.play_source(decoder.convert_samples::<f32>())
    }

    fn play_chime(&self) -> Result<(), SoundError> {
        self.play_source(ChimeSource::double_beep())
    }

    fn play_source<S>(&self, source: S) -> Result<(), SoundError>
    where
        S: Source<Item = f32> + Send + 'static,
    {
        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| SoundError::StreamError(e.to_string()))?;
        sink.append(source);

        let mut sinks = self.lock_sinks();
        sinks.retain(|sink| !sink.empty());
        sinks.push(sink);

        debug!(active = sinks.len(), "Sound playback started");
        Ok(())
    }

    fn lock_sinks(&self) -> MutexGuard<'_, Vec<Sink>> {
        self.sinks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for RodioSoundPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioSoundPlayer")
            .field("active_sounds", &self.active_sounds())
            .finish_non_exhaustive()
    }
}

/// Creates a sound player, returning None if audio is unavailable.
#[must_use]
pub fn try_create_player() -> Option<Arc<RodioSoundPlayer>> {
    match RodioSoundPlayer::new() {
        Ok(player) => Some(Arc::new(player)),
        Err(e) => {
            warn!("Audio not available, sound disabled: {} ({})", e, e.suggestion());
            None
        }
    }
}
