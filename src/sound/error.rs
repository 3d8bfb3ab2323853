//! Sound system error types.

use thiserror::Error;

/// Errors that can occur in the sound playback system.
#[derive(Debug, Error)]
pub enum SoundError {
    /// Audio device is not available (e.g., no speakers connected).
    #[error("Audio device not available: {0}")]
    DeviceNotAvailable(String),

    /// Sound file was not found at the specified path.
    #[error("Sound file not found: {0}")]
    FileNotFound(String),

    /// Failed to decode the audio file.
    #[error("Failed to decode sound file: {0}")]
    DecodeError(String),

    /// Failed to create the audio output stream.
    #[error("Failed to create audio stream: {0}")]
    StreamError(String),

    /// Generic sound playback error.
    #[error("Sound playback error: {0}")]
    PlaybackError(String),
}

impl SoundError {
    /// Returns true if this error is related to the audio file.
    #[must_use]
    pub fn is_file_error(&self) -> bool {
        matches!(self, Self::FileNotFound(_) | Self::DecodeError(_))
    }

    /// Returns true if playback should fall back to the chime.
    #[must_use]
    pub fn should_fallback_to_chime(&self) -> bool {
        self.is_file_error()
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::DeviceNotAvailable(_) => "connect an audio output device or run with --no-sound",
            Self::FileNotFound(_) => "check the --sound-file path; the chime is used instead",
            Self::DecodeError(_) => "use a wav, mp3, flac or ogg file",
            Self::StreamError(_) => "check the system audio settings",
            Self::PlaybackError(_) => "restart the timer",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SoundError::DeviceNotAvailable("no device".to_string());
        assert_eq!(err.to_string(), "Audio device not available: no device");

        let err = SoundError::FileNotFound("/path/to/bell.wav".to_string());
        assert!(err.to_string().contains("/path/to/bell.wav"));

        let err = SoundError::PlaybackError("unknown error".to_string());
        assert!(err.to_string().contains("unknown error"));
    }

    #[test]
    fn test_fallback_only_for_file_errors() {
        assert!(SoundError::FileNotFound("x".into()).should_fallback_to_chime());
        assert!(SoundError::DecodeError("x".into()).should_fallback_to_chime());
        assert!(!SoundError::StreamError("x".into()).should_fallback_to_chime());
        assert!(!SoundError::DeviceNotAvailable("x".into()).should_fallback_to_chime());
    }

    #[test]
    fn test_suggestion() {
        assert!(SoundError::DeviceNotAvailable("x".into())
            .suggestion()
            .contains("--no-sound"));
        assert!(SoundError::FileNotFound("x".into())
            .suggestion()
            .contains("chime"));
    }
}
