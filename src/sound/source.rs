//! Sound source management.
//!
//! A sound is either the synthesized chime or a user supplied audio file.

use std::path::{Path, PathBuf};

use super::error::SoundError;

/// Audio file extensions rodio can decode with its default features.
const SUPPORTED_EXTENSIONS: &[&str] = &["wav", "mp3", "flac", "ogg"];

/// Represents the source of a sound to be played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundSource {
    /// The synthesized double beep.
    Chime {
        /// Name used in logs (e.g., "reminder").
        name: String,
    },
    /// An audio file on disk.
    File {
        /// The name of the sound (the file stem).
        name: String,
        /// The full path to the sound file.
        path: PathBuf,
    },
}

impl SoundSource {
    /// Creates a chime source.
    #[must_use]
    pub fn chime(name: impl Into<String>) -> Self {
        Self::Chime { name: name.into() }
    }

    /// Chime played for periodic reminders.
    #[must_use]
    pub fn reminder_chime() -> Self {
        Self::chime("reminder")
    }

    /// Chime played when a period elapses.
    #[must_use]
    pub fn elapsed_chime() -> Self {
        Self::chime("elapsed")
    }

    /// Creates a file source without checking the path.
    #[must_use]
    pub fn file(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::File {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Creates a file source after checking that `path` is a readable audio file.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::FileNotFound` if the path is not a file, or
    /// `SoundError::DecodeError` if the extension is not a supported format.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SoundError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(SoundError::FileNotFound(path.display().to_string()));
        }

        let ext = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if !SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
            return Err(SoundError::DecodeError(format!(
                "unsupported format '{}' for {}",
                ext,
                path.display()
            )));
        }

        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "custom".to_string());

        Ok(Self::file(name, path))
    }

    /// Returns the name of the sound source.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Chime { name } | Self::File { name, .. } => name,
        }
    }

    /// Returns true if this is the synthesized chime.
    #[must_use]
    pub fn is_chime(&self) -> bool {
        matches!(self, Self::Chime { .. })
    }

    /// Returns the file path if this is a file source.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File { path, .. } => Some(path),
            Self::Chime { .. } => None,
        }
    }
}
