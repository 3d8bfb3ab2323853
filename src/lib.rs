//! Lychee Clock Library
//!
//! This library provides the core functionality for the Lychee Clock CLI.
//! It includes:
//! - A pure timer engine alternating focus and break periods
//! - A session host that drives the engine from commands and a ticker
//! - Sound playback with a built-in chime
//! - Desktop alerts when a period ends
//! - CLI command parsing and display utilities
//! - Type definitions for settings and snapshots

pub mod cli;
pub mod notification;
pub mod sound;
pub mod timer;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{TimerMode, TimerSettings, TimerSnapshot};

// Re-export timer types
pub use timer::{
    ChannelSink, EventDispatcher, NotificationSink, Session, SessionCommand, SessionError,
    SessionHandle, TimerEngine, TimerEvent,
};

// Re-export sound types
pub use sound::{MockSoundPlayer, RodioSoundPlayer, SoundError, SoundPlayer, SoundSource};

// Re-export notification types
pub use notification::{
    Alert, AlertSender, DesktopAlertSender, MockAlertSender, NotificationError,
};
