//! Notification system error types.

use thiserror::Error;

/// Errors that can occur while showing a visual alert.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// Failed to deliver the notification to the desktop.
    #[error("Failed to send notification: {0}")]
    SendFailed(String),
}

impl NotificationError {
    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::SendFailed(_) => {
                "check that a notification daemon is running, or run with --no-alert"
            }
        }
    }
}
