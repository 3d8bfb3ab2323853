//! Visual alerts for elapsed periods.
//!
//! This module provides:
//!
//! - The [`AlertSender`] trait used by the event dispatcher
//! - [`DesktopAlertSender`], backed by the desktop notification service
//! - [`MockAlertSender`] for tests
//!
//! # Example
//!
//! ```rust,no_run
//! use lychee_clock::notification::{Alert, AlertSender, DesktopAlertSender};
//! use lychee_clock::types::TimerMode;
//!
//! let sender = DesktopAlertSender::new();
//! sender
//!     .send(&Alert::period_finished(TimerMode::Focus))
//!     .expect("notification failed");
//! ```

mod content;
pub mod error;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use notify_rust::{Notification, Timeout};
use tracing::debug;

pub use self::content::{Alert, APP_NAME};
pub use self::error::NotificationError;

/// Trait for showing visual alerts.
///
/// Implementations may block; callers run them off the async runtime.
pub trait AlertSender {
    /// Shows `alert` to the user.
    ///
    /// # Errors
    ///
    /// Returns an error if the alert cannot be delivered.
    fn send(&self, alert: &Alert) -> Result<(), NotificationError>;
}

/// Sends alerts through the desktop notification service.
///
/// Alerts stay on screen until dismissed.
#[derive(Debug, Clone, Copy, Default)]
pub struct DesktopAlertSender;

impl DesktopAlertSender {
    /// Creates a sender for the app name [`APP_NAME`].
    pub fn new() -> Self {
        Self
    }
}

impl AlertSender for DesktopAlertSender {
    fn send(&self, alert: &Alert) -> Result<(), NotificationError> {
        debug!(title = %alert.title, "Showing desktop alert");
        Notification::new()
            .appname(APP_NAME)
            .summary(&alert.title)
            .body(&alert.body)
            .timeout(Timeout::Never)
            .show()
            .map(|_| ())
            .map_err(|e| NotificationError::SendFailed(e.to_string()))
    }
}

/// Mock alert sender for testing.
#[derive(Debug, Default)]
pub struct MockAlertSender {
    alerts: Mutex<Vec<Alert>>,
    should_fail: AtomicBool,
}

impl MockAlertSender {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn get_alerts(&self) -> Vec<Alert> {
        self.alerts.lock().unwrap().clone()
    }

    #[must_use]
    pub fn alert_count(&self) -> usize {
        self.alerts.lock().unwrap().len()
    }
}

impl AlertSender for MockAlertSender {
    fn send(&self, alert: &Alert) -> Result<(), NotificationError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(NotificationError::SendFailed("Mock failure".to_string()));
        }
        self.alerts.lock().unwrap().push(alert.clone());
        Ok(())
    }
}
