//! Alert content construction.

use crate::types::TimerMode;

/// Application name shown by the desktop notification service.
pub const APP_NAME: &str = "Lychee Clock";

/// Text of a visual alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    /// Short headline
    pub title: String,
    /// Longer description
    pub body: String,
}

impl Alert {
    /// Alert shown when a period of `finished` mode elapses.
    pub fn period_finished(finished: TimerMode) -> Self {
        let body = match finished {
            TimerMode::Focus => "Time for a break. Start it when you are ready.",
            TimerMode::Break => "Break is over. Start the next focus period when you are ready.",
        };
        Self {
            title: format!("{} period finished!", finished.label()),
            body: body.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_finished_focus() {
        let alert = Alert::period_finished(TimerMode::Focus);
        assert_eq!(alert.title, "Focus period finished!");
        assert!(alert.body.contains("break"));
    }

    #[test]
    fn test_period_finished_break() {
        let alert = Alert::period_finished(TimerMode::Break);
        assert_eq!(alert.title, "Break period finished!");
        assert!(alert.body.contains("focus"));
    }
}
