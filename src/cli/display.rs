//! Display utilities for the Lychee Clock CLI.
//!
//! This module provides formatted output for:
//! - The live countdown line
//! - Status queries (text and JSON)
//! - Reminder and end-of-period messages
//! - Error messages

use std::io::{IsTerminal, Write};

use crate::types::{format_clock, TimerMode, TimerSnapshot};

use super::input::HELP_TEXT;

/// Clears the current terminal line.
const CLEAR_LINE: &str = "\r\x1b[K";

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Shows the startup banner.
    pub fn show_welcome(snapshot: &TimerSnapshot) {
        println!("Lychee Clock");
        println!("─────────────────────────────");
        println!("{}", Self::format_settings(snapshot));
        println!("Type 'help' for commands, <enter> to start or pause.");
        Self::show_status(snapshot);
    }

    /// Shows the current state on its own line.
    pub fn show_status(snapshot: &TimerSnapshot) {
        println!("{}{}", Self::prefix(), Self::format_status(snapshot));
    }

    /// Shows the current state as a single JSON object.
    pub fn show_json(snapshot: &TimerSnapshot) {
        match serde_json::to_string(snapshot) {
            Ok(json) => println!("{}{}", Self::prefix(), json),
            Err(e) => Self::show_error(&format!("Failed to serialize state: {}", e)),
        }
    }

    /// Redraws the countdown in place when attached to a terminal.
    pub fn show_tick(snapshot: &TimerSnapshot) {
        let mut stdout = std::io::stdout();
        if !stdout.is_terminal() {
            return;
        }
        let _ = write!(stdout, "{}{}", CLEAR_LINE, Self::format_status(snapshot));
        let _ = stdout.flush();
    }

    /// Shows a periodic reminder.
    pub fn show_reminder(mode: TimerMode, elapsed_seconds: u32) {
        println!(
            "{}~ Reminder: {} elapsed in this {} period",
            Self::prefix(),
            format_clock(elapsed_seconds),
            mode.as_str()
        );
    }

    /// Shows the end of a period.
    pub fn show_elapsed(finished: TimerMode, next: TimerMode) {
        println!(
            "{}* {} period finished! {} is ready; type 'start' to begin.",
            Self::prefix(),
            finished.label(),
            next.label()
        );
    }

    /// Shows the command list.
    pub fn show_help() {
        println!("{}{}", Self::prefix(), HELP_TEXT);
    }

    /// Shows the final state on exit.
    pub fn show_goodbye(snapshot: &TimerSnapshot) {
        println!(
            "{}Stopped at {} in {} mode.",
            Self::prefix(),
            snapshot.clock(),
            snapshot.mode.as_str()
        );
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("Error: {}", message);
    }

    /// Formats the one-line status, e.g. `[Focus] 24:59 running`.
    pub fn format_status(snapshot: &TimerSnapshot) -> String {
        let state = if snapshot.running {
            "running"
        } else {
            "paused"
        };
        format!("[{}] {} {}", snapshot.mode.label(), snapshot.clock(), state)
    }

    /// Formats the configured durations.
    pub fn format_settings(snapshot: &TimerSnapshot) -> String {
        let reminder = match snapshot.reminder_minutes {
            0 => "off".to_string(),
            minutes => format!("every {}m", minutes),
        };
        format!(
            "Focus {}m / Break {}m / Reminder {}",
            snapshot.focus_minutes, snapshot.break_minutes, reminder
        )
    }

    fn prefix() -> &'static str {
        if std::io::stdout().is_terminal() {
            CLEAR_LINE
        } else {
            ""
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn create_snapshot(running: bool, remaining_seconds: u32) -> TimerSnapshot {
        TimerSnapshot {
            running,
            remaining_seconds,
            ..TimerSnapshot::default()
        }
    }

    mod format_tests {
        use super::*;

        #[test]
        fn test_format_status_paused() {
            let snapshot = create_snapshot(false, 1500);
            assert_eq!(Display::format_status(&snapshot), "[Focus] 25:00 paused");
        }

        #[test]
        fn test_format_status_running_break() {
            let snapshot = TimerSnapshot {
                mode: TimerMode::Break,
                ..create_snapshot(true, 299)
            };
            assert_eq!(Display::format_status(&snapshot), "[Break] 04:59 running");
        }

        #[test]
        fn test_format_settings_reminder_off() {
            let snapshot = TimerSnapshot::default();
            assert_eq!(
                Display::format_settings(&snapshot),
                "Focus 25m / Break 5m / Reminder off"
            );
        }

        #[test]
        fn test_format_settings_reminder_on() {
            let snapshot = TimerSnapshot {
                reminder_minutes: 10,
                ..TimerSnapshot::default()
            };
            assert!(Display::format_settings(&snapshot).ends_with("Reminder every 10m"));
        }
    }

    mod output_tests {
        use super::*;

        // These only verify that nothing panics when printing.

        #[test]
        fn test_show_functions_do_not_panic() {
            let snapshot = create_snapshot(true, 42);
            Display::show_welcome(&snapshot);
            Display::show_status(&snapshot);
            Display::show_json(&snapshot);
            Display::show_tick(&snapshot);
            Display::show_reminder(TimerMode::Focus, 300);
            Display::show_elapsed(TimerMode::Focus, TimerMode::Break);
            Display::show_help();
            Display::show_goodbye(&snapshot);
            Display::show_error("test error");
        }
    }
}
