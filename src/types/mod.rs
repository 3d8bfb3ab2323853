//! Core data types for the Lychee Clock timer.
//!
//! This module defines the data structures used for:
//! - Timer mode (focus / break)
//! - Duration settings with clamping
//! - Read-only state snapshots for rendering
//! - Coercion of raw user input into minute values

use serde::{Deserialize, Serialize};

/// Seconds per minute.
pub const SECONDS_PER_MINUTE: u32 = 60;

/// Default focus duration in minutes.
pub const DEFAULT_FOCUS_MINUTES: u32 = 25;

/// Default break duration in minutes.
pub const DEFAULT_BREAK_MINUTES: u32 = 5;

/// Default reminder interval in minutes (disabled).
pub const DEFAULT_REMINDER_MINUTES: u32 = 0;

// ============================================================================
// TimerMode
// ============================================================================

/// The kind of period the timer is counting down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerMode {
    /// Focused work period
    #[default]
    Focus,
    /// Rest period
    Break,
}

impl TimerMode {
    /// Returns the string representation of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerMode::Focus => "focus",
            TimerMode::Break => "break",
        }
    }

    /// Returns a capitalized label for display.
    pub fn label(&self) -> &'static str {
        match self {
            TimerMode::Focus => "Focus",
            TimerMode::Break => "Break",
        }
    }

    /// Returns the mode that follows this one.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            TimerMode::Focus => TimerMode::Break,
            TimerMode::Break => TimerMode::Focus,
        }
    }
}

impl std::fmt::Display for TimerMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// TimerSettings
// ============================================================================

/// Duration settings for the timer.
///
/// Focus and break durations are always at least one minute. A reminder
/// interval of zero disables periodic reminders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSettings {
    /// Focus duration in minutes (>= 1)
    pub focus_minutes: u32,
    /// Break duration in minutes (>= 1)
    pub break_minutes: u32,
    /// Reminder interval in minutes (0 = disabled)
    pub reminder_minutes: u32,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            focus_minutes: DEFAULT_FOCUS_MINUTES,
            break_minutes: DEFAULT_BREAK_MINUTES,
            reminder_minutes: DEFAULT_REMINDER_MINUTES,
        }
    }
}

impl TimerSettings {
    /// Returns settings with the focus duration set (clamped to >= 1).
    pub fn with_focus_minutes(mut self, minutes: u32) -> Self {
        self.focus_minutes = clamp_period_minutes(minutes);
        self
    }

    /// Returns settings with the break duration set (clamped to >= 1).
    pub fn with_break_minutes(mut self, minutes: u32) -> Self {
        self.break_minutes = clamp_period_minutes(minutes);
        self
    }

    /// Returns settings with the reminder interval set (0 disables).
    pub fn with_reminder_minutes(mut self, minutes: u32) -> Self {
        self.reminder_minutes = clamp_reminder_minutes(minutes);
        self
    }

    /// Returns a copy with every field forced into its valid range.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            focus_minutes: clamp_period_minutes(self.focus_minutes),
            break_minutes: clamp_period_minutes(self.break_minutes),
            reminder_minutes: clamp_reminder_minutes(self.reminder_minutes),
        }
    }

    /// Returns the configured duration for `mode` in minutes.
    pub fn minutes_for(&self, mode: TimerMode) -> u32 {
        match mode {
            TimerMode::Focus => self.focus_minutes,
            TimerMode::Break => self.break_minutes,
        }
    }

    /// Returns the full period length for `mode` in seconds.
    pub fn period_seconds(&self, mode: TimerMode) -> u32 {
        self.minutes_for(mode).saturating_mul(SECONDS_PER_MINUTE)
    }

    /// Returns the reminder interval in seconds, or `None` when disabled.
    pub fn reminder_interval_seconds(&self) -> Option<u32> {
        match self.reminder_minutes {
            0 => None,
            minutes => Some(minutes.saturating_mul(SECONDS_PER_MINUTE)),
        }
    }
}

/// Largest minute value whose length in seconds fits in a `u32`.
pub const MAX_MINUTES: u32 = u32::MAX / SECONDS_PER_MINUTE;

/// Clamps a focus/break duration to `1..=MAX_MINUTES`.
pub fn clamp_period_minutes(minutes: u32) -> u32 {
    minutes.clamp(1, MAX_MINUTES)
}

/// Clamps a reminder interval to `0..=MAX_MINUTES`.
pub fn clamp_reminder_minutes(minutes: u32) -> u32 {
    minutes.min(MAX_MINUTES)
}

// ============================================================================
// TimerSnapshot
// ============================================================================

/// Read-only view of the timer for rendering and status queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    /// Current mode
    pub mode: TimerMode,
    /// Seconds left in the current period
    pub remaining_seconds: u32,
    /// Whether the countdown is active
    pub running: bool,
    /// Focus duration in minutes
    pub focus_minutes: u32,
    /// Break duration in minutes
    pub break_minutes: u32,
    /// Reminder interval in minutes
    pub reminder_minutes: u32,
}

impl Default for TimerSnapshot {
    fn default() -> Self {
        let settings = TimerSettings::default();
        Self {
            mode: TimerMode::Focus,
            remaining_seconds: settings.period_seconds(TimerMode::Focus),
            running: false,
            focus_minutes: settings.focus_minutes,
            break_minutes: settings.break_minutes,
            reminder_minutes: settings.reminder_minutes,
        }
    }
}

impl TimerSnapshot {
    /// Returns the remaining time formatted as `MM:SS`.
    pub fn clock(&self) -> String {
        format_clock(self.remaining_seconds)
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Formats seconds as a zero-padded `MM:SS` clock.
///
/// Minutes are not wrapped into hours, so 100 minutes renders as `100:00`.
pub fn format_clock(total_seconds: u32) -> String {
    let minutes = total_seconds / SECONDS_PER_MINUTE;
    let seconds = total_seconds % SECONDS_PER_MINUTE;
    format!("{:02}:{:02}", minutes, seconds)
}

/// Coerces raw user input into a minute value.
///
/// Takes the leading run of decimal digits after optional whitespace and an
/// optional `+`. Empty, non-numeric and negative input yields 0, as does a
/// value too large for `u32`. The engine clamps the result further.
pub fn coerce_minutes(input: &str) -> u32 {
    let trimmed = input.trim_start();
    if trimmed.starts_with('-') {
        return 0;
    }
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits: &str = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .map_or(unsigned, |end| &unsigned[..end]);

    digits.parse().unwrap_or(0)
}

// ============================================================================
// Tests
// ============================================================================
