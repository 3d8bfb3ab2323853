//! Command definitions for the Lychee Clock CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::types::{
    TimerSettings, DEFAULT_BREAK_MINUTES, DEFAULT_FOCUS_MINUTES, DEFAULT_REMINDER_MINUTES,
};

// ============================================================================
// CLI Structure
// ============================================================================

/// Lychee Clock - a focus/break interval timer for the terminal
#[derive(Parser, Debug)]
#[command(
    name = "lychee",
    version,
    about = "Focus/break interval timer with periodic reminders",
    long_about = "A terminal interval timer that alternates focus and break periods.\n\
                  Plays a chime every N minutes if asked to, and a chime plus a desktop\n\
                  alert when a period ends.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the timer interactively in this terminal
    Run(RunArgs),

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Run Command Arguments
// ============================================================================

/// Arguments for the run command
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Focus duration in minutes (values below 1 become 1)
    #[arg(short, long, default_value_t = DEFAULT_FOCUS_MINUTES)]
    pub focus: u32,

    /// Break duration in minutes (values below 1 become 1)
    #[arg(short, long, default_value_t = DEFAULT_BREAK_MINUTES)]
    pub break_time: u32,

    /// Reminder interval in minutes (0 disables reminders)
    #[arg(short, long, default_value_t = DEFAULT_REMINDER_MINUTES)]
    pub remind: u32,

    /// Start the first focus period immediately
    #[arg(short, long)]
    pub autostart: bool,

    /// Exit after the first period ends
    #[arg(long)]
    pub once: bool,

    /// Disable notification sounds
    #[arg(long)]
    pub no_sound: bool,

    /// Disable desktop alerts
    #[arg(long)]
    pub no_alert: bool,

    /// Audio file to play when a period ends (wav, mp3, flac, ogg)
    #[arg(long, value_name = "PATH")]
    pub sound_file: Option<PathBuf>,

    /// Tick period in milliseconds
    #[arg(
        long,
        hide = true,
        default_value_t = 1000,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub tick_ms: u64,
}

impl RunArgs {
    /// Returns the clamped timer settings requested on the command line.
    pub fn settings(&self) -> TimerSettings {
        TimerSettings {
            focus_minutes: self.focus,
            break_minutes: self.break_time,
            reminder_minutes: self.remind,
        }
        .clamped()
    }
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            focus: DEFAULT_FOCUS_MINUTES,
            break_time: DEFAULT_BREAK_MINUTES,
            remind: DEFAULT_REMINDER_MINUTES,
            autostart: false,
            once: false,
            no_sound: false,
            no_alert: false,
            sound_file: None,
            tick_ms: 1000,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // Cli Tests
    // ------------------------------------------------------------------------

    mod cli_tests {
        use super::*;

        #[test]
        fn test_parse_no_args() {
            let cli = Cli::parse_from(["lychee"]);
            assert!(cli.command.is_none());
            assert!(!cli.verbose);
        }

        #[test]
        fn test_parse_verbose_flag() {
            let cli = Cli::parse_from(["lychee", "--verbose"]);
            assert!(cli.verbose);

            let cli = Cli::parse_from(["lychee", "run", "-v"]);
            assert!(cli.verbose);
        }

        #[test]
        fn test_parse_run_command() {
            let cli = Cli::parse_from(["lychee", "run"]);
            assert!(matches!(cli.command, Some(Commands::Run(_))));
        }

        #[test]
        fn test_parse_completions_bash() {
            let cli = Cli::parse_from(["lychee", "completions", "bash"]);
            match cli.command {
                Some(Commands::Completions { shell }) => {
                    assert_eq!(shell, clap_complete::Shell::Bash);
                }
                _ => panic!("Expected Completions command"),
            }
        }

        #[test]
        fn test_parse_unknown_command_fails() {
            let result = Cli::try_parse_from(["lychee", "explode"]);
            assert!(result.is_err());
        }
    }

    // ------------------------------------------------------------------------
    // RunArgs Tests
    // ------------------------------------------------------------------------

    mod run_args_tests {
        use super::*;

        fn parse_run(args: &[&str]) -> RunArgs {
            let mut argv = vec!["lychee", "run"];
            argv.extend_from_slice(args);
            match Cli::parse_from(argv).command {
                Some(Commands::Run(args)) => args,
                _ => panic!("Expected Run command"),
            }
        }

        #[test]
        fn test_defaults() {
            let args = parse_run(&[]);
            assert_eq!(args.focus, 25);
            assert_eq!(args.break_time, 5);
            assert_eq!(args.remind, 0);
            assert!(!args.autostart);
            assert!(!args.once);
            assert!(!args.no_sound);
            assert!(!args.no_alert);
            assert!(args.sound_file.is_none());
            assert_eq!(args.tick_ms, 1000);
        }

        #[test]
        fn test_long_options() {
            let args = parse_run(&[
                "--focus",
                "50",
                "--break-time",
                "10",
                "--remind",
                "15",
                "--autostart",
                "--once",
                "--no-sound",
                "--no-alert",
                "--sound-file",
                "/tmp/bell.wav",
            ]);
            assert_eq!(args.focus, 50);
            assert_eq!(args.break_time, 10);
            assert_eq!(args.remind, 15);
            assert!(args.autostart);
            assert!(args.once);
            assert!(args.no_sound);
            assert!(args.no_alert);
            assert_eq!(args.sound_file, Some(PathBuf::from("/tmp/bell.wav")));
        }

        #[test]
        fn test_short_options() {
            let args = parse_run(&["-f", "30", "-b", "7", "-r", "10", "-a"]);
            assert_eq!(args.focus, 30);
            assert_eq!(args.break_time, 7);
            assert_eq!(args.remind, 10);
            assert!(args.autostart);
        }

        #[test]
        fn test_zero_durations_are_clamped_in_settings() {
            let args = parse_run(&["--focus", "0", "--break-time", "0"]);
            let settings = args.settings();
            assert_eq!(settings.focus_minutes, 1);
            assert_eq!(settings.break_minutes, 1);
        }

        #[test]
        fn test_negative_duration_rejected() {
            let result = Cli::try_parse_from(["lychee", "run", "--focus", "-5"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_zero_tick_rejected() {
            let result = Cli::try_parse_from(["lychee", "run", "--tick-ms", "0"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_default_impl_matches_parser() {
            let parsed = parse_run(&[]);
            let default = RunArgs::default();
            assert_eq!(parsed.settings(), default.settings());
            assert_eq!(parsed.tick_ms, default.tick_ms);
        }
    }
}
