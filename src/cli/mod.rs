//! CLI module for the Lychee Clock.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive
//! - `input`: Interactive line commands read while the timer runs
//! - `display`: Output formatting and display logic

pub mod commands;
pub mod display;
pub mod input;

pub use commands::{Cli, Commands, RunArgs};
pub use display::Display;
pub use input::{parse_line, InputCommand, InputError, HELP_TEXT};
