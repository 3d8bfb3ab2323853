//! Interactive line commands read from stdin while the timer runs.

use thiserror::Error;

use crate::timer::SessionCommand;
use crate::types::coerce_minutes;

/// A parsed input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    /// Forward to the session
    Session(SessionCommand),
    /// Print the current state
    Status,
    /// Print the current state as JSON
    Json,
    /// Print the command list
    Help,
    /// Leave the program
    Quit,
}

/// Errors from parsing an input line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    /// The first word is not a known command
    #[error("Unknown command '{0}' (type 'help' for a list)")]
    UnknownCommand(String),

    /// A duration command was given without a value
    #[error("'{0}' needs a number of minutes, e.g. '{0} 25'")]
    MissingValue(&'static str),
}

/// Command list shown by `help`.
pub const HELP_TEXT: &str = "\
Commands:
  start | s            start the countdown
  pause | p            pause the countdown
  toggle | <enter>     start or pause
  reset | r            reload the current period
  focus <minutes>      set the focus duration
  break <minutes>      set the break duration
  remind <minutes>     set the reminder interval (0 = off)
  status               show the current state
  json                 show the current state as JSON
  help | ?             show this list
  quit | q             exit";

/// Parses one line of user input.
///
/// Minute values go through [`coerce_minutes`], so `focus abc` sets the
/// focus duration to the engine's floor rather than failing.
///
/// # Errors
///
/// Returns an error for unknown commands or duration commands with no value.
pub fn parse_line(line: &str) -> Result<InputCommand, InputError> {
    let mut words = line.split_whitespace();
    let Some(word) = words.next() else {
        return Ok(InputCommand::Session(SessionCommand::Toggle));
    };
    let value = words.next();
    let keyword = word.to_ascii_lowercase();

    let command = match keyword.as_str() {
        "start" | "s" => InputCommand::Session(SessionCommand::Start),
        "pause" | "p" => InputCommand::Session(SessionCommand::Pause),
        "toggle" | "t" => InputCommand::Session(SessionCommand::Toggle),
        "reset" | "r" => InputCommand::Session(SessionCommand::Reset),
        "focus" => InputCommand::Session(SessionCommand::SetFocusMinutes(minutes(
            "focus", value,
        )?)),
        "break" => InputCommand::Session(SessionCommand::SetBreakMinutes(minutes(
            "break", value,
        )?)),
        "remind" => InputCommand::Session(SessionCommand::SetReminderMinutes(minutes(
            "remind", value,
        )?)),
        "status" => InputCommand::Status,
        "json" => InputCommand::Json,
        "help" | "?" | "h" => InputCommand::Help,
        "quit" | "q" | "exit" => InputCommand::Quit,
        _ => return Err(InputError::UnknownCommand(word.to_string())),
    };
    Ok(command)
}

fn minutes(name: &'static str, value: Option<&str>) -> Result<u32, InputError> {
    value
        .map(coerce_minutes)
        .ok_or(InputError::MissingValue(name))
}
