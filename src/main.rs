//! Lychee Clock - a focus/break interval timer for the terminal
//!
//! Alternates focus and break periods, optionally chiming every few minutes
//! and raising a chime plus a desktop alert whenever a period ends.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tokio::sync::mpsc;
use tokio::time::Duration;
use tracing::{debug, warn};

use lychee_clock::cli::{parse_line, Cli, Commands, Display, InputCommand, RunArgs};
use lychee_clock::notification::DesktopAlertSender;
use lychee_clock::sound::{try_create_player, SoundSource};
use lychee_clock::timer::{ChannelSink, EventDispatcher, Session, SessionHandle, TimerEngine};

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if let Err(e) = execute(cli).await {
        Display::show_error(&e.to_string());
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
///
/// Logs go to stderr so stdout carries only timer output.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Run(args)) => run_timer(args).await?,
        Some(Commands::Completions { shell }) => generate_completions(shell),
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Runs an interactive timer session until quit, Ctrl-C or end of input.
async fn run_timer(args: RunArgs) -> Result<()> {
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let engine = TimerEngine::new(args.settings(), ChannelSink::new(event_tx));
    let (session, handle) = Session::new(engine, Duration::from_millis(args.tick_ms));

    let dispatcher = tokio::spawn(build_dispatcher(&args).run(event_rx));

    let initial = handle.snapshot();
    Display::show_welcome(&initial);
    if args.autostart {
        handle.start()?;
    }

    let session_task = tokio::spawn(session.run());

    let mut lines = spawn_stdin_reader();
    let mut snapshots = handle.subscribe();
    let mut input_open = true;
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            line = lines.recv(), if input_open => match line {
                Some(line) => {
                    if !handle_line(&handle, &line).await? {
                        break;
                    }
                }
                None => {
                    debug!("Input closed");
                    if !args.once {
                        break;
                    }
                    input_open = false;
                }
            },
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = *snapshots.borrow_and_update();
                Display::show_tick(&snapshot);
                if args.once && snapshot.mode != initial.mode {
                    break;
                }
            }
            _ = &mut ctrl_c => {
                debug!("Interrupted");
                break;
            }
        }
    }

    // The session may already be gone if its loop failed.
    let _ = handle.shutdown();
    drop(handle);
    let final_snapshot = session_task
        .await
        .context("Timer session task failed")??;
    dispatcher.await.context("Event dispatcher task failed")?;

    Display::show_goodbye(&final_snapshot);
    Ok(())
}

/// Builds the event dispatcher from the run flags.
fn build_dispatcher(args: &RunArgs) -> EventDispatcher {
    let mut dispatcher = EventDispatcher::new().with_echo(true);

    if !args.no_sound {
        if let Some(player) = try_create_player() {
            dispatcher = dispatcher.with_sound(player);
        }
        if let Some(path) = &args.sound_file {
            match SoundSource::from_path(path) {
                Ok(source) => dispatcher = dispatcher.with_elapsed_sound(source),
                Err(e) => warn!("Using built-in chime: {} ({})", e, e.suggestion()),
            }
        }
    }

    if !args.no_alert {
        dispatcher = dispatcher.with_alerts(Arc::new(DesktopAlertSender::new()));
    }

    dispatcher
}

/// Reads stdin lines on a plain thread.
///
/// A blocking stdin read cannot be cancelled, so it lives outside the
/// runtime and is simply abandoned on exit.
fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Handles one input line. Returns false when the user asked to quit.
async fn handle_line(handle: &SessionHandle, line: &str) -> Result<bool> {
    match parse_line(line) {
        Ok(InputCommand::Session(command)) => handle.send(command)?,
        Ok(InputCommand::Status) => Display::show_status(&handle.query().await?),
        Ok(InputCommand::Json) => Display::show_json(&handle.query().await?),
        Ok(InputCommand::Help) => Display::show_help(),
        Ok(InputCommand::Quit) => return Ok(false),
        Err(e) => Display::show_error(&e.to_string()),
    }
    Ok(true)
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
