//! Single-threaded driver for a [`Session`].
//!
//! Clock ticks and user commands arrive through one `select!` loop, so the
//! session only ever sees one mutation at a time. Commands win ties.

use std::fmt;
use std::str::FromStr;

use tokio::sync::mpsc;
use tracing::debug;

use super::Session;
use crate::error::Result;
use crate::events::Event;
use crate::notify::Notifier;
use crate::storage::KvStore;
use crate::timer::{Clock, Mode, Settings};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Toggle,
    Reset,
    Switch(Mode),
    /// Replace the timer settings. Stops the timer.
    Apply(Settings),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCommandError(String);

impl fmt::Display for ParseCommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown command '{}'", self.0)
    }
}

impl std::error::Error for ParseCommandError {}

impl FromStr for Command {
    type Err = ParseCommandError;

    /// Parses one line of interactive input. A blank line toggles.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim().to_lowercase();
        match line.as_str() {
            "" | "t" | "toggle" => Ok(Command::Toggle),
            "s" | "start" => Ok(Command::Start),
            "p" | "pause" => Ok(Command::Pause),
            "r" | "reset" => Ok(Command::Reset),
            "q" | "quit" | "exit" => Ok(Command::Quit),
            other => other
                .parse::<Mode>()
                .map(Command::Switch)
                .map_err(|_| ParseCommandError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Start the next phase right after an expiry.
    pub auto_advance: bool,
    /// Return once this many phases have completed.
    pub stop_after: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub phases_completed: u32,
    pub work_completed: u32,
}

impl<S: KvStore, N: Notifier> Session<S, N> {
    /// Apply one user command. `Quit` is handled by the loop and is a no-op here.
    pub fn apply(&mut self, command: Command) -> Option<Event> {
        match command {
            Command::Start => self.start(),
            Command::Pause => self.pause(),
            Command::Toggle => self.toggle(),
            Command::Reset => self.reset(),
            Command::Switch(mode) => self.switch_mode(mode),
            Command::Apply(settings) => self.apply_settings(settings),
            Command::Quit => None,
        }
    }
}

/// Drive `session` until `Quit`, a closed command channel, or
/// `options.stop_after` completed phases.
///
/// `render` runs once up front and after every command or tick, with the
/// event that change produced.
///
/// # Errors
/// Returns an error if the session fails to persist stats.
pub async fn run<S, N, C, F>(
    session: &mut Session<S, N>,
    clock: &mut C,
    commands: &mut mpsc::Receiver<Command>,
    options: RunOptions,
    mut render: F,
) -> Result<RunSummary>
where
    S: KvStore,
    N: Notifier,
    C: Clock,
    F: FnMut(&Session<S, N>, Option<&Event>),
{
    let mut summary = RunSummary::default();
    render(session, None);

    loop {
        if options
            .stop_after
            .is_some_and(|limit| summary.phases_completed >= limit)
        {
            break;
        }

        tokio::select! {
            biased;

            command = commands.recv() => {
                let command = match command {
                    Some(Command::Quit) | None => break,
                    Some(command) => command,
                };
                debug!(?command, "command received");
                let was_running = session.is_running();
                let event = session.apply(command);
                if !was_running && session.is_running() {
                    clock.resync();
                }
                render(session, event.as_ref());
            }

            _ = clock.next_tick(), if session.is_running() => {
                let event = session.tick()?;
                let expired = match &event {
                    Some(Event::PhaseCompleted { completed, .. }) => {
                        summary.phases_completed += 1;
                        if *completed == Mode::Work {
                            summary.work_completed += 1;
                        }
                        true
                    }
                    _ => false,
                };
                render(session, event.as_ref());

                let more = options
                    .stop_after
                    .map_or(true, |limit| summary.phases_completed < limit);
                if expired && options.auto_advance && more {
                    if let Some(started) = session.start() {
                        clock.resync();
                        render(session, Some(&started));
                    }
                }
            }
        }
    }

    Ok(summary)
}
