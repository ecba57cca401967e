//! Foreground countdown.
//!
//! The session lives only as long as this process. Stats and tasks go to the
//! database; the timer state is thrown away on exit.

use std::io::{BufRead, Write};

use clap::Subcommand;
use tokio::sync::mpsc;
use tomato_core::session::run as run_session;
use tomato_core::timer::{format_clock, title_line};
use tomato_core::{
    Command, Config, Database, Event, IntervalClock, KvStore, Mode, Notifier, Notifiers,
    RunOptions, Session, SessionController,
};
use tracing::{debug, info, warn};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run the countdown in the foreground.
    ///
    /// Type a command and press Enter while it runs: start, pause, reset,
    /// work, short, long, reload, quit. An empty line toggles start/pause.
    /// `reload` re-reads config.toml and applies its timer settings.
    Run {
        /// Phase to begin with
        #[arg(long, default_value = "work")]
        mode: Mode,
        /// Start each phase as soon as the previous one ends
        #[arg(long)]
        auto_advance: bool,
        /// Exit after this many completed phases
        #[arg(long)]
        phases: Option<u32>,
    },
    /// Print the initial timer state for the current settings as JSON
    Preview,
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    match action {
        TimerAction::Run {
            mode,
            auto_advance,
            phases,
        } => {
            let options = RunOptions {
                auto_advance: auto_advance || config.auto_advance,
                stop_after: phases,
            };
            run_foreground(&config, mode, options)
        }
        TimerAction::Preview => {
            let controller = SessionController::new(config.timer);
            println!("{}", serde_json::to_string_pretty(&controller.snapshot())?);
            Ok(())
        }
    }
}

fn run_foreground(
    config: &Config,
    mode: Mode,
    options: RunOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let notifier = Notifiers::from_config(&config.notifications);
    let mut session = Session::open(config.timer, db, notifier);
    if mode != session.controller().mode() {
        session.switch_mode(mode);
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        let (tx, mut rx) = mpsc::channel(16);
        tx.send(Command::Start).await?;
        spawn_stdin_reader(tx.clone());

        // Holding a sender here keeps the loop alive after stdin closes.
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                let _ = tx.send(Command::Quit).await;
            }
        });

        println!("{}", session.quote());
        let mut clock = IntervalClock::every_second();
        let summary =
            run_session(&mut session, &mut clock, &mut rx, options, |s, event| render(s, event))
                .await?;
        println!();
        info!(
            phases = summary.phases_completed,
            pomodoros = summary.work_completed,
            "timer stopped"
        );
        println!(
            "{} phase(s) completed, {} pomodoro(s)",
            summary.phases_completed, summary.work_completed
        );
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

/// `reload` needs the config file, so it is resolved here rather than in core.
fn parse_line(line: &str) -> Result<Command, Box<dyn std::error::Error>> {
    if line.trim().eq_ignore_ascii_case("reload") {
        let config = Config::load()?;
        return Ok(Command::Apply(config.timer));
    }
    Ok(line.parse::<Command>()?)
}

/// Blocking stdin on a plain thread, as tokio recommends for interactive input.
fn spawn_stdin_reader(tx: mpsc::Sender<Command>) {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match parse_line(&line) {
                Ok(command) => {
                    if tx.blocking_send(command).is_err() {
                        break;
                    }
                }
                Err(e) => warn!("{e}"),
            }
        }
    });
}

fn render<S: KvStore, N: Notifier>(session: &Session<S, N>, event: Option<&Event>) {
    if let Err(e) = write_status(session, event) {
        debug!("status write failed: {e}");
    }
}

fn write_status<S: KvStore, N: Notifier>(
    session: &Session<S, N>,
    event: Option<&Event>,
) -> std::io::Result<()> {
    let c = session.controller();
    let mut out = std::io::stdout().lock();

    if let Some(Event::PhaseCompleted {
        completed,
        next,
        duration_min,
        ..
    }) = event
    {
        writeln!(
            out,
            "\r{} done ({} min). Up next: {} ({}).",
            completed.label(),
            duration_min,
            next.label(),
            format_clock(c.total_seconds()),
        )?;
        writeln!(out, "{}", session.quote())?;
    }
    if let Some(Event::SettingsApplied { .. }) = event {
        writeln!(out, "\rSettings reloaded.")?;
    }

    let state = if c.is_running() { "" } else { "  [paused]" };
    write!(
        out,
        "\r{}  round {}/{}  {:>3.0}%{state}      ",
        title_line(c.seconds_remaining(), c.mode()),
        c.current_round(),
        c.settings().rounds_per_cycle,
        c.progress_pct(),
    )?;
    out.flush()
}
