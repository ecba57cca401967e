//! Session host.
//!
//! Owns the controller together with everything that reacts to it: stats,
//! the task list, the current quote, the store and the notifier. It is the
//! only writer of all of them, so nothing here needs a lock.

pub mod runner;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::error::Result;
use crate::events::Event;
use crate::notify::{Cue, Notifier};
use crate::quotes::random_quote;
use crate::stats::Stats;
use crate::storage::KvStore;
use crate::tasks::{Task, TaskList};
use crate::timer::{Mode, SessionController, Settings};

pub use runner::{run, Command, RunOptions, RunSummary};

pub struct Session<S: KvStore, N: Notifier> {
    controller: SessionController,
    stats: Stats,
    tasks: TaskList,
    quote: &'static str,
    store: S,
    notifier: N,
    rng: StdRng,
}

impl<S: KvStore, N: Notifier> Session<S, N> {
    /// Load stats and tasks from `store` and start a fresh controller.
    pub fn open(settings: Settings, store: S, notifier: N) -> Self {
        Self::open_with_rng(settings, store, notifier, StdRng::from_entropy())
    }

    pub fn open_with_rng(settings: Settings, store: S, notifier: N, mut rng: StdRng) -> Self {
        let stats = Stats::load(&store);
        let tasks = TaskList::load(&store);
        let quote = random_quote(&mut rng);
        Self {
            controller: SessionController::new(settings),
            stats,
            tasks,
            quote,
            store,
            notifier,
            rng,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn controller(&self) -> &SessionController {
        &self.controller
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn quote(&self) -> &'static str {
        self.quote
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_running(&self) -> bool {
        self.controller.is_running()
    }

    // ── Timer ────────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        let event = self.controller.start();
        if event.is_some() {
            self.notifier.cue(Cue::Start);
        }
        event
    }

    pub fn pause(&mut self) -> Option<Event> {
        self.controller.pause()
    }

    pub fn toggle(&mut self) -> Option<Event> {
        if self.controller.is_running() {
            self.pause()
        } else {
            self.start()
        }
    }

    pub fn reset(&mut self) -> Option<Event> {
        let event = self.controller.reset();
        self.notifier.cue(Cue::Reset);
        event
    }

    pub fn switch_mode(&mut self, mode: Mode) -> Option<Event> {
        let event = self.controller.switch_mode(mode);
        self.notifier.cue(Cue::Switch);
        event
    }

    pub fn apply_settings(&mut self, settings: Settings) -> Option<Event> {
        info!(?settings, "settings applied");
        self.controller.apply_settings(settings)
    }

    /// Advance one second; on expiry update stats and notify.
    ///
    /// # Errors
    /// Returns an error if the stats record cannot be written.
    pub fn tick(&mut self) -> Result<Option<Event>> {
        let event = self.controller.tick();
        if let Some(Event::PhaseCompleted {
            completed,
            next,
            round,
            duration_min,
            ..
        }) = &event
        {
            info!(%completed, %next, round, "phase completed");
            if self.stats.record_phase_now(*completed, *duration_min) {
                self.stats.save(&self.store)?;
            }
            self.notifier.cue(Cue::Complete);
            self.notifier.phase_completed(*completed, *next);
            self.quote = random_quote(&mut self.rng);
        }
        Ok(event)
    }

    // ── Tasks ────────────────────────────────────────────────────────

    /// Add a task; blank text is ignored and returns `None`.
    pub fn add_task(&mut self, text: &str) -> Result<Option<Task>> {
        let Some(task) = self.tasks.add(text).cloned() else {
            return Ok(None);
        };
        self.tasks.save(&self.store)?;
        Ok(Some(task))
    }

    pub fn toggle_task(&mut self, id: u64) -> Result<bool> {
        if !self.tasks.toggle(id) {
            return Ok(false);
        }
        self.tasks.save(&self.store)?;
        Ok(true)
    }

    pub fn delete_task(&mut self, id: u64) -> Result<bool> {
        if !self.tasks.delete(id) {
            return Ok(false);
        }
        self.tasks.save(&self.store)?;
        Ok(true)
    }
}
