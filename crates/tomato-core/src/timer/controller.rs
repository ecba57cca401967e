//! Session controller.
//!
//! A tick-driven state machine over the three phases. It owns no thread and
//! no timer: whoever holds it calls `tick()` once per second while it runs.
//!
//! ## Transitions on expiry
//!
//! ```text
//! Work (round < rounds)  -> ShortBreak, round + 1
//! Work (round >= rounds) -> LongBreak,  round = 1
//! ShortBreak | LongBreak -> Work
//! ```
//!
//! Expiry leaves `seconds_remaining` at 0 with the next mode selected. The
//! next `start()` loads that mode's full duration.
//!
//! ## Usage
//!
//! ```ignore
//! let mut controller = SessionController::new(Settings::default());
//! controller.start();
//! // Once per second:
//! if let Some(Event::PhaseCompleted { .. }) = controller.tick() { /* ... */ }
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Mode, Settings};
use crate::events::Event;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionController {
    settings: Settings,
    mode: Mode,
    seconds_remaining: u32,
    current_round: u32,
    is_running: bool,
    #[serde(default)]
    pending_transition: bool,
}

impl SessionController {
    /// Create a stopped controller at the top of a work phase, round 1.
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            mode: Mode::Work,
            seconds_remaining: settings.seconds_for(Mode::Work),
            current_round: 1,
            is_running: false,
            pending_transition: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    /// A phase expired and the next one has not been started yet.
    pub fn is_pending_transition(&self) -> bool {
        self.pending_transition
    }

    /// Full length of the current phase.
    pub fn total_seconds(&self) -> u32 {
        self.settings.seconds_for(self.mode)
    }

    /// 0.0 .. 100.0 share of the current phase already elapsed.
    pub fn progress_pct(&self) -> f64 {
        let total = self.total_seconds();
        if total == 0 {
            return 0.0;
        }
        let elapsed = total.saturating_sub(self.seconds_remaining);
        f64::from(elapsed) / f64::from(total) * 100.0
    }

    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            mode: self.mode,
            seconds_remaining: self.seconds_remaining,
            total_seconds: self.total_seconds(),
            current_round: self.current_round,
            rounds_per_cycle: self.settings.rounds_per_cycle,
            is_running: self.is_running,
            progress_pct: self.progress_pct(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Run the timer. After an expiry this loads the next phase first.
    pub fn start(&mut self) -> Option<Event> {
        if self.is_running {
            return None;
        }
        if self.pending_transition {
            self.pending_transition = false;
            self.seconds_remaining = self.total_seconds();
        }
        if self.seconds_remaining == 0 {
            return None;
        }
        self.is_running = true;
        debug!(mode = %self.mode, remaining = self.seconds_remaining, "timer started");
        Some(Event::TimerStarted {
            mode: self.mode,
            seconds_remaining: self.seconds_remaining,
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.is_running {
            return None;
        }
        self.is_running = false;
        debug!(mode = %self.mode, remaining = self.seconds_remaining, "timer paused");
        Some(Event::TimerPaused {
            mode: self.mode,
            seconds_remaining: self.seconds_remaining,
            at: Utc::now(),
        })
    }

    /// Start/pause button semantics.
    pub fn toggle(&mut self) -> Option<Event> {
        if self.is_running {
            self.pause()
        } else {
            self.start()
        }
    }

    /// Advance by one second. Returns `Some(Event::PhaseCompleted)` on expiry.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.is_running || self.seconds_remaining == 0 {
            return None;
        }
        self.seconds_remaining -= 1;
        if self.seconds_remaining > 0 {
            return None;
        }
        Some(self.expire())
    }

    pub fn reset(&mut self) -> Option<Event> {
        self.is_running = false;
        self.pending_transition = false;
        self.seconds_remaining = self.total_seconds();
        Some(Event::TimerReset {
            mode: self.mode,
            seconds_remaining: self.seconds_remaining,
            at: Utc::now(),
        })
    }

    /// Jump to another phase. The round counter is left alone.
    pub fn switch_mode(&mut self, mode: Mode) -> Option<Event> {
        let from = self.mode;
        self.mode = mode;
        self.is_running = false;
        self.pending_transition = false;
        self.seconds_remaining = self.total_seconds();
        debug!(%from, to = %mode, "mode switched");
        Some(Event::ModeSwitched {
            from,
            to: mode,
            seconds_remaining: self.seconds_remaining,
            at: Utc::now(),
        })
    }

    pub fn apply_settings(&mut self, settings: Settings) -> Option<Event> {
        self.settings = settings;
        self.is_running = false;
        self.pending_transition = false;
        self.seconds_remaining = self.total_seconds();
        // Shrinking the cycle must not strand the counter past its end.
        self.current_round = self.current_round.clamp(1, settings.rounds_per_cycle.max(1));
        Some(Event::SettingsApplied {
            settings,
            seconds_remaining: self.seconds_remaining,
            at: Utc::now(),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn expire(&mut self) -> Event {
        let completed = self.mode;
        let duration_min = self.settings.minutes_for(completed);
        let next = match completed {
            Mode::Work if self.current_round >= self.settings.rounds_per_cycle => {
                self.current_round = 1;
                Mode::LongBreak
            }
            Mode::Work => {
                self.current_round += 1;
                Mode::ShortBreak
            }
            Mode::ShortBreak | Mode::LongBreak => Mode::Work,
        };
        self.mode = next;
        self.is_running = false;
        self.pending_transition = true;
        debug!(%completed, %next, round = self.current_round, "phase completed");
        Event::PhaseCompleted {
            completed,
            next,
            round: self.current_round,
            duration_min,
            at: Utc::now(),
        }
    }
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
