use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{Mode, Settings};

/// Every state change of the session controller produces an Event.
/// Front-ends render them; the session host reacts to `PhaseCompleted`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        mode: Mode,
        seconds_remaining: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        mode: Mode,
        seconds_remaining: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        mode: Mode,
        seconds_remaining: u32,
        at: DateTime<Utc>,
    },
    ModeSwitched {
        from: Mode,
        to: Mode,
        seconds_remaining: u32,
        at: DateTime<Utc>,
    },
    SettingsApplied {
        settings: Settings,
        seconds_remaining: u32,
        at: DateTime<Utc>,
    },
    /// A phase ran down to zero. `round` is the round number after the transition.
    PhaseCompleted {
        completed: Mode,
        next: Mode,
        round: u32,
        duration_min: u32,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        mode: Mode,
        seconds_remaining: u32,
        total_seconds: u32,
        current_round: u32,
        rounds_per_cycle: u32,
        is_running: bool,
        progress_pct: f64,
        at: DateTime<Utc>,
    },
}
