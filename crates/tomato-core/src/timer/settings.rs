//! Phase durations and cycle length.
//!
//! The controller trusts whatever it is given. Range checks live here and are
//! applied by the configuration layer before settings reach the controller.

use serde::{Deserialize, Serialize};

use super::Mode;

pub const WORK_MINUTES_MAX: u32 = 60;
pub const SHORT_BREAK_MINUTES_MAX: u32 = 30;
pub const LONG_BREAK_MINUTES_MAX: u32 = 60;
pub const ROUNDS_PER_CYCLE_MAX: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_work_minutes")]
    pub work_minutes: u32,
    #[serde(default = "default_short_break_minutes")]
    pub short_break_minutes: u32,
    #[serde(default = "default_long_break_minutes")]
    pub long_break_minutes: u32,
    #[serde(default = "default_rounds_per_cycle")]
    pub rounds_per_cycle: u32,
}

fn default_work_minutes() -> u32 {
    25
}
fn default_short_break_minutes() -> u32 {
    5
}
fn default_long_break_minutes() -> u32 {
    15
}
fn default_rounds_per_cycle() -> u32 {
    4
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            work_minutes: default_work_minutes(),
            short_break_minutes: default_short_break_minutes(),
            long_break_minutes: default_long_break_minutes(),
            rounds_per_cycle: default_rounds_per_cycle(),
        }
    }
}

impl Settings {
    pub fn new(work: u32, short_break: u32, long_break: u32, rounds: u32) -> Self {
        Self {
            work_minutes: work,
            short_break_minutes: short_break,
            long_break_minutes: long_break,
            rounds_per_cycle: rounds,
        }
    }

    pub fn minutes_for(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Work => self.work_minutes,
            Mode::ShortBreak => self.short_break_minutes,
            Mode::LongBreak => self.long_break_minutes,
        }
    }

    /// Full length of a phase in seconds.
    pub fn seconds_for(&self, mode: Mode) -> u32 {
        self.minutes_for(mode).saturating_mul(60)
    }

    /// Bring every field into range.
    ///
    /// Zero falls back to the field's default, anything above the ceiling is
    /// clamped to the ceiling.
    pub fn sanitized(self) -> Self {
        Self {
            work_minutes: bound(self.work_minutes, default_work_minutes(), WORK_MINUTES_MAX),
            short_break_minutes: bound(
                self.short_break_minutes,
                default_short_break_minutes(),
                SHORT_BREAK_MINUTES_MAX,
            ),
            long_break_minutes: bound(
                self.long_break_minutes,
                default_long_break_minutes(),
                LONG_BREAK_MINUTES_MAX,
            ),
            rounds_per_cycle: bound(
                self.rounds_per_cycle,
                default_rounds_per_cycle(),
                ROUNDS_PER_CYCLE_MAX,
            ),
        }
    }
}

fn bound(value: u32, fallback: u32, max: u32) -> u32 {
    if value == 0 {
        fallback
    } else {
        value.min(max)
    }
}
