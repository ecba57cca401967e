//! Aggregate pomodoro statistics.
//!
//! One JSON record under the `stats` key. Only completed work phases count.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;
use crate::storage::KvStore;
use crate::timer::Mode;

pub const STATS_KEY: &str = "stats";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    #[serde(default)]
    pub completed_pomodoros: u64,
    /// Minutes of completed work.
    #[serde(default)]
    pub total_work_time: u64,
    #[serde(default)]
    pub today_pomodoros: u64,
    /// Local date `today_pomodoros` belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub today: Option<NaiveDate>,
}

impl Stats {
    /// Read the record; missing or malformed data yields an empty record.
    pub fn load(store: &impl KvStore) -> Self {
        match store.get(STATS_KEY) {
            Ok(Some(json)) => Self::parse(&json).unwrap_or_else(|e| {
                warn!("discarding malformed stats record: {e}");
                Self::default()
            }),
            Ok(None) => Self::default(),
            Err(e) => {
                warn!("cannot read stats, starting empty: {e}");
                Self::default()
            }
        }
    }

    /// The record must be a JSON object; serde would otherwise accept an
    /// array as a positional struct.
    fn parse(json: &str) -> serde_json::Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if !value.is_object() {
            return Err(serde::de::Error::custom("stats record is not an object"));
        }
        serde_json::from_value(value)
    }

    pub fn save(&self, store: &impl KvStore) -> Result<()> {
        store.set(STATS_KEY, &serde_json::to_string(self)?)?;
        Ok(())
    }

    /// Count a completed phase. Returns whether anything changed.
    pub fn record_phase(&mut self, completed: Mode, duration_min: u32, on: NaiveDate) -> bool {
        if completed != Mode::Work {
            return false;
        }
        self.roll_over(on);
        self.completed_pomodoros += 1;
        self.today_pomodoros += 1;
        self.total_work_time += u64::from(duration_min);
        true
    }

    pub fn record_phase_now(&mut self, completed: Mode, duration_min: u32) -> bool {
        self.record_phase(completed, duration_min, Local::now().date_naive())
    }

    /// Pomodoros completed on `date`, zero if the record belongs to another day.
    pub fn today_count(&self, date: NaiveDate) -> u64 {
        match self.today {
            Some(day) if day != date => 0,
            _ => self.today_pomodoros,
        }
    }

    fn roll_over(&mut self, date: NaiveDate) {
        if self.today != Some(date) {
            if self.today.is_some() {
                self.today_pomodoros = 0;
            }
            self.today = Some(date);
        }
    }
}
