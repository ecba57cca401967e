//! Tick sources for the session controller.
//!
//! The controller never looks at the wall clock. A `Clock` decides when the
//! next one-second tick is due, which lets tests drive whole phases without
//! waiting.

use std::future::{self, Future};
use std::time::Duration;

use tokio::time::{self, Instant, Interval, MissedTickBehavior};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

pub trait Clock {
    /// Resolves when the next tick is due.
    fn next_tick(&mut self) -> impl Future<Output = ()>;

    /// Called when the timer (re)starts so the first tick lands one period later.
    fn resync(&mut self) {}
}

/// Real-time clock backed by a tokio interval.
#[derive(Debug)]
pub struct IntervalClock {
    interval: Interval,
}

impl IntervalClock {
    pub fn new(period: Duration) -> Self {
        // interval() would fire immediately; the first tick is one period out.
        let mut interval = time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }

    pub fn every_second() -> Self {
        Self::new(TICK_PERIOD)
    }
}

impl Clock for IntervalClock {
    async fn next_tick(&mut self) {
        self.interval.tick().await;
    }

    fn resync(&mut self) {
        self.interval.reset();
    }
}

/// A clock whose next tick is always due.
#[derive(Debug, Default, Clone, Copy)]
pub struct InstantClock;

impl Clock for InstantClock {
    fn next_tick(&mut self) -> impl Future<Output = ()> {
        future::ready(())
    }
}
