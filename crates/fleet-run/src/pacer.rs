//! Wall-clock pacing for the tick loop.
//!
//! The coordinator never sleeps on its own; after each tick it hands control
//! to a `Pacer`.  Production runs use [`IntervalPacer`] to hold the fixed
//! tick period; tests use [`NoPacer`] and the loop runs as fast as it can,
//! fully deterministic.

use std::time::{Duration, Instant};

use fleet_core::Tick;

/// Controls how much wall time one tick occupies.
pub trait Pacer {
    /// Called once at the end of every tick (stepping and settle alike).
    fn pace(&mut self, now: Tick);
}

/// No delay at all — ticks run back-to-back.
pub struct NoPacer;

impl Pacer for NoPacer {
    fn pace(&mut self, _now: Tick) {}
}

/// Sleeps out the remainder of each fixed period.
///
/// Deadlines are scheduled from the previous deadline, not from wake-up
/// time, so short ticks don't drift the schedule.  A tick that overruns its
/// period resets the schedule from the current instant rather than sleeping
/// a backlog away.
pub struct IntervalPacer {
    period: Duration,
    next_deadline: Option<Instant>,
}

impl IntervalPacer {
    /// A pacer holding `period_ms` milliseconds per tick.
    pub fn new(period_ms: u64) -> Self {
        Self {
            period: Duration::from_millis(period_ms),
            next_deadline: None,
        }
    }
}

impl Pacer for IntervalPacer {
    fn pace(&mut self, _now: Tick) {
        let current = Instant::now();
        let deadline = self.next_deadline.unwrap_or(current + self.period);
        if deadline > current {
            std::thread::sleep(deadline - current);
        }
        self.next_deadline = Some(deadline.max(current) + self.period);
    }
}
