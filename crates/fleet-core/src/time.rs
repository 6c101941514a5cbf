//! Scheduler time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter; one tick is one
//! dispatch of every active agent's step function.  Wall-clock pacing is the
//! concern of the runner's `Pacer`, not of anything in this crate — every
//! duration the scheduler reasons about (settle delays, blink period) is
//! converted once into whole ticks, so all schedule arithmetic is exact
//! integer math with no timer drift.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute scheduler tick counter.
///
/// Stored as `u64`: at the default 300 ms period a u64 lasts ~175 billion
/// years, so overflow is not a practical concern.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── ExecConfig ────────────────────────────────────────────────────────────────

/// Fixed scheduling constants for one run.
///
/// The defaults reproduce the reference hardware setup: a 300 ms polling
/// period, 1.5 s settle windows around execution, and a cube move speed
/// of 80.  None of these are runtime-tunable by the core — applications
/// construct the value once and hand it to the runner.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecConfig {
    /// Milliseconds between scheduler ticks.
    pub tick_period_ms: u64,

    /// Pause after the initial moves, letting agents physically reach their
    /// start cells before ticking begins.
    pub start_settle_ms: u64,

    /// Pause after the last agent finishes, letting the final feedback cues
    /// play out before the run returns.
    pub end_settle_ms: u64,

    /// Speed passed to every motion command.
    pub move_speed: u8,

    /// Period of the finished-agent indicator blink.
    pub blink_period_ms: u64,

    /// Emit an observer snapshot every N ticks.  0 disables snapshots.
    pub snapshot_interval_ticks: u64,
}

impl Default for ExecConfig {
    fn default() -> Self {
        Self {
            tick_period_ms:          300,
            start_settle_ms:         1_500,
            end_settle_ms:           1_500,
            move_speed:              80,
            blink_period_ms:         300,
            snapshot_interval_ticks: 1,
        }
    }
}

impl ExecConfig {
    /// How many ticks span `ms` milliseconds? (rounds up, minimum 1)
    #[inline]
    pub fn ticks_for_ms(&self, ms: u64) -> u64 {
        ms.div_ceil(self.tick_period_ms).max(1)
    }

    /// The pre-start settle window in whole ticks.
    #[inline]
    pub fn start_settle_ticks(&self) -> u64 {
        self.ticks_for_ms(self.start_settle_ms)
    }

    /// The post-completion settle window in whole ticks.
    #[inline]
    pub fn end_settle_ticks(&self) -> u64 {
        self.ticks_for_ms(self.end_settle_ms)
    }

    /// The finished-indicator blink period in whole ticks.
    #[inline]
    pub fn blink_period_ticks(&self) -> u64 {
        self.ticks_for_ms(self.blink_period_ms)
    }
}
