//! `fleet-run` — tick loop coordinator for the fleetgrid motion executor.
//!
//! # Tick loop
//!
//! ```text
//! build:  roster from discovery → validate plans → claim start cells →
//!         issue initial moves
//! run:    ① start settle  — pump link, drain telemetry, no stepping
//!         ② start cues    — one ExecutionStarted sound per agent
//!         ③ main loop     — per tick: pump, drain, step every active agent
//!                           in ascending AgentId order, apply actions,
//!                           blink finished agents; until all agents Done
//!         ④ end settle    — blinking continues, then the run returns
//! ```
//!
//! Wall-clock pacing is injected through the [`Pacer`] trait so tests drive
//! the loop tick-by-tick with no timers ([`run_ticks`][Fleet::run_ticks] +
//! [`NoPacer`]).
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use fleet_link::SimLink;
//! use fleet_run::{FleetBuilder, IntervalPacer, NoopObserver};
//!
//! let link = SimLink::new(device_ids, cell_size / 2.0);
//! let mut fleet = FleetBuilder::new(config, geometry, plans, link).build()?;
//! let final_tick = fleet.run(&mut NoopObserver, &mut IntervalPacer::new(300));
//! ```

pub mod builder;
pub mod coordinator;
pub mod error;
pub mod observer;
pub mod pacer;

#[cfg(test)]
mod tests;

pub use builder::FleetBuilder;
pub use coordinator::Fleet;
pub use error::{RunError, RunResult};
pub use observer::{NoopObserver, RunObserver, TickStats};
pub use pacer::{IntervalPacer, NoPacer, Pacer};
