//! `fleet-trace` — run trace writers for the fleetgrid motion executor.
//!
//! Records what the scheduler actually did, tick by tick: one file of
//! per-agent progress snapshots and one of per-tick dispatch summaries.
//! Useful for replaying a run against the plan or debugging a stall.
//!
//! All output goes through the [`TraceWriter`] trait, driven by
//! [`TraceObserver`], which implements `fleet_run::RunObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use fleet_trace::{CsvTraceWriter, TraceObserver};
//!
//! let writer = CsvTraceWriter::new(Path::new("./trace"))?;
//! let mut obs = TraceObserver::new(writer);
//! fleet.run(&mut obs, &mut pacer);
//! if let Some(e) = obs.take_error() { eprintln!("trace error: {e}"); }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvTraceWriter;
pub use error::{TraceError, TraceResult};
pub use observer::TraceObserver;
pub use row::{AgentTraceRow, TickSummaryRow};
pub use writer::TraceWriter;
