//! `fleet-exec` — the motion execution state machine.
//!
//! # Crate layout
//!
//! | Module        | Contents                                            |
//! |---------------|-----------------------------------------------------|
//! | [`occupancy`] | `OccupancyTable` — the cell mutual-exclusion table  |
//! | [`progress`]  | `ProgressState`, `ExecPhase` — per-agent cursor     |
//! | [`engine`]    | `ExecEngine`, `StepAction` — the per-tick step      |
//! | [`error`]     | `ExecError`, `ExecResult<T>`                        |
//!
//! # Step model (summary)
//!
//! Every scheduling period the runner steps each unfinished agent once:
//!
//! ```text
//! seen    = snap(latest telemetry)            — may be undetermined
//! next    = plan[cursor + 1]                  — plan[0] before the start commit
//! arrived = seen == next      → release plan[cursor], cursor += 1
//! else claim(next) succeeded  → Move toward next (destination reserved early)
//! else                        → Hold, retry next tick
//! ```
//!
//! At most one cursor advance per agent per tick; a tick that advances never
//! also issues a move.  Contention resolves purely by stalling — there is no
//! timeout, rerouting, or deadlock detection, so a destination whose holder
//! never vacates stalls its suitor forever.

pub mod engine;
pub mod error;
pub mod occupancy;
pub mod progress;


pub use engine::{ExecEngine, StepAction};
pub use error::{ExecError, ExecResult};
pub use occupancy::OccupancyTable;
pub use progress::{ExecPhase, ProgressState};
