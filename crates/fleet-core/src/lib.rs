//! `fleet-core` — foundational types for the fleetgrid motion executor.
//!
//! This crate is a dependency of every other `fleet-*` crate.  It
//! intentionally has no `fleet-*` dependencies and minimal external ones
//! (only `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                            |
//! |-------------|-----------------------------------------------------|
//! | [`ids`]     | `AgentId`, `Roster` (device-id ↔ agent mapping)     |
//! | [`grid`]    | `Cell`, `RealPoint`, `GridGeometry` (the mapper)    |
//! | [`time`]    | `Tick`, `ExecConfig`                                |
//! | [`error`]   | `FleetError`, `FleetResult`                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                  |
//! |---------|---------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.     |

pub mod error;
pub mod grid;
pub mod ids;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{FleetError, FleetResult};
pub use grid::{Cell, GridGeometry, RealPoint};
pub use ids::{AgentId, Roster};
pub use time::{ExecConfig, Tick};
