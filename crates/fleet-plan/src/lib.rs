//! `fleet-plan` — path plans and input-document loading.
//!
//! # Crate layout
//!
//! | Module     | Contents                                          |
//! |------------|---------------------------------------------------|
//! | [`plan`]   | `PathPlan`, `PlanSet`                             |
//! | [`loader`] | `load_plan_json`, `load_geometry_json` + reader variants |
//! | [`error`]  | `PlanError`, `PlanResult<T>`                      |
//!
//! # Plan model (summary)
//!
//! A `PathPlan` is one agent's ordered cell sequence; index 0 is the start
//! cell and the agent is retired once its cursor reaches the last index.
//! Plans are immutable after loading — there is no re-planning.  A `PlanSet`
//! holds one plan per roster agent, indexed by `AgentId`, and validates the
//! whole fleet against a `GridGeometry` before execution starts.

pub mod error;
pub mod loader;
pub mod plan;


pub use error::{PlanError, PlanResult};
pub use loader::{load_geometry_json, load_geometry_reader, load_plan_json, load_plan_reader};
pub use plan::{PathPlan, PlanSet};
