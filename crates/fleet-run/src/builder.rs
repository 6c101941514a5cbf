//! Fluent builder for constructing a [`Fleet`].

use fleet_core::{ExecConfig, GridGeometry, Roster};
use fleet_exec::ExecEngine;
use fleet_link::{FleetLink, MoveProfile, TelemetryHub};
use fleet_plan::PlanSet;

use crate::{Fleet, RunError, RunResult};

/// Builder for [`Fleet<L>`].
///
/// # Inputs
///
/// - [`ExecConfig`] — tick period, settle windows, move speed, …
/// - [`GridGeometry`] — from [`fleet_plan::load_geometry_json`]
/// - [`PlanSet`] — from [`fleet_plan::load_plan_json`]
/// - `L: FleetLink` — the device seam (hardware link or
///   [`SimLink`][fleet_link::SimLink])
///
/// # What `build` does
///
/// 1. Derives the roster from link discovery.
/// 2. Validates the plans against the roster and the grid (any failure is
///    fatal — the run never starts with a partial fleet).
/// 3. Wires the telemetry channel into the link.
/// 4. Claims every agent's start cell and issues the initial move toward it.
///
/// After `build` the physical fleet is already in motion toward its start
/// cells; call [`Fleet::run`] to settle and execute.
pub struct FleetBuilder<L: FleetLink> {
    config:   ExecConfig,
    geometry: GridGeometry,
    plans:    PlanSet,
    link:     L,
}

impl<L: FleetLink> FleetBuilder<L> {
    /// Create a builder with all required inputs.
    pub fn new(config: ExecConfig, geometry: GridGeometry, plans: PlanSet, link: L) -> Self {
        Self { config, geometry, plans, link }
    }

    /// Validate inputs, claim start cells, issue initial moves, and return a
    /// ready-to-run [`Fleet`].
    pub fn build(mut self) -> RunResult<Fleet<L>> {
        // ── Roster from discovery ─────────────────────────────────────────
        let roster = Roster::from_ids(self.link.device_ids())?;
        if roster.is_empty() {
            return Err(RunError::Config("no connected agents".into()));
        }
        if self.plans.len() != roster.len() {
            return Err(RunError::RosterMismatch {
                agents: roster.len(),
                plans:  self.plans.len(),
            });
        }

        // ── Validate the whole fleet before any command goes out ──────────
        self.plans.validate(&self.geometry, &roster)?;

        // ── Telemetry channel ─────────────────────────────────────────────
        let (tx, telemetry) = TelemetryHub::channel(roster.len());
        self.link.subscribe(tx);

        // ── Claim start cells and issue the initial moves ─────────────────
        let mut engine = ExecEngine::new(&self.geometry, roster.len());
        for agent in roster.agents() {
            let plan = self.plans.get(agent);
            engine.place_start(agent, plan)?;
            self.link.send_move(
                agent,
                self.geometry.cell_to_real(plan.start()),
                self.config.move_speed,
                MoveProfile::default(),
            );
        }

        Ok(Fleet::assemble(
            self.config,
            self.geometry,
            roster,
            self.plans,
            engine,
            self.link,
            telemetry,
        ))
    }
}
