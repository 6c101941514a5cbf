//! `ExecEngine` — the per-tick execution step for every agent.

use fleet_core::{AgentId, Cell, GridGeometry};
use fleet_plan::{PathPlan, PlanSet};

use crate::occupancy::OccupancyTable;
use crate::progress::ProgressState;
use crate::{ExecError, ExecResult};

// ── StepAction ────────────────────────────────────────────────────────────────

/// What one agent's step decided this tick.
///
/// The engine only decides; the runner translates each action into link
/// commands.  Keeping command I/O out of the step keeps it exhaustively
/// testable against the occupancy invariant.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum StepAction {
    /// The agent was already done; nothing happened.
    Finished,

    /// Position undetermined, or the next cell is held by another agent.
    /// The agent keeps its current cells and retries next tick.
    Hold,

    /// Telemetry confirmed arrival at the next planned cell; the cursor
    /// advanced (releasing the previous cell, if any).  No movement is
    /// issued on an advancing tick.
    Advanced {
        /// The newly confirmed cell.
        at: Cell,
        /// `true` if this advance reached the final plan index.
        done: bool,
    },

    /// The next cell is reserved for this agent; drive toward it.
    /// Re-issued every tick until arrival.
    Move { target: Cell },
}

// ── ExecEngine ────────────────────────────────────────────────────────────────

/// Owns the occupancy table and every agent's progress cursor.
pub struct ExecEngine {
    pub occupancy: OccupancyTable,
    states: Vec<ProgressState>,
}

impl ExecEngine {
    /// A fresh engine: all cells vacant, all cursors pre-start.
    pub fn new(geometry: &GridGeometry, agent_count: usize) -> Self {
        Self {
            occupancy: OccupancyTable::new(geometry),
            states:    vec![ProgressState::new(); agent_count],
        }
    }

    /// Reserve `plan`'s start cell for `agent` during initialization.
    ///
    /// Called once per agent before any ticking; the runner follows up with
    /// the initial move command.  A conflict here means two plans share a
    /// start cell — malformed input that validation should have rejected —
    /// so it is surfaced as a fatal error rather than a stall.
    pub fn place_start(&mut self, agent: AgentId, plan: &PathPlan) -> ExecResult<()> {
        let start = plan.start();
        if self.occupancy.try_claim(start, agent) {
            Ok(())
        } else {
            Err(ExecError::StartCellHeld {
                agent,
                cell:   start,
                holder: self.occupancy.holder(start).unwrap_or(AgentId::INVALID),
            })
        }
    }

    /// Execute one scheduling step for `agent`.
    ///
    /// `seen` is the latest telemetry sample snapped to a cell (`None` =
    /// undetermined, mid-transit).  At most one cursor advance per call.
    pub fn step(&mut self, agent: AgentId, plan: &PathPlan, seen: Option<Cell>) -> StepAction {
        let state = &mut self.states[agent.index()];
        if state.is_done(plan) {
            return StepAction::Finished;
        }
        if seen.is_some() {
            state.last_seen = seen;
        }

        let next_index = state.next_index();
        // next_index ≤ last_index while not done, so the lookup cannot miss.
        let next = match plan.get(next_index) {
            Some(cell) => cell,
            None => return StepAction::Finished,
        };

        // Arrival: telemetry puts the agent on the next planned cell.
        if seen == Some(next) {
            // Departed the previous cell; hand it back.  Pre-start there is
            // no previous cell and nothing is released.
            if let Some(previous) = state.cursor().and_then(|c| plan.get(c)) {
                self.occupancy.release(previous, agent);
            }
            let new_cursor = state.advance();
            return StepAction::Advanced {
                at:   next,
                done: new_cursor == plan.last_index(),
            };
        }

        // Admission: reserve the destination before moving toward it.
        if self.occupancy.try_claim(next, agent) {
            StepAction::Move { target: next }
        } else {
            StepAction::Hold
        }
    }

    /// Read access to one agent's progress.
    #[inline]
    pub fn state(&self, agent: AgentId) -> &ProgressState {
        &self.states[agent.index()]
    }

    /// Read access to all progress states, indexed by `AgentId`.
    pub fn states(&self) -> &[ProgressState] {
        &self.states
    }

    /// `true` once `agent`'s cursor sits at its plan's final index.
    pub fn is_done(&self, agent: AgentId, plans: &PlanSet) -> bool {
        self.states[agent.index()].is_done(plans.get(agent))
    }

    pub fn agent_count(&self) -> usize {
        self.states.len()
    }
}
