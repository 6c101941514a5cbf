//! Core plan types: `PathPlan` and `PlanSet`.

use fleet_core::{AgentId, Cell, GridGeometry, Roster};

use crate::{PlanError, PlanResult};

// ── PathPlan ──────────────────────────────────────────────────────────────────

/// One agent's precomputed path: the ordered cells it must visit.
///
/// Index 0 is the start cell.  Plans are fixed before execution and never
/// re-planned; lengths may differ between agents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathPlan {
    cells: Vec<Cell>,
}

impl PathPlan {
    /// Wrap an ordered cell sequence.  Emptiness is checked at load time
    /// (the loader reports which device the empty path belonged to).
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// The start cell (index 0).
    ///
    /// # Panics
    /// Panics on an empty plan; loaders reject those before execution.
    #[inline]
    pub fn start(&self) -> Cell {
        self.cells[0]
    }

    /// The cell at `index`, or `None` past the end.
    #[inline]
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Index of the final cell.
    #[inline]
    pub fn last_index(&self) -> usize {
        self.cells.len() - 1
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Read-only view of the full path.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

// ── PlanSet ───────────────────────────────────────────────────────────────────

/// All agents' plans, indexed by `AgentId`.
#[derive(Clone, Debug)]
pub struct PlanSet {
    plans: Vec<PathPlan>,
}

impl PlanSet {
    /// Wrap per-agent plans; `plans[i]` belongs to `AgentId(i)`.
    pub fn new(plans: Vec<PathPlan>) -> Self {
        Self { plans }
    }

    /// The plan for `agent`.
    ///
    /// # Panics
    /// Panics if `agent` is out of range for this set.
    #[inline]
    pub fn get(&self, agent: AgentId) -> &PathPlan {
        &self.plans[agent.index()]
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    /// Read-only slice of all plans.
    pub fn plans(&self) -> &[PathPlan] {
        &self.plans
    }

    /// Validate the whole fleet against `geometry` before execution.
    ///
    /// Checks:
    /// - no empty path (an agent with nowhere to start cannot be placed);
    /// - every cell inside the grid bounds;
    /// - pairwise-distinct start cells (the initial placement would otherwise
    ///   violate mutual exclusion before the first tick).
    ///
    /// `roster` supplies device ids for error messages.
    pub fn validate(&self, geometry: &GridGeometry, roster: &Roster) -> PlanResult<()> {
        for (agent, plan) in self.plans.iter().enumerate() {
            let device = roster.device_of(AgentId(agent as u32));
            if plan.is_empty() {
                return Err(PlanError::EmptyPath(device.to_owned()));
            }
            for &cell in plan.cells() {
                if !geometry.contains(cell) {
                    return Err(PlanError::OutOfBounds {
                        device: device.to_owned(),
                        cell,
                        width:  geometry.width,
                        height: geometry.height,
                    });
                }
            }
        }

        for i in 0..self.plans.len() {
            for j in (i + 1)..self.plans.len() {
                if self.plans[i].start() == self.plans[j].start() {
                    return Err(PlanError::DuplicateStart {
                        first:  roster.device_of(AgentId(i as u32)).to_owned(),
                        second: roster.device_of(AgentId(j as u32)).to_owned(),
                        cell:   self.plans[i].start(),
                    });
                }
            }
        }

        Ok(())
    }
}
