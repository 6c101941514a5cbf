//! `OccupancyTable` — which agent currently holds each grid cell.
//!
//! This is the fleet's only mutual-exclusion primitive.  A cell is claimed
//! *before* the holder physically arrives (reserving the destination) and
//! released by the holder once it has vacated.  Scheduler logic goes
//! exclusively through [`try_claim`][OccupancyTable::try_claim] and
//! [`release`][OccupancyTable::release]; the read accessors exist for
//! observers and tests.
//!
//! No interior locking: every mutation happens inside the single-threaded
//! tick dispatch, so dispatch order is the sole source of exclusion.

use fleet_core::{AgentId, Cell, GridGeometry};

/// A height×width table of cell → holding agent (`AgentId::INVALID` = vacant).
pub struct OccupancyTable {
    width:  u32,
    height: u32,
    /// Row-major: `cells[y * width + x]`.
    cells: Vec<AgentId>,
}

impl OccupancyTable {
    /// An all-vacant table sized to `geometry`.
    pub fn new(geometry: &GridGeometry) -> Self {
        Self {
            width:  geometry.width,
            height: geometry.height,
            cells:  vec![AgentId::INVALID; geometry.cell_count()],
        }
    }

    /// Flat index for an in-bounds cell.
    fn index_of(&self, cell: Cell) -> Option<usize> {
        if cell.x < 0
            || cell.y < 0
            || cell.x as u32 >= self.width
            || cell.y as u32 >= self.height
        {
            return None;
        }
        Some(cell.y as usize * self.width as usize + cell.x as usize)
    }

    /// Claim `cell` for `agent`.
    ///
    /// Succeeds if the cell is vacant or already held by `agent` (re-issuing
    /// a claim while en route is normal).  Fails with no mutation if another
    /// agent holds it, or if the cell is outside the grid.
    pub fn try_claim(&mut self, cell: Cell, agent: AgentId) -> bool {
        let Some(i) = self.index_of(cell) else { return false };
        if self.cells[i] == AgentId::INVALID || self.cells[i] == agent {
            self.cells[i] = agent;
            true
        } else {
            false
        }
    }

    /// Release `cell` if `agent` holds it.
    ///
    /// Returns `true` if the cell was cleared; a release of a cell held by
    /// someone else (or vacant, or out of bounds) is a no-op.
    pub fn release(&mut self, cell: Cell, agent: AgentId) -> bool {
        let Some(i) = self.index_of(cell) else { return false };
        if self.cells[i] == agent {
            self.cells[i] = AgentId::INVALID;
            true
        } else {
            false
        }
    }

    /// The agent holding `cell`, or `None` if vacant or out of bounds.
    pub fn holder(&self, cell: Cell) -> Option<AgentId> {
        let i = self.index_of(cell)?;
        if self.cells[i] == AgentId::INVALID {
            None
        } else {
            Some(self.cells[i])
        }
    }

    /// All cells currently held by `agent`.  O(cells); test/observer support.
    pub fn held_cells(&self, agent: AgentId) -> Vec<Cell> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &holder)| holder == agent)
            .map(|(i, _)| {
                Cell::new((i as u32 % self.width) as i32, (i as u32 / self.width) as i32)
            })
            .collect()
    }

    /// Number of currently held cells.
    pub fn claimed_count(&self) -> usize {
        self.cells.iter().filter(|&&h| h != AgentId::INVALID).count()
    }
}
