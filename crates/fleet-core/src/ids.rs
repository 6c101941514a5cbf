//! Agent identity: the `AgentId` index type and the device-id `Roster`.
//!
//! Physical devices report stable string identifiers; everything inside the
//! scheduler uses a dense `AgentId` so per-agent state lives in plain `Vec`s
//! indexed by `id.index()`.  The `Roster` owns the mapping between the two,
//! assigned once in discovery order and never changed afterwards.

use std::collections::HashMap;
use std::fmt;

use crate::{FleetError, FleetResult};

// ── AgentId ───────────────────────────────────────────────────────────────────

/// Index of an agent in per-agent storage.
///
/// The inner integer is `pub` to allow direct indexing into `Vec`s via
/// `id.0 as usize`, but callers should prefer the `.index()` helper for
/// clarity.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentId(pub u32);

impl AgentId {
    /// Sentinel meaning "no valid ID" — equivalent to `u32::MAX`.
    ///
    /// The occupancy table uses this value for vacant cells.
    pub const INVALID: AgentId = AgentId(u32::MAX);

    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl Default for AgentId {
    /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
    #[inline(always)]
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AgentId({})", self.0)
    }
}

impl From<AgentId> for usize {
    #[inline(always)]
    fn from(id: AgentId) -> usize {
        id.0 as usize
    }
}

impl TryFrom<usize> for AgentId {
    type Error = std::num::TryFromIntError;
    fn try_from(n: usize) -> Result<AgentId, Self::Error> {
        u32::try_from(n).map(AgentId)
    }
}

// ── Roster ────────────────────────────────────────────────────────────────────

/// The fixed set of connected agents and their device-id ↔ `AgentId` mapping.
///
/// Built once from the device ids reported by discovery; `AgentId(i)` is the
/// i-th device in discovery order.  Plan documents are keyed by device id, so
/// the loader resolves entries through the roster.
#[derive(Clone, Debug)]
pub struct Roster {
    ids: Vec<String>,
    lookup: HashMap<String, AgentId>,
}

impl Roster {
    /// Build a roster from device ids in discovery order.
    ///
    /// Fails if two devices report the same id — per-agent state would alias.
    pub fn from_ids(ids: Vec<String>) -> FleetResult<Self> {
        let mut lookup = HashMap::with_capacity(ids.len());
        for (i, id) in ids.iter().enumerate() {
            if lookup.insert(id.clone(), AgentId(i as u32)).is_some() {
                return Err(FleetError::Config(format!("duplicate device id {id:?}")));
            }
        }
        Ok(Self { ids, lookup })
    }

    /// The `AgentId` for `device_id`, or `None` if not connected.
    pub fn agent_of(&self, device_id: &str) -> Option<AgentId> {
        self.lookup.get(device_id).copied()
    }

    /// The device id for `agent`.
    ///
    /// # Panics
    /// Panics if `agent` is out of range for this roster.
    pub fn device_of(&self, agent: AgentId) -> &str {
        &self.ids[agent.index()]
    }

    /// Number of agents in the roster.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterate `(AgentId, device_id)` pairs in agent order.
    pub fn iter(&self) -> impl Iterator<Item = (AgentId, &str)> {
        self.ids
            .iter()
            .enumerate()
            .map(|(i, id)| (AgentId(i as u32), id.as_str()))
    }

    /// All agent ids in ascending order, detached from the roster borrow.
    pub fn agents(&self) -> Vec<AgentId> {
        (0..self.ids.len() as u32).map(AgentId).collect()
    }
}
