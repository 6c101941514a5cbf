//! Plain data row types written by trace backends.

/// A snapshot of one agent's execution progress at a given tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentTraceRow {
    pub agent_id: u32,
    pub tick:     u64,
    /// Confirmed plan index; `-1` while the start cell is unconfirmed.
    pub cursor:   i64,
    /// Last telemetry cell that snapped; `-1, -1` before the first snap.
    pub seen_x:   i32,
    pub seen_y:   i32,
    pub done:     bool,
}

/// Dispatch summary for one scheduling tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:     u64,
    pub advanced: u64,
    pub moves:    u64,
    pub holds:    u64,
    pub finished: u64,
}
