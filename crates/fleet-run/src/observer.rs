//! Run observer trait for progress reporting and trace collection.

use fleet_core::{AgentId, Cell, Tick};
use fleet_exec::ExecEngine;
use fleet_plan::PlanSet;

// ── TickStats ─────────────────────────────────────────────────────────────────

/// Per-tick dispatch counts.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Agents whose cursor advanced this tick.
    pub advanced: usize,
    /// Move commands issued this tick.
    pub moves: usize,
    /// Agents stalled on a held cell (or an undetermined position) this tick.
    pub holds: usize,
    /// Total agents finished after this tick.
    pub finished_total: usize,
}

// ── RunObserver ───────────────────────────────────────────────────────────────

/// Callbacks invoked by [`Fleet::run`][crate::Fleet::run] at key points in
/// the tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl RunObserver for ProgressPrinter {
///     fn on_agent_advanced(&mut self, agent: AgentId, cursor: usize, cell: Cell, tick: Tick) {
///         println!("{tick}: {agent} cursor={cursor} at {cell}");
///     }
/// }
/// ```
pub trait RunObserver {
    /// Called at the very start of each stepping tick, before any dispatch.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called when an agent's cursor advances to `cursor` at `cell`.
    fn on_agent_advanced(&mut self, _agent: AgentId, _cursor: usize, _cell: Cell, _tick: Tick) {}

    /// Called once per agent, at the moment it transitions to done.
    fn on_agent_done(&mut self, _agent: AgentId, _tick: Tick) {}

    /// Called at the end of each stepping tick.
    fn on_tick_end(&mut self, _tick: Tick, _stats: TickStats) {}

    /// Called at snapshot intervals (every `config.snapshot_interval_ticks`).
    ///
    /// Provides read-only access to the full execution state so trace
    /// writers can record positions without the coordinator knowing about
    /// any output format.
    fn on_snapshot(&mut self, _tick: Tick, _engine: &ExecEngine, _plans: &PlanSet) {}

    /// Called once, after the end-settle window, before `run` returns.
    fn on_run_end(&mut self, _final_tick: Tick) {}
}

/// A [`RunObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl RunObserver for NoopObserver {}
