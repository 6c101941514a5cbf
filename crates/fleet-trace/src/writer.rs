//! The `TraceWriter` trait implemented by trace backends.

use crate::{AgentTraceRow, TickSummaryRow, TraceResult};

/// Trait implemented by trace backends.
///
/// All methods are infallible from the observer's perspective — errors are
/// stored internally and retrieved with [`TraceObserver::take_error`].
pub trait TraceWriter {
    /// Write a batch of per-agent progress rows.
    fn write_agents(&mut self, rows: &[AgentTraceRow]) -> TraceResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> TraceResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> TraceResult<()>;
}
