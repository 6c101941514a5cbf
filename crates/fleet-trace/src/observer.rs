//! `TraceObserver<W>` — bridges `RunObserver` to a `TraceWriter`.

use fleet_core::{AgentId, Tick};
use fleet_exec::ExecEngine;
use fleet_plan::PlanSet;
use fleet_run::{RunObserver, TickStats};

use crate::row::{AgentTraceRow, TickSummaryRow};
use crate::writer::TraceWriter;
use crate::TraceError;

/// A [`RunObserver`] that writes progress snapshots and tick summaries to
/// any [`TraceWriter`] backend.
///
/// Errors from the writer are stored internally because observer methods
/// have no return value.  After the run returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct TraceObserver<W: TraceWriter> {
    writer:     W,
    last_error: Option<TraceError>,
}

impl<W: TraceWriter> TraceObserver<W> {
    /// Create an observer backed by `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after the run returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<TraceError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: crate::TraceResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: TraceWriter> RunObserver for TraceObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, stats: TickStats) {
        let row = TickSummaryRow {
            tick:     tick.0,
            advanced: stats.advanced as u64,
            moves:    stats.moves as u64,
            holds:    stats.holds as u64,
            finished: stats.finished_total as u64,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, engine: &ExecEngine, plans: &PlanSet) {
        let rows: Vec<AgentTraceRow> = (0..engine.agent_count())
            .map(|i| {
                let agent = AgentId(i as u32);
                let state = engine.state(agent);
                let (seen_x, seen_y) = match state.last_seen {
                    Some(cell) => (cell.x, cell.y),
                    None       => (-1, -1),
                };
                AgentTraceRow {
                    agent_id: agent.0,
                    tick:     tick.0,
                    cursor:   state.cursor().map_or(-1, |c| c as i64),
                    seen_x,
                    seen_y,
                    done:     state.is_done(plans.get(agent)),
                }
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_agents(&rows);
            self.store_err(result);
        }
    }

    fn on_run_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
