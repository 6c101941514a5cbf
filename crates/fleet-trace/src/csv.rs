//! CSV trace backend.
//!
//! Creates two files in the configured output directory:
//! - `agent_trace.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::TraceWriter;
use crate::{AgentTraceRow, TickSummaryRow, TraceResult};

/// Writes run traces to two CSV files.
pub struct CsvTraceWriter {
    agents:    Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvTraceWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> TraceResult<Self> {
        let mut agents = Writer::from_path(dir.join("agent_trace.csv"))?;
        agents.write_record(["agent_id", "tick", "cursor", "seen_x", "seen_y", "done"])?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(["tick", "advanced", "moves", "holds", "finished"])?;

        Ok(Self {
            agents,
            summaries,
            finished: false,
        })
    }
}

impl TraceWriter for CsvTraceWriter {
    fn write_agents(&mut self, rows: &[AgentTraceRow]) -> TraceResult<()> {
        for row in rows {
            self.agents.write_record(&[
                row.agent_id.to_string(),
                row.tick.to_string(),
                row.cursor.to_string(),
                row.seen_x.to_string(),
                row.seen_y.to_string(),
                (row.done as u8).to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> TraceResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.advanced.to_string(),
            row.moves.to_string(),
            row.holds.to_string(),
            row.finished.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> TraceResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.agents.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
