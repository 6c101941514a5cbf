//! crossing — smallest end-to-end demo of the fleetgrid motion executor.
//!
//! Four simulated agents execute crossing paths on a 5×5 grid.  Two of them
//! contend for the center cell (2,2) from perpendicular directions; the
//! occupancy table admits one and stalls the other until the cell is
//! vacated.  Swap [`SimLink`] for a hardware link to run the same plans on
//! physical cubes.

use std::io::Cursor;
use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use fleet_core::{AgentId, Cell, ExecConfig, Roster, Tick};
use fleet_exec::ExecEngine;
use fleet_link::SimLink;
use fleet_plan::{load_geometry_reader, load_plan_reader, PlanSet};
use fleet_run::{FleetBuilder, IntervalPacer, RunObserver, TickStats};
use fleet_trace::{CsvTraceWriter, TraceObserver};

// ── Input documents ───────────────────────────────────────────────────────────

/// 5×5 grid on a 50-unit pitch; tolerance of ±0.2 cells (±10 units).
const GRID_JSON: &str = r#"{
    "WIDTH": 5, "HEIGHT": 5, "CELL_SIZE": 50.0,
    "INIT_COORD_X": 100.0, "INIT_COORD_Y": 100.0, "POS_BUF": 0.2
}"#;

/// h7p runs west→east across row 2; k2c runs north→south down column 2.
/// Their paths intersect at (2,2).  m4x and q9d stay out of the way.
const PLAN_JSON: &str = r#"{
    "h7p": [{"x": 0, "y": 2}, {"x": 1, "y": 2}, {"x": 2, "y": 2},
            {"x": 3, "y": 2}, {"x": 4, "y": 2}],
    "k2c": [{"x": 2, "y": 0}, {"x": 2, "y": 1}, {"x": 2, "y": 2},
            {"x": 2, "y": 3}, {"x": 2, "y": 4}],
    "m4x": [{"x": 0, "y": 0}, {"x": 1, "y": 0}, {"x": 1, "y": 1}],
    "q9d": [{"x": 4, "y": 4}, {"x": 3, "y": 4}, {"x": 3, "y": 3}]
}"#;

const DEVICE_IDS: [&str; 4] = ["h7p", "k2c", "m4x", "q9d"];

// ── Console observer ──────────────────────────────────────────────────────────

/// Prints progress while delegating every hook to the CSV trace observer.
struct ConsoleObserver {
    inner: TraceObserver<CsvTraceWriter>,
    holds: usize,
}

impl RunObserver for ConsoleObserver {
    fn on_agent_advanced(&mut self, agent: AgentId, cursor: usize, cell: Cell, tick: Tick) {
        println!("{tick}: {agent} cursor={cursor} at {cell}");
        self.inner.on_agent_advanced(agent, cursor, cell, tick);
    }

    fn on_agent_done(&mut self, agent: AgentId, tick: Tick) {
        println!("{tick}: {agent} finished");
        self.inner.on_agent_done(agent, tick);
    }

    fn on_tick_end(&mut self, tick: Tick, stats: TickStats) {
        self.holds += stats.holds;
        self.inner.on_tick_end(tick, stats);
    }

    fn on_snapshot(&mut self, tick: Tick, engine: &ExecEngine, plans: &PlanSet) {
        self.inner.on_snapshot(tick, engine, plans);
    }

    fn on_run_end(&mut self, final_tick: Tick) {
        self.inner.on_run_end(final_tick);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== crossing — fleetgrid motion executor ===");
    println!("Agents: {}  |  Grid: 5×5  |  Contended cell: (2, 2)", DEVICE_IDS.len());
    println!();

    // 1. Load the input documents.
    let geometry = load_geometry_reader(Cursor::new(GRID_JSON))?;
    let roster = Roster::from_ids(DEVICE_IDS.iter().map(|s| s.to_string()).collect())?;
    let plans = load_plan_reader(Cursor::new(PLAN_JSON), &roster)?;
    println!(
        "Loaded {} plans, longest path {} cells",
        plans.len(),
        plans.plans().iter().map(|p| p.len()).max().unwrap_or(0)
    );

    // 2. Simulated fleet, pre-staged on the start cells, half a cell per tick.
    let mut link = SimLink::new(
        DEVICE_IDS.iter().map(|s| s.to_string()).collect(),
        geometry.cell_size / 2.0,
    );
    for (agent, _) in roster.iter() {
        link.place(agent, geometry.cell_to_real(plans.get(agent).start()));
    }

    // 3. Build: validates the plans, claims start cells, issues initial moves.
    let config = ExecConfig::default();
    let mut fleet = FleetBuilder::new(config.clone(), geometry, plans, link).build()?;
    println!(
        "Fleet ready: {} agents, tick period {} ms",
        fleet.roster.len(),
        config.tick_period_ms
    );
    println!("---");

    // 4. Trace output.
    std::fs::create_dir_all("output/crossing")?;
    let writer = CsvTraceWriter::new(Path::new("output/crossing"))?;
    let mut obs = ConsoleObserver {
        inner: TraceObserver::new(writer),
        holds: 0,
    };

    // 5. Run at the real tick period.
    let t0 = Instant::now();
    let final_tick = fleet.run(&mut obs, &mut IntervalPacer::new(config.tick_period_ms));
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("trace error: {e}");
    }

    // 6. Summary.
    println!("---");
    println!(
        "Run complete at {final_tick} in {:.1} s ({} contention stalls)",
        elapsed.as_secs_f64(),
        obs.holds
    );
    println!();
    println!("{:<8} {:<12} {:<8} {:<8}", "Device", "Final cell", "Cursor", "Done");
    println!("{}", "-".repeat(38));
    for (agent, device) in fleet.roster.iter() {
        let state = fleet.engine.state(agent);
        let cell = state
            .last_seen
            .map_or_else(|| "-".to_string(), |c| c.to_string());
        println!(
            "{:<8} {:<12} {:<8} {:<8}",
            device,
            cell,
            state.cursor().map_or(-1, |c| c as i64),
            if state.is_done(fleet.plans.get(agent)) { "yes" } else { "no" },
        );
    }

    Ok(())
}
