//! Integration tests for fleet-run.
//!
//! Every scenario drives a real `Fleet` against a `SimLink` with `NoPacer`,
//! so runs are fully deterministic and take no wall time.

use fleet_core::{AgentId, Cell, ExecConfig, GridGeometry, RealPoint, Tick};
use fleet_exec::ExecEngine;
use fleet_link::{LedColor, LightCue, LinkEvent, SimLink, SoundCue};
use fleet_plan::{PathPlan, PlanSet};

use crate::{Fleet, FleetBuilder, NoPacer, NoopObserver, RunObserver, TickStats};

// ── Helpers ───────────────────────────────────────────────────────────────────

const A: AgentId = AgentId(0);
const B: AgentId = AgentId(1);

/// 3×3 grid, 50-unit pitch, origin at (0, 0), ±0.2 cell snap tolerance.
fn geometry_3x3() -> GridGeometry {
    GridGeometry {
        width:          3,
        height:         3,
        cell_size:      50.0,
        origin:         RealPoint::new(0.0, 0.0),
        snap_tolerance: 0.2,
    }
}

fn plan(pairs: &[(i32, i32)]) -> PathPlan {
    PathPlan::new(pairs.iter().map(|&(x, y)| Cell::new(x, y)).collect())
}

/// A fleet over `plans` with every virtual agent pre-placed on its start
/// cell, moving `units_per_tick` per pump.
fn build_fleet(plans: Vec<PathPlan>, units_per_tick: f32) -> Fleet<SimLink> {
    let geometry = geometry_3x3();
    let ids = (0..plans.len()).map(|i| format!("cube{i}")).collect();
    let mut link = SimLink::new(ids, units_per_tick);
    for (i, p) in plans.iter().enumerate() {
        link.place(AgentId(i as u32), geometry.cell_to_real(p.start()));
    }
    FleetBuilder::new(ExecConfig::default(), geometry, PlanSet::new(plans), link)
        .build()
        .unwrap()
}

/// Asserts pairwise-disjoint occupancy on every snapshot tick.
struct ExclusionChecker {
    snapshots: usize,
}

impl RunObserver for ExclusionChecker {
    fn on_snapshot(&mut self, _tick: Tick, engine: &ExecEngine, plans: &PlanSet) {
        self.snapshots += 1;
        let n = plans.len();
        for a in 0..n {
            for b in (a + 1)..n {
                let held_a = engine.occupancy.held_cells(AgentId(a as u32));
                let held_b = engine.occupancy.held_cells(AgentId(b as u32));
                assert!(
                    held_a.iter().all(|c| !held_b.contains(c)),
                    "agents {a} and {b} both hold a cell: {held_a:?} vs {held_b:?}"
                );
            }
        }
    }
}

// ── FleetBuilder validation ───────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use crate::RunError;

    use super::*;

    #[test]
    fn builds_and_claims_start_cells() {
        let fleet = build_fleet(vec![plan(&[(0, 0), (1, 0)]), plan(&[(2, 2)])], 50.0);
        assert_eq!(fleet.roster.len(), 2);
        assert_eq!(fleet.engine.occupancy.holder(Cell::new(0, 0)), Some(A));
        assert_eq!(fleet.engine.occupancy.holder(Cell::new(2, 2)), Some(B));
        assert_eq!(fleet.finished_count(), 0);
    }

    #[test]
    fn build_issues_one_initial_move_per_agent() {
        let fleet = build_fleet(vec![plan(&[(1, 1)]), plan(&[(2, 0)])], 50.0);
        let moves: Vec<_> = fleet
            .link
            .events()
            .iter()
            .filter_map(|e| match e {
                LinkEvent::Move { agent, target, .. } => Some((*agent, *target)),
                _ => None,
            })
            .collect();
        assert_eq!(
            moves,
            vec![(A, RealPoint::new(50.0, 50.0)), (B, RealPoint::new(100.0, 0.0))]
        );
    }

    #[test]
    fn plan_count_mismatch_errors() {
        let link = SimLink::new(vec!["a".into(), "b".into()], 50.0);
        let plans = PlanSet::new(vec![plan(&[(0, 0)])]); // one plan, two devices
        let result =
            FleetBuilder::new(ExecConfig::default(), geometry_3x3(), plans, link).build();
        assert!(matches!(
            result,
            Err(RunError::RosterMismatch { agents: 2, plans: 1 })
        ));
    }

    #[test]
    fn empty_fleet_errors() {
        let link = SimLink::new(vec![], 50.0);
        let result = FleetBuilder::new(
            ExecConfig::default(),
            geometry_3x3(),
            PlanSet::new(vec![]),
            link,
        )
        .build();
        assert!(matches!(result, Err(RunError::Config(_))));
    }

    #[test]
    fn duplicate_device_ids_error() {
        let link = SimLink::new(vec!["same".into(), "same".into()], 50.0);
        let plans = PlanSet::new(vec![plan(&[(0, 0)]), plan(&[(1, 0)])]);
        let result =
            FleetBuilder::new(ExecConfig::default(), geometry_3x3(), plans, link).build();
        assert!(matches!(result, Err(RunError::Core(_))));
    }

    #[test]
    fn invalid_plans_are_fatal_before_any_command() {
        // Out-of-bounds cell → validation must fail and no move is issued.
        let link = SimLink::new(vec!["a".into()], 50.0);
        let plans = PlanSet::new(vec![plan(&[(0, 0), (5, 0)])]);
        let result =
            FleetBuilder::new(ExecConfig::default(), geometry_3x3(), plans, link).build();
        assert!(matches!(result, Err(RunError::Plan(_))));
    }

    #[test]
    fn shared_start_cells_are_fatal() {
        let link = SimLink::new(vec!["a".into(), "b".into()], 50.0);
        let plans = PlanSet::new(vec![plan(&[(1, 1), (0, 1)]), plan(&[(1, 1), (2, 1)])]);
        let result =
            FleetBuilder::new(ExecConfig::default(), geometry_3x3(), plans, link).build();
        assert!(matches!(result, Err(RunError::Plan(_))));
    }
}

// ── Single-agent completion ───────────────────────────────────────────────────

#[cfg(test)]
mod single_agent {
    use super::*;

    #[test]
    fn two_cell_plan_runs_to_done() {
        let mut fleet = build_fleet(vec![plan(&[(0, 0), (1, 0)])], 50.0);
        let final_tick = fleet.run(&mut NoopObserver, &mut NoPacer);

        assert!(fleet.all_done());
        assert_eq!(fleet.finished_count(), 1);
        assert_eq!(fleet.engine.state(A).cursor(), Some(1));
        // 5 settle + 3 stepping (commit, move, arrive) + 5 settle.
        assert_eq!(final_tick, Tick(13));
    }

    #[test]
    fn completion_cues_in_order() {
        let mut fleet = build_fleet(vec![plan(&[(0, 0), (1, 0)])], 50.0);
        fleet.link.take_events(); // drop the initial move
        fleet.run(&mut NoopObserver, &mut NoPacer);

        let events = fleet.link.take_events();

        // Start cue fires after the settle window, before any running light.
        assert_eq!(
            events[0],
            LinkEvent::Sound { agent: A, cue: SoundCue::ExecutionStarted }
        );

        // The done transition: indicator off, then the finish sound.
        let off = events
            .iter()
            .position(|e| matches!(e, LinkEvent::Light { cue: LightCue::Off, .. }))
            .expect("no light-off event");
        assert_eq!(
            events[off + 1],
            LinkEvent::Sound { agent: A, cue: SoundCue::ExecutionFinished }
        );

        // The end-settle window blinks the finished color every tick
        // (blink period == tick period in the default config).
        let blinks = events
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    LinkEvent::Light { cue: LightCue::On { color, .. }, .. }
                        if *color == LedColor::FINISHED
                )
            })
            .count();
        assert_eq!(blinks, 5);
    }

    #[test]
    fn running_light_shown_every_stepping_tick() {
        let mut fleet = build_fleet(vec![plan(&[(0, 0), (1, 0)])], 50.0);
        fleet.link.take_events();
        fleet.run(&mut NoopObserver, &mut NoPacer);

        let running = fleet
            .link
            .events()
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    LinkEvent::Light { cue: LightCue::On { color, .. }, .. }
                        if *color == LedColor::RUNNING
                )
            })
            .count();
        // Three stepping ticks while the agent was active.
        assert_eq!(running, 3);
    }

    #[test]
    fn single_cell_plan_finishes_on_first_step() {
        let mut fleet = build_fleet(vec![plan(&[(1, 1)])], 50.0);
        let ran = fleet.run_ticks(10, &mut NoopObserver);
        assert_eq!(ran, 1);
        assert!(fleet.all_done());
    }
}

// ── Contention: the crossing scenario ─────────────────────────────────────────

#[cfg(test)]
mod contention {
    use super::*;

    #[test]
    fn contested_goal_admits_one_and_stalls_the_other() {
        // A and B approach (1,0) from opposite sides; A (lower id) steps
        // first and wins.  A parks on (1,0) forever, so B stalls forever.
        let mut fleet = build_fleet(
            vec![plan(&[(0, 0), (1, 0)]), plan(&[(2, 0), (1, 0)])],
            50.0,
        );

        let mut checker = ExclusionChecker { snapshots: 0 };
        let ran = fleet.run_ticks(30, &mut checker);

        assert_eq!(ran, 30, "the stalled fleet must never report completion");
        assert!(checker.snapshots > 0);
        assert_eq!(fleet.finished_count(), 1);
        assert!(fleet.engine.state(A).is_done(fleet.plans.get(A)));
        // B committed its start but never got (1,0).
        assert_eq!(fleet.engine.state(B).cursor(), Some(0));
        assert_eq!(fleet.engine.occupancy.holder(Cell::new(1, 0)), Some(A));
    }

    #[test]
    fn follower_moves_in_once_leader_vacates() {
        // A passes through (1,0) on its way to (2,0); B wants (1,0).
        let mut fleet = build_fleet(
            vec![plan(&[(0, 0), (1, 0), (2, 0)]), plan(&[(1, 1), (1, 0)])],
            50.0,
        );

        let mut checker = ExclusionChecker { snapshots: 0 };
        let ran = fleet.run_ticks(30, &mut checker);

        assert!(ran < 30, "both agents should finish: ran {ran} ticks");
        assert_eq!(fleet.finished_count(), 2);
        assert_eq!(fleet.engine.occupancy.holder(Cell::new(2, 0)), Some(A));
        assert_eq!(fleet.engine.occupancy.holder(Cell::new(1, 0)), Some(B));
    }

    #[test]
    fn head_on_deadlock_never_progresses() {
        let mut fleet = build_fleet(
            vec![plan(&[(0, 0), (1, 0)]), plan(&[(1, 0), (0, 0)])],
            50.0,
        );
        let ran = fleet.run_ticks(30, &mut ExclusionChecker { snapshots: 0 });
        assert_eq!(ran, 30);
        assert_eq!(fleet.finished_count(), 0);
        assert_eq!(fleet.engine.state(A).cursor(), Some(0));
        assert_eq!(fleet.engine.state(B).cursor(), Some(0));
    }
}

// ── Full-fleet runs ───────────────────────────────────────────────────────────

#[cfg(test)]
mod full_runs {
    use super::*;

    #[test]
    fn disjoint_fleet_completes_with_exact_timeline() {
        // A: three cells in a row; B: two cells on another row.
        let mut fleet = build_fleet(
            vec![plan(&[(0, 0), (1, 0), (2, 0)]), plan(&[(0, 2), (1, 2)])],
            50.0,
        );
        let final_tick = fleet.run(&mut NoopObserver, &mut NoPacer);

        assert!(fleet.all_done());
        assert_eq!(fleet.finished_count(), 2);
        // 5 settle + 5 stepping (commit, move, adv, move, adv-done) + 5 settle.
        assert_eq!(final_tick, Tick(15));
    }

    #[test]
    fn slow_agents_progress_only_when_telemetry_snaps() {
        // 10 units/tick: five pumps per 50-unit hop, with mid-transit samples
        // falling outside the snap tolerance.  Progress is slower but exact.
        let mut fleet = build_fleet(vec![plan(&[(0, 0), (1, 0)])], 10.0);
        let ran = fleet.run_ticks(40, &mut ExclusionChecker { snapshots: 0 });
        assert!(ran < 40);
        assert!(fleet.all_done());
    }

    /// Observer asserting cursors never move backwards and advance ≤ 1/tick.
    struct MonotonicChecker {
        last: Vec<Option<usize>>,
    }

    impl RunObserver for MonotonicChecker {
        fn on_snapshot(&mut self, tick: Tick, engine: &ExecEngine, plans: &PlanSet) {
            for i in 0..plans.len() {
                let cursor = engine.state(AgentId(i as u32)).cursor();
                let last = self.last[i];
                match (last, cursor) {
                    (Some(prev), Some(now)) => assert!(
                        now == prev || now == prev + 1,
                        "{tick}: agent {i} cursor jumped {prev} → {now}"
                    ),
                    (Some(_), None) => panic!("{tick}: agent {i} cursor reset"),
                    _ => {}
                }
                self.last[i] = cursor;
            }
        }
    }

    #[test]
    fn progress_is_monotonic() {
        let mut fleet = build_fleet(
            vec![
                plan(&[(0, 0), (1, 0), (2, 0), (2, 1)]),
                plan(&[(0, 2), (1, 2), (1, 1)]),
            ],
            25.0,
        );
        let mut checker = MonotonicChecker { last: vec![None, None] };
        let ran = fleet.run_ticks(60, &mut checker);
        assert!(ran < 60);
        assert!(fleet.all_done());
    }
}

// ── Observer dispatch ─────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        starts:   usize,
        ends:     usize,
        dones:    Vec<AgentId>,
        advances: Vec<(AgentId, usize, Cell)>,
        stats:    Vec<TickStats>,
        run_ends: usize,
    }

    impl RunObserver for Recorder {
        fn on_tick_start(&mut self, _t: Tick) {
            self.starts += 1;
        }
        fn on_agent_advanced(&mut self, agent: AgentId, cursor: usize, cell: Cell, _t: Tick) {
            self.advances.push((agent, cursor, cell));
        }
        fn on_agent_done(&mut self, agent: AgentId, _t: Tick) {
            self.dones.push(agent);
        }
        fn on_tick_end(&mut self, _t: Tick, stats: TickStats) {
            self.ends += 1;
            self.stats.push(stats);
        }
        fn on_run_end(&mut self, _t: Tick) {
            self.run_ends += 1;
        }
    }

    #[test]
    fn hooks_fire_once_per_stepping_tick() {
        let mut fleet = build_fleet(vec![plan(&[(0, 0), (1, 0)])], 50.0);
        let mut rec = Recorder::default();
        fleet.run(&mut rec, &mut NoPacer);

        // Settle ticks are not stepping ticks — 3 stepping ticks total.
        assert_eq!(rec.starts, 3);
        assert_eq!(rec.ends, 3);
        assert_eq!(rec.run_ends, 1);
    }

    #[test]
    fn done_reported_exactly_once_per_agent() {
        let mut fleet = build_fleet(
            vec![plan(&[(0, 0), (1, 0)]), plan(&[(2, 2), (2, 1)])],
            50.0,
        );
        let mut rec = Recorder::default();
        fleet.run(&mut rec, &mut NoPacer);

        let mut dones = rec.dones.clone();
        dones.sort();
        assert_eq!(dones, vec![A, B]);
    }

    #[test]
    fn advances_carry_cursor_and_cell() {
        let mut fleet = build_fleet(vec![plan(&[(0, 0), (1, 0)])], 50.0);
        let mut rec = Recorder::default();
        fleet.run(&mut rec, &mut NoPacer);

        assert_eq!(
            rec.advances,
            vec![(A, 0, Cell::new(0, 0)), (A, 1, Cell::new(1, 0))]
        );
    }

    #[test]
    fn stats_count_moves_holds_and_finished() {
        let mut fleet = build_fleet(
            vec![plan(&[(0, 0), (1, 0)]), plan(&[(2, 0), (1, 0)])],
            50.0,
        );
        let mut rec = Recorder::default();
        fleet.run_ticks(4, &mut rec);

        // Tick 0: both agents commit their start cells.
        assert_eq!(rec.stats[0].advanced, 2);
        // Tick 1: A claims (1,0) and moves; B is refused and holds.
        assert_eq!(rec.stats[1].moves, 1);
        assert_eq!(rec.stats[1].holds, 1);
        // Tick 2: A arrives (done); B still holds.
        assert_eq!(rec.stats[2].advanced, 1);
        assert_eq!(rec.stats[2].finished_total, 1);
        // Tick 3: only B is left, still stalled.
        assert_eq!(rec.stats[3].holds, 1);
        assert_eq!(rec.stats[3].moves, 0);
    }
}
