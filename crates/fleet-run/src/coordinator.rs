//! The `Fleet` struct and its tick loop.

use fleet_core::{AgentId, ExecConfig, GridGeometry, Roster, Tick};
use fleet_exec::{ExecEngine, StepAction};
use fleet_link::{FleetLink, LedColor, LightCue, MoveProfile, SoundCue, TelemetryHub};
use fleet_plan::PlanSet;

use crate::observer::{RunObserver, TickStats};
use crate::pacer::Pacer;

/// The fleet coordinator: owns the execution engine, the telemetry hub, and
/// the link, and drives per-tick scheduling for all agents.
///
/// Create via [`FleetBuilder`][crate::FleetBuilder], which claims each
/// agent's start cell and issues the initial moves.  [`run`][Self::run] then
/// settles, steps the fleet to completion, settles again, and returns the
/// final tick.
///
/// A destination cell whose holder never vacates stalls its suitor on every
/// tick; a fully deadlocked fleet therefore never finishes and `run` never
/// returns.  Use [`run_ticks`][Self::run_ticks] where an upper bound is
/// needed (tests).
pub struct Fleet<L: FleetLink> {
    /// Scheduling constants (tick period, settle windows, move speed, …).
    pub config: ExecConfig,

    /// Shared grid layout and coordinate mapper.
    pub geometry: GridGeometry,

    /// Device-id ↔ `AgentId` mapping, fixed at discovery.
    pub roster: Roster,

    /// Per-agent paths, fixed at load.
    pub plans: PlanSet,

    /// Occupancy table + per-agent cursors.
    pub engine: ExecEngine,

    /// The device seam.
    pub link: L,

    /// Inbound telemetry, drained once per tick.
    pub telemetry: TelemetryHub,

    /// Unfinished agents in ascending id order.  An agent is removed exactly
    /// once, on its transition to done — the per-agent retirement.
    active: Vec<AgentId>,

    /// Agents that have completed their plan.  Owned solely by the
    /// coordinator; incremented exactly once per agent.
    finished: usize,

    now: Tick,
}

impl<L: FleetLink> Fleet<L> {
    /// Assemble a fleet.  Callers go through [`FleetBuilder`][crate::FleetBuilder].
    pub(crate) fn assemble(
        config:    ExecConfig,
        geometry:  GridGeometry,
        roster:    Roster,
        plans:     PlanSet,
        engine:    ExecEngine,
        link:      L,
        telemetry: TelemetryHub,
    ) -> Self {
        let active = roster.agents();
        Self {
            config,
            geometry,
            roster,
            plans,
            engine,
            link,
            telemetry,
            active,
            finished: 0,
            now: Tick::ZERO,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Agents that have completed their plan so far.
    #[inline]
    pub fn finished_count(&self) -> usize {
        self.finished
    }

    /// `true` once every agent has completed its plan.
    #[inline]
    pub fn all_done(&self) -> bool {
        self.finished == self.roster.len()
    }

    /// The current tick.
    #[inline]
    pub fn now(&self) -> Tick {
        self.now
    }

    /// Run to completion: start settle, start cues, the main loop, end
    /// settle.  Returns the final tick.
    ///
    /// Does not return while any agent is permanently stalled.
    pub fn run<O: RunObserver, P: Pacer>(&mut self, observer: &mut O, pacer: &mut P) -> Tick {
        // ① Let the initial moves physically play out before stepping.
        for _ in 0..self.config.start_settle_ticks() {
            self.service_tick();
            pacer.pace(self.now);
        }

        // ② One start cue per agent.
        for agent in self.roster.agents() {
            self.link.play_sound(agent, SoundCue::ExecutionStarted);
        }

        // ③ Step until the whole fleet is done.
        while !self.all_done() {
            self.tick_once(observer);
            pacer.pace(self.now);
        }

        // ④ Let the finish cues blink before returning.
        for _ in 0..self.config.end_settle_ticks() {
            self.service_tick();
            pacer.pace(self.now);
        }

        observer.on_run_end(self.now);
        self.now
    }

    /// Run at most `n` stepping ticks (no settles, no pacing, no start cues).
    ///
    /// Returns the number of ticks actually executed — fewer than `n` when
    /// the fleet finishes early.  The deterministic entry point for tests.
    pub fn run_ticks<O: RunObserver>(&mut self, n: u64, observer: &mut O) -> u64 {
        for i in 0..n {
            if self.all_done() {
                return i;
            }
            self.tick_once(observer);
        }
        n
    }

    // ── Core tick processing ──────────────────────────────────────────────

    /// A non-stepping tick: pump the link, drain telemetry, blink finished
    /// agents.  Used for the settle windows.
    fn service_tick(&mut self) {
        self.link.pump(self.now);
        self.telemetry.drain();
        self.blink_finished();
        self.now = self.now + 1;
    }

    /// One full scheduling tick.
    fn tick_once<O: RunObserver>(&mut self, observer: &mut O) {
        observer.on_tick_start(self.now);

        // ── Phase 1: refresh the world ────────────────────────────────────
        self.link.pump(self.now);
        self.telemetry.drain();

        // ── Phase 2: feedback blink for already-finished agents ───────────
        //
        // Runs before stepping so an agent finishing this tick gets its
        // off + finish cues now and its first blink one period later.
        self.blink_finished();

        // ── Phase 3: step every active agent, ascending id ────────────────
        //
        // The active list is re-borrowed per agent because a done transition
        // mutates it; cloning a handful of ids per tick is cheap.
        let mut stats = TickStats::default();
        for agent in self.active.clone() {
            // Running indicator, refreshed every tick for the tick duration.
            self.link.set_light(
                agent,
                LightCue::On {
                    color:       LedColor::RUNNING,
                    duration_ms: self.config.tick_period_ms as u32,
                },
            );

            let plan = self.plans.get(agent);
            let seen = self
                .telemetry
                .latest(agent)
                .and_then(|p| self.geometry.real_to_cell(p));

            match self.engine.step(agent, plan, seen) {
                StepAction::Finished => {}

                StepAction::Hold => stats.holds += 1,

                StepAction::Advanced { at, done } => {
                    stats.advanced += 1;
                    observer.on_agent_advanced(
                        agent,
                        self.engine.state(agent).cursor().unwrap_or(0),
                        at,
                        self.now,
                    );
                    if done {
                        self.retire(agent);
                        observer.on_agent_done(agent, self.now);
                    }
                }

                StepAction::Move { target } => {
                    stats.moves += 1;
                    let physical = self.geometry.cell_to_real(target);
                    self.link.send_move(
                        agent,
                        physical,
                        self.config.move_speed,
                        MoveProfile::default(),
                    );
                }
            }
        }

        // ── Phase 4: bookkeeping ──────────────────────────────────────────
        stats.finished_total = self.finished;
        observer.on_tick_end(self.now, stats);
        if self.config.snapshot_interval_ticks > 0
            && self.now.0 % self.config.snapshot_interval_ticks == 0
        {
            observer.on_snapshot(self.now, &self.engine, &self.plans);
        }
        self.now = self.now + 1;
    }

    /// Completion side-effects, applied exactly once per agent.
    fn retire(&mut self, agent: AgentId) {
        self.link.set_light(agent, LightCue::Off);
        self.link.play_sound(agent, SoundCue::ExecutionFinished);
        self.active.retain(|&a| a != agent);
        self.finished += 1;
    }

    /// Pulse the finished indicator on every done agent at the blink period.
    fn blink_finished(&mut self) {
        if self.now.0 % self.config.blink_period_ticks() != 0 {
            return;
        }
        for agent in self.roster.agents() {
            if self.engine.is_done(agent, &self.plans) {
                self.link.set_light(
                    agent,
                    LightCue::On {
                        color:       LedColor::FINISHED,
                        duration_ms: self.config.blink_period_ms as u32,
                    },
                );
            }
        }
    }
}
