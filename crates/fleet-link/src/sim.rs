//! `SimLink` — a virtual fleet for tests and demos.
//!
//! Each pump advances every commanded agent a fixed distance toward its
//! target and reports every agent's position through the telemetry channel,
//! so a full scheduler run works with no hardware and no wall clock.  All
//! commands are recorded for assertions.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use fleet_core::{AgentId, RealPoint, Tick};

use crate::cue::{LightCue, MoveProfile, SoundCue};
use crate::link::FleetLink;
use crate::telemetry::TelemetrySender;

// ── LinkEvent ─────────────────────────────────────────────────────────────────

/// One recorded command, in issue order.
#[derive(Clone, PartialEq, Debug)]
pub enum LinkEvent {
    Move {
        agent:  AgentId,
        target: RealPoint,
        speed:  u8,
        profile: MoveProfile,
    },
    Light {
        agent: AgentId,
        cue:   LightCue,
    },
    Sound {
        agent: AgentId,
        cue:   SoundCue,
    },
}

// ── SimLink ───────────────────────────────────────────────────────────────────

/// A deterministic in-memory stand-in for a hardware fleet link.
///
/// Virtual agents sit still until commanded, then translate in a straight
/// line toward the last commanded target at `units_per_tick` per pump.
/// Agents start at whatever positions [`place`][Self::place] set (or the
/// all-zero default) — like real cubes, they are somewhere on the mat until
/// the initial moves drive them to their start cells.
pub struct SimLink {
    ids:            Vec<String>,
    units_per_tick: f32,
    pos:            Vec<RealPoint>,
    target:         Vec<Option<RealPoint>>,
    tx:             Option<TelemetrySender>,
    events:         Vec<LinkEvent>,
    jitter:         Option<(SmallRng, f32)>,
}

impl SimLink {
    /// A fleet of `ids.len()` virtual agents moving `units_per_tick` per pump.
    pub fn new(ids: Vec<String>, units_per_tick: f32) -> Self {
        let count = ids.len();
        Self {
            ids,
            units_per_tick,
            pos:    vec![RealPoint::default(); count],
            target: vec![None; count],
            tx:     None,
            events: Vec::new(),
            jitter: None,
        }
    }

    /// Add seeded positional noise of up to ±`amplitude` units per axis to
    /// every reported sample.  Exercises the snap-tolerance path without
    /// giving up reproducibility.
    pub fn with_jitter(mut self, seed: u64, amplitude: f32) -> Self {
        self.jitter = Some((SmallRng::seed_from_u64(seed), amplitude));
        self
    }

    /// Teleport `agent` to `point` (initial mat position).
    pub fn place(&mut self, agent: AgentId, point: RealPoint) {
        self.pos[agent.index()] = point;
    }

    /// Current true (un-jittered) position of `agent`.
    pub fn position(&self, agent: AgentId) -> RealPoint {
        self.pos[agent.index()]
    }

    /// All commands recorded so far, in issue order.
    pub fn events(&self) -> &[LinkEvent] {
        &self.events
    }

    /// Drain the recorded commands.
    pub fn take_events(&mut self) -> Vec<LinkEvent> {
        std::mem::take(&mut self.events)
    }

    fn advance(&mut self) {
        for i in 0..self.pos.len() {
            let Some(target) = self.target[i] else { continue };
            let p = self.pos[i];
            let (dx, dy) = (target.x - p.x, target.y - p.y);
            let dist = (dx * dx + dy * dy).sqrt();
            if dist <= self.units_per_tick {
                self.pos[i] = target;
            } else {
                let scale = self.units_per_tick / dist;
                self.pos[i] = RealPoint::new(p.x + dx * scale, p.y + dy * scale);
            }
        }
    }

    fn report(&mut self) {
        let Some(tx) = self.tx.clone() else { return };
        for i in 0..self.pos.len() {
            let mut p = self.pos[i];
            if let Some((rng, amp)) = self.jitter.as_mut() {
                p.x += rng.gen_range(-*amp..=*amp);
                p.y += rng.gen_range(-*amp..=*amp);
            }
            tx.send(AgentId(i as u32), p);
        }
    }
}

impl FleetLink for SimLink {
    fn device_ids(&self) -> Vec<String> {
        self.ids.clone()
    }

    fn subscribe(&mut self, tx: TelemetrySender) {
        self.tx = Some(tx);
    }

    fn pump(&mut self, _now: Tick) {
        self.advance();
        self.report();
    }

    fn send_move(&mut self, agent: AgentId, target: RealPoint, speed: u8, profile: MoveProfile) {
        self.target[agent.index()] = Some(target);
        self.events.push(LinkEvent::Move { agent, target, speed, profile });
    }

    fn set_light(&mut self, agent: AgentId, cue: LightCue) {
        self.events.push(LinkEvent::Light { agent, cue });
    }

    fn play_sound(&mut self, agent: AgentId, cue: SoundCue) {
        self.events.push(LinkEvent::Sound { agent, cue });
    }
}
