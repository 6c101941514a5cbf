//! Inbound position telemetry: channel plus latest-sample cache.
//!
//! # Design
//!
//! Telemetry producers (device I/O threads, or `SimLink::pump`) may emit
//! samples at any time and at any rate.  The scheduler must not observe a
//! position change mid-tick, so samples flow through a channel and are
//! folded into a single latest-known slot per agent by
//! [`TelemetryHub::drain`], called exactly once at the top of each tick.
//! Each agent's step then reads a stable snapshot.
//!
//! A slot holds `None` until the first sample arrives; the mapper may still
//! classify a present sample as undetermined.  Neither case is an error —
//! the step function simply waits for a later tick.

use crossbeam_channel::{unbounded, Receiver, Sender};

use fleet_core::{AgentId, RealPoint};

// ── PositionSample ────────────────────────────────────────────────────────────

/// One raw physical-position report for one agent.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct PositionSample {
    pub agent: AgentId,
    pub point: RealPoint,
}

// ── TelemetrySender ───────────────────────────────────────────────────────────

/// Cloneable producer handle for position samples.
#[derive(Clone)]
pub struct TelemetrySender {
    tx: Sender<PositionSample>,
}

impl TelemetrySender {
    /// Report `agent` at `point`.
    ///
    /// Sends never block and never fail from the producer's point of view;
    /// once the hub is gone the run is over and the sample is dropped.
    pub fn send(&self, agent: AgentId, point: RealPoint) {
        let _ = self.tx.send(PositionSample { agent, point });
    }
}

// ── TelemetryHub ──────────────────────────────────────────────────────────────

/// Consumer side: drains the channel into one latest-sample slot per agent.
pub struct TelemetryHub {
    rx: Receiver<PositionSample>,
    latest: Vec<Option<RealPoint>>,
}

impl TelemetryHub {
    /// Create the hub and its producer handle for a fleet of `agent_count`.
    pub fn channel(agent_count: usize) -> (TelemetrySender, TelemetryHub) {
        let (tx, rx) = unbounded();
        (
            TelemetrySender { tx },
            TelemetryHub { rx, latest: vec![None; agent_count] },
        )
    }

    /// Fold all pending samples into the latest-sample slots.
    ///
    /// Later samples for the same agent win.  Samples for agents outside the
    /// roster range are dropped.  Returns the number of samples applied.
    pub fn drain(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(sample) = self.rx.try_recv() {
            if let Some(slot) = self.latest.get_mut(sample.agent.index()) {
                *slot = Some(sample.point);
                applied += 1;
            }
        }
        applied
    }

    /// The latest drained position for `agent`, or `None` before the first
    /// sample.
    #[inline]
    pub fn latest(&self, agent: AgentId) -> Option<RealPoint> {
        self.latest.get(agent.index()).copied().flatten()
    }

    /// Number of agent slots.
    pub fn agent_count(&self) -> usize {
        self.latest.len()
    }
}
