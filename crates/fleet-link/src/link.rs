//! The `FleetLink` trait — the executor's only doorway to devices.

use fleet_core::{AgentId, RealPoint, Tick};

use crate::cue::{LightCue, MoveProfile, SoundCue};
use crate::telemetry::TelemetrySender;

/// A connected fleet of physical (or simulated) devices.
///
/// The runner calls [`device_ids`][Self::device_ids] once to build the
/// roster, [`subscribe`][Self::subscribe] once to hand over the telemetry
/// sender, and [`pump`][Self::pump] at the top of every tick.  All command
/// methods are fire-and-forget: the scheduler never waits for an
/// acknowledgment, and a lost command is recovered naturally because the
/// move toward an unreached cell is re-issued every tick.
///
/// # Implementations
///
/// A hardware link typically spawns one I/O thread per device that pushes
/// [`PositionSample`][crate::PositionSample]s through the subscribed sender
/// as notifications arrive; `pump` is then a no-op.  [`SimLink`][crate::SimLink]
/// instead integrates virtual motion inside `pump`.
pub trait FleetLink {
    /// Stable device identifiers, in discovery order.
    fn device_ids(&self) -> Vec<String>;

    /// Receive the sender for inbound position telemetry.
    ///
    /// Called exactly once, before any command method.
    fn subscribe(&mut self, tx: TelemetrySender);

    /// Per-tick service hook, called before any agent steps.
    fn pump(&mut self, _now: Tick) {}

    /// Command `agent` to drive to `target` at `speed` using `profile`.
    fn send_move(&mut self, agent: AgentId, target: RealPoint, speed: u8, profile: MoveProfile);

    /// Set `agent`'s indicator.
    fn set_light(&mut self, agent: AgentId, cue: LightCue);

    /// Play a preset sound on `agent`.
    fn play_sound(&mut self, agent: AgentId, cue: SoundCue);
}
