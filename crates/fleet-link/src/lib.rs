//! `fleet-link` — the seams between the scheduler core and physical devices.
//!
//! The executor never talks to hardware directly.  Everything
//! device-shaped goes through the [`FleetLink`] trait (discovery, motion
//! commands, indicator cues) or the telemetry channel (inbound position
//! samples).  Swap in [`SimLink`] and the whole scheduler runs headless and
//! deterministic — that is how the run-loop tests work.
//!
//! # Crate layout
//!
//! | Module        | Contents                                           |
//! |---------------|----------------------------------------------------|
//! | [`cue`]       | `LedColor`, `LightCue`, `SoundCue`, `MoveProfile`  |
//! | [`link`]      | The `FleetLink` trait                              |
//! | [`telemetry`] | `PositionSample`, `TelemetrySender`, `TelemetryHub`|
//! | [`sim`]       | `SimLink`, `LinkEvent` — virtual fleet for tests   |

pub mod cue;
pub mod link;
pub mod sim;
pub mod telemetry;


pub use cue::{LedColor, LightCue, MoveProfile, SoundCue};
pub use link::FleetLink;
pub use sim::{LinkEvent, SimLink};
pub use telemetry::{PositionSample, TelemetryHub, TelemetrySender};
