//! Indicator and motion-command vocabulary.
//!
//! These types carry the exact wire codes of the reference cube protocol so
//! a hardware link can forward them without translation.  They have no
//! effect on scheduling — the executor treats every cue as fire-and-forget.

// ── LedColor ──────────────────────────────────────────────────────────────────

/// An RGB indicator color.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct LedColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl LedColor {
    /// Shown each tick while an agent is executing its plan.
    pub const RUNNING: LedColor = LedColor { r: 0, g: 0, b: 255 };

    /// Blinked after an agent reaches the end of its plan.
    pub const FINISHED: LedColor = LedColor { r: 0, g: 255, b: 0 };
}

// ── LightCue ──────────────────────────────────────────────────────────────────

/// An indicator command.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum LightCue {
    /// Light up in `color` for `duration_ms`, then auto-off.
    On { color: LedColor, duration_ms: u32 },
    /// Turn the indicator off immediately.
    Off,
}

// ── SoundCue ──────────────────────────────────────────────────────────────────

/// A preset audio cue.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum SoundCue {
    /// Played once when an agent begins executing its plan.
    ExecutionStarted,
    /// Played once when an agent reaches the end of its plan.
    ExecutionFinished,
}

impl SoundCue {
    /// The device's preset sound id for this cue.
    #[inline]
    pub fn preset_code(self) -> u8 {
        match self {
            SoundCue::ExecutionStarted  => 4,
            SoundCue::ExecutionFinished => 2,
        }
    }
}

// ── MoveProfile ───────────────────────────────────────────────────────────────

/// How the device steers toward a motion target.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[non_exhaustive]
pub enum MoveProfile {
    /// Rotate toward the target while already translating.
    RotateWhileMoving,
    /// Rotate fully toward the target, then translate.
    RotateThenMove,
    /// Translate immediately, correcting heading along the way.  Used for
    /// single-cell grid hops, where a pre-rotation would cost most of the
    /// tick period.
    #[default]
    KeepHeading,
}

impl MoveProfile {
    /// The device's motion-type wire code for this profile.
    #[inline]
    pub fn wire_code(self) -> u8 {
        match self {
            MoveProfile::RotateWhileMoving => 0,
            MoveProfile::RotateThenMove    => 1,
            MoveProfile::KeepHeading       => 2,
        }
    }
}
