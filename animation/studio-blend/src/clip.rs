//! Animation clips

use bitflags::bitflags;

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

use crate::movement::{self, MovementSegment, RootMotion};

bitflags! {
    /// Clip flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    #[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize), serde(transparent))]
    pub struct ClipFlags: u32 {
        /// Clip loops back to its first frame. Kept as authored; root motion
        /// extrapolates past one cycle regardless of this flag
        const LOOPING = 0x0001;
        /// Clip stores motion relative to another pose (additive)
        const DELTA = 0x0004;
    }
}

/// One pre-authored animation
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct AnimClip {
    /// Clip name
    pub name: String,
    /// Playback rate in frames per second
    pub fps: f32,
    /// Number of frames
    pub frame_count: u32,
    /// Flags
    pub flags: ClipFlags,
    /// Root motion curve, ordered by end frame
    pub movements: Vec<MovementSegment>,
}

impl AnimClip {
    /// Create a clip without root motion
    pub fn new(name: impl Into<String>, fps: f32, frame_count: u32) -> Self {
        Self {
            name: name.into(),
            fps,
            frame_count,
            flags: ClipFlags::empty(),
            movements: Vec::new(),
        }
    }

    /// Attach a root motion curve
    pub fn with_movements(mut self, movements: Vec<MovementSegment>) -> Self {
        self.movements = movements;
        self
    }

    /// Set clip flags
    pub fn with_flags(mut self, flags: ClipFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Check if the clip carries root motion
    pub fn has_movement(&self) -> bool {
        !self.movements.is_empty()
    }

    /// Check if the clip is additive
    pub fn is_delta(&self) -> bool {
        self.flags.contains(ClipFlags::DELTA)
    }

    /// Cycles per second at the clip's own rate, 0 for single-frame clips
    pub fn cycle_rate(&self) -> f32 {
        if self.frame_count > 1 {
            self.fps / (self.frame_count - 1) as f32
        } else {
            0.0
        }
    }

    /// See [`movement::position_at_cycle`]
    pub fn position_at_cycle(&self, cycle: f32) -> Option<RootMotion> {
        movement::position_at_cycle(self, cycle)
    }

    /// See [`movement::movement_between`]
    pub fn movement_between(&self, cycle_from: f32, cycle_to: f32) -> Option<RootMotion> {
        movement::movement_between(self, cycle_from, cycle_to)
    }
}
