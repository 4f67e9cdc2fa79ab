//! Root motion reconstruction for a single clip
//!
//! A clip stores its root motion as a piecewise curve: each segment ends
//! at a frame, carries a start and end speed along a fixed direction, and
//! records the cumulative position and yaw reached at its end. Positions
//! inside a segment are integrated with a constant-acceleration model.
//!
//! Coordinates are Z-up and yaw is measured in degrees about +Z.

use glam::{Quat, Vec3};
use log::trace;

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

use crate::clip::AnimClip;
use crate::pose::safe_ratio;

/// One piece of a clip's root motion curve
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct MovementSegment {
    /// Frame at which this segment ends
    pub end_frame: u32,
    /// Speed at the start of the segment
    pub start_velocity: f32,
    /// Speed at the end of the segment
    pub end_velocity: f32,
    /// Cumulative position at the end of the segment
    pub position: Vec3,
    /// Cumulative yaw (degrees) at the end of the segment
    pub yaw: f32,
    /// Unit direction of travel inside the segment
    pub direction: Vec3,
}

impl MovementSegment {
    /// Distance covered after `fraction` of the segment
    pub fn displacement(&self, fraction: f32) -> f32 {
        self.start_velocity * fraction
            + 0.5 * (self.end_velocity - self.start_velocity) * fraction * fraction
    }
}

/// Translation plus yaw, either absolute within a clip or as a delta
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct RootMotion {
    /// Translation
    pub position: Vec3,
    /// Rotation about +Z in degrees
    pub yaw: f32,
}

impl RootMotion {
    /// No movement
    pub const ZERO: Self = Self {
        position: Vec3::ZERO,
        yaw: 0.0,
    };

    /// Create a new root motion value
    pub const fn new(position: Vec3, yaw: f32) -> Self {
        Self { position, yaw }
    }

    /// Scale both translation and yaw
    pub fn scaled(self, weight: f32) -> Self {
        Self {
            position: self.position * weight,
            yaw: self.yaw * weight,
        }
    }
}

impl std::ops::AddAssign for RootMotion {
    fn add_assign(&mut self, rhs: Self) {
        self.position += rhs.position;
        self.yaw += rhs.yaw;
    }
}

/// Rotate a vector about +Z by `yaw` degrees
pub fn yaw_rotate(vector: Vec3, yaw: f32) -> Vec3 {
    Quat::from_rotation_z(yaw.to_radians()) * vector
}

/// Split a cycle into whole extra loops and a remainder
///
/// A loop boundary belongs to the lower loop: exactly 1.0 stays in the
/// first loop, and negative cycles borrow one extra loop. The count stays
/// in float so very large cycles neither overflow nor saturate.
fn split_loops(cycle: f32) -> (f32, f32) {
    let loops = if cycle > 1.0 {
        cycle.trunc()
    } else if cycle < 0.0 {
        cycle.trunc() - 1.0
    } else {
        0.0
    };

    // Far from zero the remainder loses precision; keep it inside the clip
    (loops, (cycle - loops).clamp(0.0, 1.0))
}

/// Root position and yaw at `cycle`, relative to the start of the clip
///
/// Cycles beyond `[0, 1]` extrapolate by whole loops of the last segment's
/// cumulative motion. Returns `None` if the clip has no movement segments.
pub fn position_at_cycle(clip: &AnimClip, cycle: f32) -> Option<RootMotion> {
    let last = clip.movements.last()?;

    let (loops, cycle) = split_loops(cycle);
    let frame = cycle * (clip.frame_count as f32 - 1.0);

    let mut prev_frame = 0.0;
    let mut origin = RootMotion::ZERO;

    for segment in &clip.movements {
        let end_frame = segment.end_frame as f32;

        if end_frame >= frame {
            let f = safe_ratio(frame - prev_frame, end_frame - prev_frame);
            let d = segment.displacement(f);

            let mut sample = RootMotion {
                position: origin.position + segment.direction * d,
                yaw: origin.yaw * (1.0 - f) + segment.yaw * f,
            };

            if loops != 0.0 {
                sample += RootMotion::new(last.position, last.yaw).scaled(loops);
            }

            return Some(sample);
        }

        prev_frame = end_frame;
        origin = RootMotion::new(segment.position, segment.yaw);
    }

    trace!(
        "Clip '{}': frame {} lies past the last movement segment (end frame {})",
        clip.name, frame, last.end_frame
    );
    Some(origin)
}

/// Root motion between two cycles, expressed in the frame of `cycle_from`
///
/// The translation is rotated by the negative start yaw so the delta can be
/// applied on top of any world orientation. Returns `None` if the clip has
/// no movement segments.
pub fn movement_between(clip: &AnimClip, cycle_from: f32, cycle_to: f32) -> Option<RootMotion> {
    let start = position_at_cycle(clip, cycle_from)?;
    let end = position_at_cycle(clip, cycle_to)?;

    Some(RootMotion {
        position: yaw_rotate(end.position - start.position, -start.yaw),
        yaw: end.yaw - start.yaw,
    })
}
