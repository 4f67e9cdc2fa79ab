//! Pose parameter encoding
//!
//! Pose parameters are continuous controls (move yaw, move speed, aim
//! pitch...) declared with a raw range and an optional loop period.
//! Entities store them in a normalized 0..1 encoding; this module converts
//! between the two.

use log::debug;

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

use crate::store::AnimationStore;

/// Descriptor of a single pose parameter
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct PoseParameter {
    /// Parameter name (e.g. "move_yaw")
    pub name: String,
    /// Raw value mapped to 0.0
    pub start: f32,
    /// Raw value mapped to 1.0
    pub end: f32,
    /// Wrap period in raw units, 0.0 for a non-cyclic parameter
    pub loop_period: f32,
}

/// Result of normalizing a raw pose value
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NormalizedPose {
    /// Raw value after wrapping and clamping into `[start, end]`
    pub value: f32,
    /// Normalized encoding in `[0, 1]`
    pub normalized: f32,
}

impl NormalizedPose {
    /// Neutral result used for unknown parameters
    pub const ZERO: Self = Self {
        value: 0.0,
        normalized: 0.0,
    };
}

impl PoseParameter {
    /// Create a non-cyclic parameter
    pub fn new(name: impl Into<String>, start: f32, end: f32) -> Self {
        Self {
            name: name.into(),
            start,
            end,
            loop_period: 0.0,
        }
    }

    /// Create a cyclic parameter wrapping every `loop_period` raw units
    pub fn cyclic(name: impl Into<String>, start: f32, end: f32, loop_period: f32) -> Self {
        Self {
            name: name.into(),
            start,
            end,
            loop_period,
        }
    }

    /// Check if the parameter wraps around
    pub fn is_cyclic(&self) -> bool {
        self.loop_period != 0.0
    }

    /// Width of the raw range
    pub fn span(&self) -> f32 {
        self.end - self.start
    }

    /// Wrap a value into one loop period
    ///
    /// The wrap point sits half a period away from the middle of the range,
    /// so values inside `[start, end]` are never moved.
    pub fn wrap(&self, value: f32) -> f32 {
        if !self.is_cyclic() {
            return value;
        }

        let period = self.loop_period;
        let wrap = (self.start + self.end) / 2.0 + period / 2.0;
        let shift = period - wrap;

        value - period * ((value + shift) / period).floor()
    }

    /// Position of a raw value inside the range, unclamped
    pub fn ratio(&self, value: f32) -> f32 {
        safe_ratio(value - self.start, self.span())
    }

    /// Convert a raw value into its 0..1 encoding
    pub fn normalize(&self, value: f32) -> NormalizedPose {
        let wrapped = self.wrap(value);
        let normalized = self.ratio(wrapped).clamp(0.0, 1.0);

        NormalizedPose {
            value: normalized * self.span() + self.start,
            normalized,
        }
    }

    /// Convert a 0..1 encoding back into raw units
    ///
    /// No wrapping or clamping is applied.
    pub fn denormalize(&self, normalized: f32) -> f32 {
        normalized * self.span() + self.start
    }
}

/// Normalize a raw value for the global pose parameter `index`
///
/// Unknown parameters yield [`NormalizedPose::ZERO`].
pub fn normalize_pose<S: AnimationStore + ?Sized>(
    store: &S,
    index: usize,
    value: f32,
) -> NormalizedPose {
    match store.pose_parameter(index) {
        Some(parameter) => parameter.normalize(value),
        None => {
            debug!(
                "Pose parameter {} out of range (count {})",
                index,
                store.pose_parameter_count()
            );
            NormalizedPose::ZERO
        }
    }
}

/// Raw value of a normalized global pose parameter, 0.0 if unknown
pub fn denormalize_pose<S: AnimationStore + ?Sized>(
    store: &S,
    index: usize,
    normalized: f32,
) -> f32 {
    store
        .pose_parameter(index)
        .map_or(0.0, |parameter| parameter.denormalize(normalized))
}

/// Division that treats a zero denominator as a zero result
///
/// Degenerate ranges (`end == start`) and zero-length segments resolve to
/// the start of the range instead of producing NaN or infinity.
pub(crate) fn safe_ratio(numerator: f32, denominator: f32) -> f32 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}
