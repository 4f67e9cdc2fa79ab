//! Sequence descriptors
//!
//! A sequence arranges clips on a grid of up to two blend axes. Each axis
//! is driven by one pose parameter and is split into `group_size` columns
//! (or rows); the clip at grid cell `(i0, i1)` is stored row-major.

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

/// How a pose value is mapped onto an axis' grid cells
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub enum AxisResolution {
    /// Grid cells are spread evenly across `[start, end]` (raw units)
    Uniform { start: f32, end: f32 },
    /// Explicit raw-unit boundary per grid cell
    KeyTable { keys: Vec<f32> },
}

/// One blend axis of a sequence
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct BlendAxis {
    /// Sequence-local pose parameter slot, `None` if the axis is unused
    pub parameter: Option<usize>,
    /// Number of grid cells along the axis
    pub group_size: usize,
    /// Value-to-cell mapping
    pub resolution: AxisResolution,
}

impl BlendAxis {
    /// Axis with a single cell and no driving parameter
    pub fn fixed() -> Self {
        Self {
            parameter: None,
            group_size: 1,
            resolution: AxisResolution::Uniform {
                start: 0.0,
                end: 0.0,
            },
        }
    }

    /// Axis with cells spread evenly over `[start, end]`
    pub fn uniform(parameter: usize, group_size: usize, start: f32, end: f32) -> Self {
        Self {
            parameter: Some(parameter),
            group_size,
            resolution: AxisResolution::Uniform { start, end },
        }
    }

    /// Axis with one explicit key per cell
    pub fn keyed(parameter: usize, keys: Vec<f32>) -> Self {
        Self {
            parameter: Some(parameter),
            group_size: keys.len(),
            resolution: AxisResolution::KeyTable { keys },
        }
    }

    /// Check if the axis always resolves to its first cell
    pub fn is_collapsed(&self) -> bool {
        self.group_size <= 1
    }
}

impl Default for BlendAxis {
    fn default() -> Self {
        Self::fixed()
    }
}

/// Blend of up to four clips selected by two pose parameters
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct SequenceDesc {
    /// Sequence label (e.g. "run_9way")
    pub label: String,
    /// Blend axes 0 and 1
    pub axes: [BlendAxis; 2],
    /// Clip indices, row-major: `clips[i1 * group_size(0) + i0]`
    pub clips: Vec<usize>,
    /// Weight of the root bone in this sequence
    pub root_weight: f32,
}

impl SequenceDesc {
    /// Sequence playing a single clip
    pub fn single(label: impl Into<String>, clip: usize) -> Self {
        Self {
            label: label.into(),
            axes: [BlendAxis::fixed(), BlendAxis::fixed()],
            clips: vec![clip],
            root_weight: 1.0,
        }
    }

    /// Sequence blending `clips` over the given axes
    pub fn blended(
        label: impl Into<String>,
        axis0: BlendAxis,
        axis1: BlendAxis,
        clips: Vec<usize>,
    ) -> Self {
        Self {
            label: label.into(),
            axes: [axis0, axis1],
            clips,
            root_weight: 1.0,
        }
    }

    /// Set the root bone weight
    pub fn with_root_weight(mut self, root_weight: f32) -> Self {
        self.root_weight = root_weight;
        self
    }

    /// Number of cells along an axis (0 for an unknown axis)
    pub fn group_size(&self, axis: usize) -> usize {
        self.axes.get(axis).map_or(0, |a| a.group_size)
    }

    /// Number of grid cells
    pub fn cell_count(&self) -> usize {
        self.group_size(0) * self.group_size(1)
    }

    /// Clip at grid cell `(i0, i1)`
    ///
    /// Indices are clamped to the last cell of their axis, so the upper
    /// corner of a collapsed axis reads its only cell.
    pub fn clip_at(&self, i0: usize, i1: usize) -> Option<usize> {
        let width = self.group_size(0);
        let height = self.group_size(1);
        if width == 0 || height == 0 {
            return None;
        }

        let i0 = i0.min(width - 1);
        let i1 = i1.min(height - 1);
        self.clips.get(i1 * width + i0).copied()
    }
}
