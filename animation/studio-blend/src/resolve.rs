//! Global pose value to local grid position
//!
//! Each blend axis of a sequence turns the (normalized) value of its pose
//! parameter into a grid cell index plus a fraction inside that cell.

use log::trace;

use crate::pose::{PoseParameter, safe_ratio};
use crate::sequence::{AxisResolution, BlendAxis, SequenceDesc};
use crate::store::AnimationStore;

/// Position along one blend axis
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LocalSetting {
    /// Fraction between cell `index` and `index + 1`, in `[0, 1]`
    pub fraction: f32,
    /// Lower grid cell
    pub index: usize,
}

impl LocalSetting {
    /// First cell, no blending
    pub const ZERO: Self = Self {
        fraction: 0.0,
        index: 0,
    };
}

/// Resolve axis `axis` of `desc` against the global pose values
///
/// `pose` holds one normalized value per global pose parameter. Axes
/// without a parameter, collapsed axes and unknown parameters resolve to
/// [`LocalSetting::ZERO`].
pub fn resolve_axis<S: AnimationStore + ?Sized>(
    store: &S,
    sequence: usize,
    desc: &SequenceDesc,
    axis: usize,
    pose: &[f32],
) -> LocalSetting {
    let Some(blend_axis) = desc.axes.get(axis) else {
        return LocalSetting::ZERO;
    };

    if blend_axis.is_collapsed() {
        trace!("Sequence '{}': axis {} is collapsed", desc.label, axis);
        return LocalSetting::ZERO;
    }

    let Some(pose_index) = blend_axis
        .parameter
        .and_then(|local| store.shared_pose_parameter(sequence, local))
    else {
        return LocalSetting::ZERO;
    };

    let Some(parameter) = store.pose_parameter(pose_index) else {
        return LocalSetting::ZERO;
    };

    let value = parameter.wrap(pose.get(pose_index).copied().unwrap_or(0.0));

    match &blend_axis.resolution {
        AxisResolution::Uniform { start, end } => {
            resolve_uniform(parameter, blend_axis, *start, *end, value)
        }
        AxisResolution::KeyTable { keys } => resolve_keyed(parameter, blend_axis, keys, value),
    }
}

/// Evenly spaced cells over `[start, end]`
fn resolve_uniform(
    parameter: &PoseParameter,
    axis: &BlendAxis,
    start: f32,
    end: f32,
    value: f32,
) -> LocalSetting {
    let local_start = parameter.ratio(start);
    let local_end = parameter.ratio(end);

    let fraction = safe_ratio(value - local_start, local_end - local_start).clamp(0.0, 1.0);

    if axis.group_size <= 2 {
        return LocalSetting { fraction, index: 0 };
    }

    let cells = (axis.group_size - 1) as f32;
    let index = ((fraction * cells) as usize).min(axis.group_size - 2);

    LocalSetting {
        fraction: fraction * cells - index as f32,
        index,
    }
}

/// Explicit cell boundaries, scanned forward from the first cell
fn resolve_keyed(
    parameter: &PoseParameter,
    axis: &BlendAxis,
    keys: &[f32],
    value: f32,
) -> LocalSetting {
    let value = parameter.denormalize(value);
    let last_cell = axis.group_size.saturating_sub(2);
    let mut index = 0;

    let fraction = loop {
        let (Some(&low), Some(&high)) = (keys.get(index), keys.get(index + 1)) else {
            break 0.0;
        };

        let fraction = safe_ratio(value - low, high - low);

        // The scan only ever moves forward; values below the first key clamp
        if index < last_cell && fraction > 1.0 {
            index += 1;
            continue;
        }
        break fraction;
    };

    LocalSetting {
        fraction: fraction.clamp(0.0, 1.0),
        index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::AnimClip;
    use crate::store::AnimationSet;
    use test_case::test_case;

    fn store_with(parameter: PoseParameter, axis0: BlendAxis, axis1: BlendAxis) -> AnimationSet {
        let cells = axis0.group_size * axis1.group_size;
        AnimationSet::builder()
            .pose_parameter(parameter)
            .clip(AnimClip::new("clip", 30.0, 10))
            .sequence(SequenceDesc::blended("seq", axis0, axis1, vec![0; cells]))
            .build()
            .unwrap()
    }

    fn resolve(store: &AnimationSet, axis: usize, value: f32) -> LocalSetting {
        let desc = store.sequence(0).unwrap();
        resolve_axis(store, 0, desc, axis, &[value])
    }

    #[test]
    fn test_uniform_two_cells() {
        let store = store_with(
            PoseParameter::new("speed", 0.0, 10.0),
            BlendAxis::uniform(0, 2, 0.0, 10.0),
            BlendAxis::fixed(),
        );

        let setting = resolve(&store, 0, 0.25);
        assert_eq!(setting.index, 0);
        assert!((setting.fraction - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_uniform_sub_range() {
        // Axis covers raw 5..10 of a 0..10 parameter
        let store = store_with(
            PoseParameter::new("speed", 0.0, 10.0),
            BlendAxis::uniform(0, 2, 5.0, 10.0),
            BlendAxis::fixed(),
        );

        assert!((resolve(&store, 0, 0.75).fraction - 0.5).abs() < 1e-6);
        assert_eq!(resolve(&store, 0, 0.25).fraction, 0.0);
    }

    #[test_case(0.0, 0, 0.0 ; "start")]
    #[test_case(0.125, 0, 0.5 ; "inside first cell")]
    #[test_case(0.5, 2, 0.0 ; "cell boundary")]
    #[test_case(0.875, 3, 0.5 ; "inside last cell")]
    #[test_case(1.0, 3, 1.0 ; "end stays in last cell")]
    #[test_case(1.5, 3, 1.0 ; "clamped above")]
    #[test_case(-0.5, 0, 0.0 ; "clamped below")]
    fn test_uniform_subdivision(value: f32, index: usize, fraction: f32) {
        let store = store_with(
            PoseParameter::new("move_x", -1.0, 1.0),
            BlendAxis::uniform(0, 5, -1.0, 1.0),
            BlendAxis::fixed(),
        );

        let setting = resolve(&store, 0, value);
        assert_eq!(setting.index, index);
        assert!((setting.fraction - fraction).abs() < 1e-5, "{setting:?}");
    }

    #[test_case(0.0, 0, 0.0 ; "first key")]
    #[test_case(90.0, 0, 1.0 ; "second key ends first cell")]
    #[test_case(112.5, 1, 0.5 ; "second cell")]
    #[test_case(168.75, 2, 0.75 ; "third cell")]
    #[test_case(180.0, 2, 1.0 ; "last key")]
    #[test_case(270.0, 2, 1.0 ; "past last key")]
    fn test_key_table(raw: f32, index: usize, fraction: f32) {
        let store = store_with(
            PoseParameter::new("move_yaw", 0.0, 360.0),
            BlendAxis::keyed(0, vec![0.0, 90.0, 135.0, 180.0]),
            BlendAxis::fixed(),
        );

        let setting = resolve(&store, 0, raw / 360.0);
        assert_eq!(setting.index, index, "{setting:?}");
        assert!((setting.fraction - fraction).abs() < 1e-5, "{setting:?}");
    }

    #[test]
    fn test_key_table_never_scans_backwards() {
        let store = store_with(
            PoseParameter::new("lean", -90.0, 90.0),
            BlendAxis::keyed(0, vec![-45.0, 0.0, 45.0]),
            BlendAxis::fixed(),
        );

        // Below the first key: stays in cell 0, clamped to 0
        let setting = resolve(&store, 0, 0.0);
        assert_eq!(setting, LocalSetting::ZERO);

        // Past the last key: stops at the last cell, clamped to 1
        let setting = resolve(&store, 0, 1.0);
        assert_eq!(setting.index, 1);
        assert_eq!(setting.fraction, 1.0);
    }

    #[test]
    fn test_collapsed_axis_ignores_parameter() {
        let store = store_with(
            PoseParameter::new("speed", 0.0, 10.0),
            BlendAxis::uniform(0, 3, 0.0, 10.0),
            BlendAxis::uniform(0, 1, 0.0, 10.0),
        );

        for value in [0.0, 0.3, 0.9, 2.0] {
            assert_eq!(resolve(&store, 1, value), LocalSetting::ZERO);
        }
    }

    #[test]
    fn test_unmapped_parameter() {
        let mut axis0 = BlendAxis::uniform(0, 2, 0.0, 1.0);
        axis0.parameter = Some(5);
        let store = store_with(PoseParameter::new("speed", 0.0, 1.0), axis0, BlendAxis::fixed());

        assert_eq!(resolve(&store, 0, 0.5), LocalSetting::ZERO);
        assert_eq!(resolve(&store, 7, 0.5), LocalSetting::ZERO);
    }

    #[test]
    fn test_missing_pose_value_reads_zero() {
        let store = store_with(
            PoseParameter::new("speed", 0.0, 10.0),
            BlendAxis::uniform(0, 2, 0.0, 10.0),
            BlendAxis::fixed(),
        );
        let desc = store.sequence(0).unwrap();

        assert_eq!(resolve_axis(&store, 0, desc, 0, &[]), LocalSetting::ZERO);
    }

    #[test]
    fn test_cyclic_wrap_applies_to_pose_value() {
        // A period of 1.0 on a 0..1 parameter wraps normalized values
        let store = store_with(
            PoseParameter::cyclic("phase", 0.0, 1.0, 1.0),
            BlendAxis::uniform(0, 2, 0.0, 1.0),
            BlendAxis::fixed(),
        );

        let setting = resolve(&store, 0, 1.25);
        assert!((setting.fraction - 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_degenerate_axis_range_is_finite() {
        let store = store_with(
            PoseParameter::new("speed", 0.0, 10.0),
            BlendAxis::uniform(0, 2, 4.0, 4.0),
            BlendAxis::fixed(),
        );

        let setting = resolve(&store, 0, 0.9);
        assert_eq!(setting, LocalSetting::ZERO);
    }
}
