//! Read-only access to loaded animation data
//!
//! Every query in this crate reads clips, sequences and pose parameters
//! through [`AnimationStore`]. Engines implement it over their own model
//! data; [`AnimationSet`] is a ready-made in-memory implementation.

use std::collections::HashMap;

use log::debug;

use crate::clip::AnimClip;
use crate::error::{BlendError, Result};
use crate::pose::PoseParameter;
use crate::sequence::{AxisResolution, SequenceDesc};

/// Read accessors over externally owned animation data
pub trait AnimationStore {
    /// Number of sequences
    fn sequence_count(&self) -> usize;

    /// Sequence descriptor by index
    fn sequence(&self, index: usize) -> Option<&SequenceDesc>;

    /// Number of global pose parameters
    fn pose_parameter_count(&self) -> usize;

    /// Pose parameter descriptor by global index
    fn pose_parameter(&self, index: usize) -> Option<&PoseParameter>;

    /// Global pose parameter behind a sequence-local parameter slot
    fn shared_pose_parameter(&self, sequence: usize, local: usize) -> Option<usize>;

    /// Clip referenced by a sequence's grid
    fn clip(&self, sequence: usize, clip: usize) -> Option<&AnimClip>;
}

/// In-memory animation data
///
/// Sequences address clips by their index in the set. Pose parameter slots
/// map one-to-one onto global parameters unless a remap table has been
/// registered for the sequence.
#[derive(Debug, Clone, Default)]
pub struct AnimationSet {
    clips: Vec<AnimClip>,
    sequences: Vec<SequenceDesc>,
    pose_parameters: Vec<PoseParameter>,
    pose_remap: HashMap<usize, Vec<usize>>,
}

impl AnimationSet {
    /// Start building a set
    pub fn builder() -> AnimationSetBuilder {
        AnimationSetBuilder::default()
    }

    /// All clips
    pub fn clips(&self) -> &[AnimClip] {
        &self.clips
    }

    /// All sequences
    pub fn sequences(&self) -> &[SequenceDesc] {
        &self.sequences
    }

    /// All pose parameters
    pub fn pose_parameters(&self) -> &[PoseParameter] {
        &self.pose_parameters
    }

    /// Find a sequence index by label
    pub fn find_sequence(&self, label: &str) -> Option<usize> {
        self.sequences.iter().position(|s| s.label == label)
    }

    /// Find a pose parameter index by name
    pub fn find_pose_parameter(&self, name: &str) -> Option<usize> {
        self.pose_parameters.iter().position(|p| p.name == name)
    }
}

impl AnimationStore for AnimationSet {
    fn sequence_count(&self) -> usize {
        self.sequences.len()
    }

    fn sequence(&self, index: usize) -> Option<&SequenceDesc> {
        self.sequences.get(index)
    }

    fn pose_parameter_count(&self) -> usize {
        self.pose_parameters.len()
    }

    fn pose_parameter(&self, index: usize) -> Option<&PoseParameter> {
        self.pose_parameters.get(index)
    }

    fn shared_pose_parameter(&self, sequence: usize, local: usize) -> Option<usize> {
        match self.pose_remap.get(&sequence) {
            Some(remap) => remap.get(local).copied(),
            None if local < self.pose_parameters.len() => Some(local),
            None => None,
        }
    }

    fn clip(&self, _sequence: usize, clip: usize) -> Option<&AnimClip> {
        self.clips.get(clip)
    }
}

/// Builder for [`AnimationSet`]
#[derive(Debug, Default)]
pub struct AnimationSetBuilder {
    clips: Vec<AnimClip>,
    sequences: Vec<SequenceDesc>,
    pose_parameters: Vec<PoseParameter>,
    pose_remap: HashMap<usize, Vec<usize>>,
}

impl AnimationSetBuilder {
    /// Add a pose parameter; its index is the number added before it
    pub fn pose_parameter(mut self, parameter: PoseParameter) -> Self {
        self.pose_parameters.push(parameter);
        self
    }

    /// Add a clip; its index is the number added before it
    pub fn clip(mut self, clip: AnimClip) -> Self {
        self.clips.push(clip);
        self
    }

    /// Add a sequence; its index is the number added before it
    pub fn sequence(mut self, sequence: SequenceDesc) -> Self {
        self.sequences.push(sequence);
        self
    }

    /// Map a sequence's local parameter slots onto global parameters
    ///
    /// `remap[slot]` is the global parameter index for that slot.
    pub fn share_pose_parameters(mut self, sequence: usize, remap: Vec<usize>) -> Self {
        self.pose_remap.insert(sequence, remap);
        self
    }

    /// Validate indices and produce the set
    pub fn build(self) -> Result<AnimationSet> {
        for clip in &self.clips {
            validate_clip(clip)?;
        }

        for sequence in &self.sequences {
            self.validate_sequence(sequence)?;
        }

        for (&sequence, remap) in &self.pose_remap {
            if sequence >= self.sequences.len() {
                return Err(BlendError::UnknownSequence {
                    sequence,
                    count: self.sequences.len(),
                });
            }
            for &index in remap {
                self.check_pose_parameter(index)?;
            }
        }

        debug!(
            "Built animation set: {} clips, {} sequences, {} pose parameters, {} remapped sequences",
            self.clips.len(),
            self.sequences.len(),
            self.pose_parameters.len(),
            self.pose_remap.len()
        );

        Ok(AnimationSet {
            clips: self.clips,
            sequences: self.sequences,
            pose_parameters: self.pose_parameters,
            pose_remap: self.pose_remap,
        })
    }

    fn check_pose_parameter(&self, index: usize) -> Result<()> {
        if index >= self.pose_parameters.len() {
            return Err(BlendError::PoseParameterOutOfRange {
                index,
                count: self.pose_parameters.len(),
            });
        }
        Ok(())
    }

    fn validate_sequence(&self, sequence: &SequenceDesc) -> Result<()> {
        for (axis_index, axis) in sequence.axes.iter().enumerate() {
            if axis.group_size == 0 {
                return Err(BlendError::EmptyAxis {
                    sequence: sequence.label.clone(),
                    axis: axis_index,
                });
            }

            if let AxisResolution::KeyTable { keys } = &axis.resolution {
                if keys.len() != axis.group_size {
                    return Err(BlendError::KeyTableMismatch {
                        sequence: sequence.label.clone(),
                        axis: axis_index,
                        expected: axis.group_size,
                        actual: keys.len(),
                    });
                }
            }
        }

        let expected = sequence.cell_count();
        if sequence.clips.len() != expected {
            return Err(BlendError::GridSizeMismatch {
                sequence: sequence.label.clone(),
                expected,
                actual: sequence.clips.len(),
            });
        }

        if let Some(&index) = sequence.clips.iter().find(|&&c| c >= self.clips.len()) {
            return Err(BlendError::ClipOutOfRange {
                sequence: sequence.label.clone(),
                index,
                count: self.clips.len(),
            });
        }

        Ok(())
    }
}

fn validate_clip(clip: &AnimClip) -> Result<()> {
    for (i, pair) in clip.movements.windows(2).enumerate() {
        if pair[1].end_frame < pair[0].end_frame {
            return Err(BlendError::UnorderedMovement {
                clip: clip.name.clone(),
                segment: i + 1,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::MovementSegment;
    use crate::sequence::BlendAxis;
    use glam::Vec3;
    use pretty_assertions::assert_eq;

    fn segment(end_frame: u32) -> MovementSegment {
        MovementSegment {
            end_frame,
            start_velocity: 1.0,
            end_velocity: 1.0,
            position: Vec3::X * end_frame as f32,
            yaw: 0.0,
            direction: Vec3::X,
        }
    }

    #[test]
    fn test_build_and_lookup() {
        let set = AnimationSet::builder()
            .pose_parameter(PoseParameter::new("move_x", -1.0, 1.0))
            .clip(AnimClip::new("idle", 30.0, 1))
            .clip(AnimClip::new("walk", 30.0, 31))
            .sequence(SequenceDesc::single("idle", 0))
            .sequence(SequenceDesc::blended(
                "move",
                BlendAxis::uniform(0, 2, -1.0, 1.0),
                BlendAxis::fixed(),
                vec![0, 1],
            ))
            .build()
            .unwrap();

        assert_eq!(set.sequence_count(), 2);
        assert_eq!(set.pose_parameter_count(), 1);
        assert_eq!(set.find_sequence("move"), Some(1));
        assert_eq!(set.find_pose_parameter("move_x"), Some(0));
        assert_eq!(set.clip(1, 1).map(|c| c.name.as_str()), Some("walk"));
        assert_eq!(set.shared_pose_parameter(1, 0), Some(0));
        assert_eq!(set.shared_pose_parameter(1, 1), None);
    }

    #[test]
    fn test_pose_remap() {
        let set = AnimationSet::builder()
            .pose_parameter(PoseParameter::new("a", 0.0, 1.0))
            .pose_parameter(PoseParameter::new("b", 0.0, 1.0))
            .clip(AnimClip::new("idle", 30.0, 1))
            .sequence(SequenceDesc::single("idle", 0))
            .share_pose_parameters(0, vec![1, 0])
            .build()
            .unwrap();

        assert_eq!(set.shared_pose_parameter(0, 0), Some(1));
        assert_eq!(set.shared_pose_parameter(0, 1), Some(0));
        assert_eq!(set.shared_pose_parameter(0, 2), None);
    }

    #[test]
    fn test_grid_size_mismatch() {
        let err = AnimationSet::builder()
            .clip(AnimClip::new("idle", 30.0, 1))
            .sequence(SequenceDesc::blended(
                "move",
                BlendAxis::uniform(0, 3, 0.0, 1.0),
                BlendAxis::fixed(),
                vec![0, 0],
            ))
            .build()
            .unwrap_err();

        assert_eq!(
            err,
            BlendError::GridSizeMismatch {
                sequence: "move".to_string(),
                expected: 3,
                actual: 2,
            }
        );
    }

    #[test]
    fn test_key_table_mismatch() {
        let mut axis = BlendAxis::keyed(0, vec![0.0, 1.0, 2.0]);
        axis.group_size = 2;

        let err = AnimationSet::builder()
            .clip(AnimClip::new("idle", 30.0, 1))
            .sequence(SequenceDesc::blended("move", axis, BlendAxis::fixed(), vec![0, 0]))
            .build()
            .unwrap_err();

        assert!(matches!(err, BlendError::KeyTableMismatch { expected: 2, actual: 3, .. }));
    }

    #[test]
    fn test_empty_axis() {
        let mut axis = BlendAxis::fixed();
        axis.group_size = 0;

        let err = AnimationSet::builder()
            .clip(AnimClip::new("idle", 30.0, 1))
            .sequence(SequenceDesc::blended("move", BlendAxis::fixed(), axis, vec![]))
            .build()
            .unwrap_err();

        assert!(matches!(err, BlendError::EmptyAxis { axis: 1, .. }));
    }

    #[test]
    fn test_clip_out_of_range() {
        let err = AnimationSet::builder()
            .clip(AnimClip::new("idle", 30.0, 1))
            .sequence(SequenceDesc::single("idle", 4))
            .build()
            .unwrap_err();

        assert!(matches!(err, BlendError::ClipOutOfRange { index: 4, count: 1, .. }));
    }

    #[test]
    fn test_unordered_movement() {
        let clip = AnimClip::new("walk", 30.0, 31).with_movements(vec![segment(20), segment(10)]);
        let err = AnimationSet::builder().clip(clip).build().unwrap_err();

        assert!(matches!(err, BlendError::UnorderedMovement { segment: 1, .. }));
    }

    #[test]
    fn test_remap_validation() {
        let err = AnimationSet::builder()
            .pose_parameter(PoseParameter::new("a", 0.0, 1.0))
            .share_pose_parameters(3, vec![0])
            .build()
            .unwrap_err();
        assert!(matches!(err, BlendError::UnknownSequence { sequence: 3, count: 0 }));

        let err = AnimationSet::builder()
            .pose_parameter(PoseParameter::new("a", 0.0, 1.0))
            .clip(AnimClip::new("idle", 30.0, 1))
            .sequence(SequenceDesc::single("idle", 0))
            .share_pose_parameters(0, vec![2])
            .build()
            .unwrap_err();
        assert!(matches!(err, BlendError::PoseParameterOutOfRange { index: 2, count: 1 }));
    }
}
