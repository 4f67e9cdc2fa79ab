//! Query facade over an animation store
//!
//! [`MotionSampler`] bundles the consumer-facing operations so a pose
//! pipeline can hold one borrowed handle per model instead of threading
//! the store through every call.

use crate::blend::{BlendResult, select_blend};
use crate::motion;
use crate::movement::RootMotion;
use crate::pose::{NormalizedPose, denormalize_pose, normalize_pose};
use crate::store::AnimationStore;

/// Borrowed view over an [`AnimationStore`]
#[derive(Debug)]
pub struct MotionSampler<'a, S: AnimationStore + ?Sized> {
    store: &'a S,
}

impl<S: AnimationStore + ?Sized> Clone for MotionSampler<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: AnimationStore + ?Sized> Copy for MotionSampler<'_, S> {}

impl<'a, S: AnimationStore + ?Sized> MotionSampler<'a, S> {
    /// Create a sampler over `store`
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Underlying store
    pub fn store(&self) -> &'a S {
        self.store
    }

    /// Encode a raw value of global pose parameter `index`
    pub fn normalize(&self, index: usize, value: f32) -> NormalizedPose {
        normalize_pose(self.store, index, value)
    }

    /// Decode a normalized value of global pose parameter `index`
    pub fn denormalize(&self, index: usize, normalized: f32) -> f32 {
        denormalize_pose(self.store, index, normalized)
    }

    /// Clips and weights of a sequence
    pub fn select_blend(&self, sequence: usize, pose: &[f32]) -> BlendResult {
        select_blend(self.store, sequence, pose)
    }

    /// Blended cycles per second of a sequence
    pub fn cycles_per_second(&self, sequence: usize, pose: &[f32]) -> f32 {
        motion::cycles_per_second(self.store, sequence, pose)
    }

    /// Seconds per cycle of a sequence
    pub fn duration(&self, sequence: usize, pose: &[f32]) -> f32 {
        motion::duration(self.store, sequence, pose)
    }

    /// Blended root motion of a sequence between two cycles
    pub fn sequence_movement(
        &self,
        sequence: usize,
        cycle_from: f32,
        cycle_to: f32,
        pose: &[f32],
    ) -> Option<RootMotion> {
        motion::sequence_movement(self.store, sequence, cycle_from, cycle_to, pose)
    }

    /// Root motion of one clip between two cycles, bypassing the blend
    pub fn clip_movement(
        &self,
        sequence: usize,
        clip: usize,
        cycle_from: f32,
        cycle_to: f32,
    ) -> Option<RootMotion> {
        self.store
            .clip(sequence, clip)?
            .movement_between(cycle_from, cycle_to)
    }

    /// Average ground speed of a sequence over one cycle
    pub fn ground_speed(&self, sequence: usize, pose: &[f32]) -> f32 {
        motion::ground_speed(self.store, sequence, pose)
    }

    /// Distance travelled by a sequence between two cycles
    pub fn move_distance(
        &self,
        sequence: usize,
        cycle_from: f32,
        cycle_to: f32,
        pose: &[f32],
    ) -> f32 {
        motion::move_distance(self.store, sequence, cycle_from, cycle_to, pose)
    }
}
