//! Per-entity batch evaluation
//!
//! An animation update pass asks for one root-motion delta per entity per
//! tick. All queries only read the store, so with the `parallel` feature
//! the batch is spread over rayon's global thread pool.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::motion::sequence_movement;
use crate::movement::RootMotion;
use crate::store::AnimationStore;

/// Root-motion query for one entity
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MotionRequest {
    /// Sequence being played
    pub sequence: usize,
    /// Cycle at the previous tick
    pub cycle_from: f32,
    /// Cycle at this tick
    pub cycle_to: f32,
    /// Normalized global pose parameter values of the entity
    pub pose: Vec<f32>,
}

impl MotionRequest {
    /// Create a request
    pub fn new(sequence: usize, cycle_from: f32, cycle_to: f32, pose: Vec<f32>) -> Self {
        Self {
            sequence,
            cycle_from,
            cycle_to,
            pose,
        }
    }

    fn evaluate<S: AnimationStore + ?Sized>(&self, store: &S) -> Option<RootMotion> {
        sequence_movement(
            store,
            self.sequence,
            self.cycle_from,
            self.cycle_to,
            &self.pose,
        )
    }
}

/// Evaluate every request, returning results in request order
#[cfg(feature = "parallel")]
pub fn evaluate_batch<S: AnimationStore + Sync + ?Sized>(
    store: &S,
    requests: &[MotionRequest],
) -> Vec<Option<RootMotion>> {
    requests.par_iter().map(|r| r.evaluate(store)).collect()
}

/// Evaluate every request, returning results in request order
#[cfg(not(feature = "parallel"))]
pub fn evaluate_batch<S: AnimationStore + ?Sized>(
    store: &S,
    requests: &[MotionRequest],
) -> Vec<Option<RootMotion>> {
    requests.iter().map(|r| r.evaluate(store)).collect()
}
