use thiserror::Error;

/// Error types for assembling an in-memory animation set
///
/// Queries never return these: they degrade to neutral values instead.
/// Only [`AnimationSetBuilder::build`](crate::store::AnimationSetBuilder::build)
/// reports structural problems that would otherwise turn into
/// out-of-bounds reads later on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BlendError {
    /// A blend axis was declared with zero grid cells
    #[error("Sequence '{sequence}': axis {axis} has a group size of zero")]
    EmptyAxis { sequence: String, axis: usize },

    /// The clip grid does not hold one entry per cell
    #[error("Sequence '{sequence}': clip grid has {actual} entries, expected {expected}")]
    GridSizeMismatch {
        sequence: String,
        expected: usize,
        actual: usize,
    },

    /// A key table does not hold one boundary per grid cell
    #[error("Sequence '{sequence}': axis {axis} key table has {actual} keys, expected {expected}")]
    KeyTableMismatch {
        sequence: String,
        axis: usize,
        expected: usize,
        actual: usize,
    },

    /// A grid entry points past the clip table
    #[error("Sequence '{sequence}': clip index {index} is out of range (clip count {count})")]
    ClipOutOfRange {
        sequence: String,
        index: usize,
        count: usize,
    },

    /// A pose parameter reference points past the parameter table
    #[error("Pose parameter index {index} is out of range (parameter count {count})")]
    PoseParameterOutOfRange { index: usize, count: usize },

    /// Movement segment end frames must not decrease
    #[error("Clip '{clip}': movement segment {segment} ends before the previous segment")]
    UnorderedMovement { clip: String, segment: usize },

    /// A pose parameter remap was registered for a sequence that does not exist
    #[error("Pose parameter remap refers to unknown sequence {sequence} (sequence count {count})")]
    UnknownSequence { sequence: usize, count: usize },
}

/// Result type using BlendError
pub type Result<T> = std::result::Result<T, BlendError>;
