//! Pose-parameter blending and root motion for studio animation sequences
//!
//! A sequence blends up to four clips laid out on a grid of two pose
//! parameters. This crate answers the per-tick questions an animation
//! update pass asks about such a sequence:
//!
//! - which clips contribute and by how much ([`select_blend`])
//! - how fast the blended sequence plays ([`cycles_per_second`], [`duration`])
//! - how far and how much the root moves and turns between two points of
//!   the cycle ([`sequence_movement`], [`AnimClip::movement_between`])
//!
//! Animation data is read through the [`AnimationStore`] trait; nothing is
//! mutated and no state is kept between calls.
//!
//! # Example
//!
//! ```rust
//! use glam::Vec3;
//! use studio_blend::{
//!     AnimClip, AnimationSet, BlendAxis, MotionSampler, MovementSegment, PoseParameter,
//!     SequenceDesc,
//! };
//!
//! let walk = AnimClip::new("walk", 30.0, 31).with_movements(vec![MovementSegment {
//!     end_frame: 30,
//!     start_velocity: 2.0,
//!     end_velocity: 2.0,
//!     position: Vec3::new(2.0, 0.0, 0.0),
//!     yaw: 0.0,
//!     direction: Vec3::X,
//! }]);
//!
//! let set = AnimationSet::builder()
//!     .pose_parameter(PoseParameter::new("move_speed", 0.0, 1.0))
//!     .clip(AnimClip::new("idle", 30.0, 31))
//!     .clip(walk)
//!     .sequence(SequenceDesc::blended(
//!         "idle_walk",
//!         BlendAxis::uniform(0, 2, 0.0, 1.0),
//!         BlendAxis::fixed(),
//!         vec![0, 1],
//!     ))
//!     .build()?;
//!
//! let sampler = MotionSampler::new(&set);
//! let pose = [sampler.normalize(0, 0.5).normalized];
//!
//! let delta = sampler.sequence_movement(0, 0.0, 1.0, &pose).unwrap_or_default();
//! assert!((delta.position.x - 1.0).abs() < 1e-4);
//! # Ok::<(), studio_blend::BlendError>(())
//! ```

pub mod batch;
pub mod blend;
pub mod clip;
pub mod error;
pub mod motion;
pub mod movement;
pub mod pose;
pub mod resolve;
pub mod sampler;
pub mod sequence;
pub mod store;

// Re-export common types
pub use batch::{MotionRequest, evaluate_batch};
pub use blend::{BlendEntry, BlendResult, select_blend};
pub use clip::{AnimClip, ClipFlags};
pub use error::{BlendError, Result};
pub use motion::{cycles_per_second, duration, ground_speed, move_distance, sequence_movement};
pub use movement::{MovementSegment, RootMotion, movement_between, position_at_cycle, yaw_rotate};
pub use pose::{NormalizedPose, PoseParameter, denormalize_pose, normalize_pose};
pub use resolve::{LocalSetting, resolve_axis};
pub use sampler::MotionSampler;
pub use sequence::{AxisResolution, BlendAxis, SequenceDesc};
pub use store::{AnimationSet, AnimationSetBuilder, AnimationStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
