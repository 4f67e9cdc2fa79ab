//! Sequence-level playback rate and root motion
//!
//! These combine the per-clip values of a sequence's blend, weighted by
//! the blend weights of [`select_blend`].

use log::warn;

use crate::blend::select_blend;
use crate::clip::AnimClip;
use crate::movement::RootMotion;
use crate::store::AnimationStore;

/// Clip behind a blend entry, warning when the store does not have it
fn blended_clip<S: AnimationStore + ?Sized>(
    store: &S,
    sequence: usize,
    clip: usize,
) -> Option<&AnimClip> {
    let found = store.clip(sequence, clip);
    if found.is_none() {
        warn!("Sequence {}: blended clip {} is missing from the store", sequence, clip);
    }
    found
}

/// Blended playback rate of a sequence in cycles per second
///
/// Clips with one frame or less have no duration and do not contribute.
pub fn cycles_per_second<S: AnimationStore + ?Sized>(
    store: &S,
    sequence: usize,
    pose: &[f32],
) -> f32 {
    let blend = select_blend(store, sequence, pose);

    blend
        .contributing()
        .filter_map(|entry| {
            let clip = blended_clip(store, sequence, entry.clip)?;
            (clip.frame_count > 1).then_some(clip.cycle_rate() * entry.weight)
        })
        .sum()
}

/// Length of one cycle of a sequence in seconds, 0 for a static sequence
pub fn duration<S: AnimationStore + ?Sized>(store: &S, sequence: usize, pose: &[f32]) -> f32 {
    let cps = cycles_per_second(store, sequence, pose);
    if cps == 0.0 { 0.0 } else { 1.0 / cps }
}

/// Blended root motion of a sequence between two cycles
///
/// The result is expressed in the frame of `cycle_from`. Returns `None`
/// when the sequence is not a movement sequence. A non-additive clip
/// without root motion still marks the sequence as moving (with zero
/// motion) as long as the sequence drives the root bone.
///
/// Yaw deltas are summed linearly by weight, which only approximates the
/// blended heading when the clips turn by very different amounts.
pub fn sequence_movement<S: AnimationStore + ?Sized>(
    store: &S,
    sequence: usize,
    cycle_from: f32,
    cycle_to: f32,
    pose: &[f32],
) -> Option<RootMotion> {
    let blend = select_blend(store, sequence, pose);
    let root_weight = store.sequence(sequence).map_or(0.0, |desc| desc.root_weight);

    let mut delta = RootMotion::ZERO;
    let mut found = false;

    for entry in blend.contributing() {
        let Some(clip) = blended_clip(store, sequence, entry.clip) else {
            continue;
        };

        if let Some(local) = clip.movement_between(cycle_from, cycle_to) {
            found = true;
            delta += local.scaled(entry.weight);
        } else if !clip.is_delta() && root_weight > 0.0 {
            found = true;
        }
    }

    found.then_some(delta)
}

/// Distance travelled by a sequence between two cycles
pub fn move_distance<S: AnimationStore + ?Sized>(
    store: &S,
    sequence: usize,
    cycle_from: f32,
    cycle_to: f32,
    pose: &[f32],
) -> f32 {
    sequence_movement(store, sequence, cycle_from, cycle_to, pose)
        .map_or(0.0, |delta| delta.position.length())
}

/// Average ground speed of a sequence over one full cycle
pub fn ground_speed<S: AnimationStore + ?Sized>(store: &S, sequence: usize, pose: &[f32]) -> f32 {
    let seconds = duration(store, sequence, pose);
    if seconds == 0.0 {
        return 0.0;
    }

    move_distance(store, sequence, 0.0, 1.0, pose) / seconds
}
