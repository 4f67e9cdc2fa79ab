//! Bilinear clip selection
//!
//! Both axes of a sequence are resolved independently; the four grid cells
//! around the resulting position are weighted bilinearly.

use log::debug;

use crate::resolve::resolve_axis;
use crate::store::AnimationStore;

/// One clip of a blend and its weight
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BlendEntry {
    /// Clip index as referenced by the sequence grid
    pub clip: usize,
    /// Blend weight in `[0, 1]`
    pub weight: f32,
}

/// The four corner clips of a sequence blend
///
/// Entries are ordered `(i0, i1)`, `(i0+1, i1)`, `(i0, i1+1)`,
/// `(i0+1, i1+1)`. Weights sum to 1 for a valid sequence and are all 0
/// otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BlendResult {
    pub entries: [BlendEntry; 4],
}

impl BlendResult {
    /// Blend with no contributing clips
    pub const EMPTY: Self = Self {
        entries: [BlendEntry {
            clip: 0,
            weight: 0.0,
        }; 4],
    };

    /// Entries with a positive weight
    pub fn contributing(&self) -> impl Iterator<Item = &BlendEntry> {
        self.entries.iter().filter(|e| e.weight > 0.0)
    }

    /// Sum of all weights
    pub fn total_weight(&self) -> f32 {
        self.entries.iter().map(|e| e.weight).sum()
    }

    /// Check if no clip contributes
    pub fn is_empty(&self) -> bool {
        self.contributing().next().is_none()
    }
}

/// Select the clips and weights of `sequence` for the given pose values
///
/// `pose` holds one normalized value per global pose parameter.
pub fn select_blend<S: AnimationStore + ?Sized>(
    store: &S,
    sequence: usize,
    pose: &[f32],
) -> BlendResult {
    let desc = match store.sequence(sequence) {
        Some(desc) if sequence < store.sequence_count() => desc,
        _ => {
            debug!(
                "Sequence {} out of range (count {})",
                sequence,
                store.sequence_count()
            );
            return BlendResult::EMPTY;
        }
    };

    let s0 = resolve_axis(store, sequence, desc, 0, pose);
    let s1 = resolve_axis(store, sequence, desc, 1, pose);

    let (i0, i1) = (s0.index, s1.index);
    let (f0, f1) = (s0.fraction, s1.fraction);

    let corners = [
        (i0, i1, (1.0 - f0) * (1.0 - f1)),
        (i0 + 1, i1, f0 * (1.0 - f1)),
        (i0, i1 + 1, (1.0 - f0) * f1),
        (i0 + 1, i1 + 1, f0 * f1),
    ];

    let mut result = BlendResult::EMPTY;
    for (entry, (c0, c1, weight)) in result.entries.iter_mut().zip(corners) {
        match desc.clip_at(c0, c1) {
            Some(clip) => *entry = BlendEntry { clip, weight },
            None => {
                debug!(
                    "Sequence '{}': no clip at grid cell ({}, {})",
                    desc.label, c0, c1
                );
                return BlendResult::EMPTY;
            }
        }
    }

    result
}
