//! Containment highlighting during block drags.
//!
//! While a block moves, every other block whose composite bounds overlap
//! the dragged block, or fully contain it, gets a highlight outline. All
//! block outlines are cleared when the drag ends. Nothing is reparented.

use crate::session::SceneMutation;
use bd_core::Scene;
use bd_core::id::ObjectId;
use bd_core::model::{Bounds, ObjectTag, Stroke};

#[derive(Debug, Clone, Copy)]
pub struct ContainmentHighlighter {
    pub highlight: Stroke,
}

impl ContainmentHighlighter {
    pub fn new(highlight: Stroke) -> Self {
        Self { highlight }
    }

    /// True when `dragged` overlaps `candidate` or lies fully inside it.
    pub fn relates(dragged: &Bounds, candidate: &Bounds) -> bool {
        dragged.intersects(candidate) || dragged.is_contained_within(candidate)
    }

    /// Outline updates for one move step of `dragged`.
    /// Only blocks whose outline actually changes are returned.
    pub fn scan(&self, scene: &Scene, dragged: ObjectId) -> Vec<SceneMutation> {
        let Some(dragged_bounds) = scene.composite_bounds(dragged) else {
            return Vec::new();
        };

        let mut out = Vec::new();
        for id in scene.ids_of(ObjectTag::Block) {
            if id == dragged {
                continue;
            }
            let (Some(candidate), Some(bounds)) = (scene.get(id), scene.composite_bounds(id))
            else {
                continue;
            };
            let wanted = Self::relates(&dragged_bounds, &bounds).then_some(self.highlight);
            log::trace!("highlight scan {dragged} vs {id}: {}", wanted.is_some());
            if candidate.outline != wanted {
                out.push(SceneMutation::SetOutline {
                    id,
                    outline: wanted,
                });
            }
        }
        out
    }

    /// Outline resets for every block, regardless of prior state.
    pub fn clear(&self, scene: &Scene) -> Vec<SceneMutation> {
        scene
            .ids_of(ObjectTag::Block)
            .into_iter()
            .map(|id| SceneMutation::SetOutline { id, outline: None })
            .collect()
    }
}
