//! Breadth-first reindexing.
//!
//! Construction leaves elements in depth-first order, where one parent's
//! children can be interleaved with a sibling's descendants. After this pass
//! every element sits at `(elements shallower than it) + (its rank at its
//! depth)`, so each element's children form one contiguous run starting at
//! `first_child`.

use crate::engine::{Element, UiContext};
use crate::errors::{FramePhase, Pass, UiError};

/// Reorders `elements` breadth-first in O(n). `scratch`, `depth_counts` and
/// `new_index` are reused buffers.
pub(crate) fn breadth_first(
    elements: &mut Vec<Element>,
    scratch: &mut Vec<Element>,
    depth_counts: &mut Vec<usize>,
    new_index: &mut Vec<usize>,
) {
    depth_counts.clear();
    for element in elements.iter() {
        let depth = element.depth as usize;
        if depth_counts.len() <= depth {
            depth_counts.resize(depth + 1, 0);
        }
        depth_counts[depth] += 1;
    }

    // Counts become the next free slot of each depth.
    let mut offset = 0;
    for count in depth_counts.iter_mut() {
        let n = *count;
        *count = offset;
        offset += n;
    }

    // `index` still holds the construction slot; stash the new one in a
    // parallel pass so `first_child` can be translated before moving.
    new_index.clear();
    for element in elements.iter() {
        let slot = &mut depth_counts[element.depth as usize];
        new_index.push(*slot);
        *slot += 1;
    }

    scratch.clear();
    scratch.resize(elements.len(), elements.first().copied().unwrap_or_else(placeholder));
    for (old, element) in elements.iter().enumerate() {
        let mut moved = *element;
        moved.index = new_index[old];
        if moved.child_count > 0 {
            moved.first_child = new_index[element.first_child];
        }
        scratch[moved.index] = moved;
    }
    core::mem::swap(elements, scratch);
}

fn placeholder() -> Element {
    Element::new(0, 0, crate::engine::ElementKind::Container(Default::default()))
}

impl UiContext {
    /// Reorders the finished tree breadth-first. Runs once per frame, after
    /// building.
    pub fn reindex(&mut self) -> Result<(), UiError> {
        self.expect_phase(Pass::Reindex, FramePhase::Building)?;
        let open = self.open_elements();
        if open > 0 {
            return Err(UiError::UnclosedElements { open });
        }
        breadth_first(
            &mut self.elements,
            &mut self.reindex_buffer,
            &mut self.depth_counts,
            &mut self.reindex_slots,
        );
        self.stats.elements = self.elements.len();
        self.phase = FramePhase::Reindexed;
        tracing::trace!(elements = self.elements.len(), depths = self.depth_counts.len(), "reindexed");
        Ok(())
    }
}
