//! Shared value types for the windowed list.
//!
//! These types cross crate boundaries: the renderer produces them, the
//! boundary watcher consumes them and the scroll controller shuttles them
//! between the two. None of them own anything attached to the render
//! surface; a `SlotId` is a position tag, never a handle.
//!
//! Invariants:
//! * `Spacers` fields are non-negative after every completed render.
//! * A `BoundaryPair` always names occupied slots, `first.0 <= last.0`, and
//!   `last_index - first_index == last.0 - first.0` (slots are labeled with
//!   consecutive logical indices).

mod spacers;
pub use spacers::Spacers;

/// Position tag of a reusable slot inside the window arena.
///
/// Slot `i` always holds the `i`-th element of the current page; relabeling
/// a page rewrites content but never moves or reallocates a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub usize);

/// Which end of the materialized window a notification refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundaryEdge {
    /// First occupied slot (lowest logical index). Visible => scroll back.
    First,
    /// Last occupied slot (highest logical index). Visible => scroll forward.
    Last,
}

impl BoundaryEdge {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoundaryEdge::First => "first",
            BoundaryEdge::Last => "last",
        }
    }
}

/// Direction of a page transition, selecting how spacers are recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderDirection {
    /// First render of a session; spacers are computed from scratch.
    Initial,
    /// Toward higher logical indices.
    Advance,
    /// Toward lower logical indices.
    Retreat,
}

impl RenderDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderDirection::Initial => "initial",
            RenderDirection::Advance => "advance",
            RenderDirection::Retreat => "retreat",
        }
    }
}

/// The first and last occupied slots of the current window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryPair {
    pub first: SlotId,
    pub last: SlotId,
    /// Logical index currently shown by `first`.
    pub first_index: usize,
    /// Logical index currently shown by `last`.
    pub last_index: usize,
}

impl BoundaryPair {
    /// Pair for a window of `count` occupied slots whose first slot shows
    /// logical index `start`. `None` for an empty window.
    pub fn for_window(start: usize, count: usize) -> Option<Self> {
        if count == 0 {
            return None;
        }
        Some(Self {
            first: SlotId(0),
            last: SlotId(count - 1),
            first_index: start,
            last_index: start + count - 1,
        })
    }

    /// Edge watched on `slot`, if any. A single-slot window reports `First`:
    /// only the final page can be that short, so moving forward is never
    /// possible from it.
    pub fn edge_of(&self, slot: SlotId) -> Option<BoundaryEdge> {
        if slot == self.first {
            Some(BoundaryEdge::First)
        } else if slot == self.last {
            Some(BoundaryEdge::Last)
        } else {
            None
        }
    }

    pub fn is_single(&self) -> bool {
        self.first == self.last
    }

    /// Slots to observe: one or two, never the same slot twice.
    pub fn slots(&self) -> impl Iterator<Item = SlotId> {
        let last = (!self.is_single()).then_some(self.last);
        std::iter::once(self.first).chain(last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_for_full_window() {
        let pair = BoundaryPair::for_window(42, 42).unwrap();
        assert_eq!(pair.first, SlotId(0));
        assert_eq!(pair.last, SlotId(41));
        assert_eq!(pair.first_index, 42);
        assert_eq!(pair.last_index, 83);
        assert_eq!(pair.slots().collect::<Vec<_>>(), vec![SlotId(0), SlotId(41)]);
    }

    #[test]
    fn empty_window_has_no_pair() {
        assert!(BoundaryPair::for_window(0, 0).is_none());
    }

    #[test]
    fn single_slot_window_maps_to_first() {
        let pair = BoundaryPair::for_window(9_996, 1).unwrap();
        assert!(pair.is_single());
        assert_eq!(pair.edge_of(SlotId(0)), Some(BoundaryEdge::First));
        assert_eq!(pair.slots().count(), 1);
    }

    #[test]
    fn interior_slot_is_not_an_edge() {
        let pair = BoundaryPair::for_window(0, 42).unwrap();
        assert_eq!(pair.edge_of(SlotId(7)), None);
        assert_eq!(pair.edge_of(SlotId(41)), Some(BoundaryEdge::Last));
    }
}
