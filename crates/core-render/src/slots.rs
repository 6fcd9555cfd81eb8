//! Fixed slot arena for the materialized window.
//!
//! Sized to `page_size` once. Page transitions relabel slots in place; the
//! arena is never grown, shrunk or reallocated, so at most `page_size`
//! elements are ever attached.

use core_model::{BoundaryPair, SlotId};

#[derive(Debug, Clone)]
pub struct SlotArena {
    labels: Vec<Option<usize>>,
    occupied: usize,
}

impl SlotArena {
    pub fn new(capacity: usize) -> Self {
        Self {
            labels: vec![None; capacity],
            occupied: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.labels.len()
    }

    /// Number of slots currently showing an item.
    pub fn occupied(&self) -> usize {
        self.occupied
    }

    pub fn label(&self, slot: SlotId) -> Option<usize> {
        self.labels.get(slot.0).copied().flatten()
    }

    /// Occupy `slot` with logical `index`. Returns `false` if the slot is
    /// outside the arena.
    pub fn relabel(&mut self, slot: SlotId, index: usize) -> bool {
        let Some(label) = self.labels.get_mut(slot.0) else {
            return false;
        };
        if label.is_none() {
            self.occupied += 1;
        }
        *label = Some(index);
        true
    }

    /// Vacate `slot`. Returns `true` if it was occupied.
    pub fn vacate(&mut self, slot: SlotId) -> bool {
        match self.labels.get_mut(slot.0) {
            Some(label @ Some(_)) => {
                *label = None;
                self.occupied -= 1;
                true
            }
            _ => false,
        }
    }

    /// Boundary pair of an arena occupied from slot 0 onward.
    pub fn boundary_pair(&self) -> Option<BoundaryPair> {
        let start = self.label(SlotId(0))?;
        BoundaryPair::for_window(start, self.occupied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relabel_in_place_keeps_capacity() {
        let mut arena = SlotArena::new(4);
        for i in 0..4 {
            assert!(arena.relabel(SlotId(i), 10 + i));
        }
        assert_eq!(arena.occupied(), 4);
        assert!(arena.relabel(SlotId(0), 99));
        assert_eq!(arena.occupied(), 4);
        assert_eq!(arena.capacity(), 4);
        assert!(!arena.relabel(SlotId(4), 0));
    }

    #[test]
    fn vacate_tracks_occupancy() {
        let mut arena = SlotArena::new(3);
        arena.relabel(SlotId(0), 0);
        assert!(arena.vacate(SlotId(0)));
        assert!(!arena.vacate(SlotId(0)));
        assert_eq!(arena.occupied(), 0);
        assert!(arena.boundary_pair().is_none());
    }

    #[test]
    fn pair_follows_occupied_prefix() {
        let mut arena = SlotArena::new(42);
        for i in 0..4 {
            arena.relabel(SlotId(i), 9_996 + i);
        }
        let pair = arena.boundary_pair().unwrap();
        assert_eq!(pair.first, SlotId(0));
        assert_eq!(pair.last, SlotId(3));
        assert_eq!(pair.last_index, 9_999);
    }
}
