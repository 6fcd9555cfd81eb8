//! Render surface seam.
//!
//! The host owns the container element. The renderer only ever writes the
//! two spacer offsets and the content of slots it attached once at
//! construction; it never adds or removes children afterwards.

use core_model::{SlotId, Spacers};

pub trait RenderSurface<T> {
    /// Attach `count` empty child slots. Called exactly once, before any render.
    fn attach_slots(&mut self, count: usize);
    /// Write leading/trailing offsets.
    fn apply_spacers(&mut self, spacers: Spacers);
    /// Show `item` (logical index `index`) in `slot`.
    fn relabel(&mut self, slot: SlotId, index: usize, item: &T);
    /// Hide `slot`; it stays attached for reuse.
    fn vacate(&mut self, slot: SlotId);
}

/// In-memory surface. Useful for headless hosts and tests.
#[derive(Debug, Clone)]
pub struct MemorySurface<T> {
    slots: Vec<Option<(usize, T)>>,
    spacers: Spacers,
    attach_calls: usize,
    writes: usize,
}

impl<T> Default for MemorySurface<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            spacers: Spacers::ZERO,
            attach_calls: 0,
            writes: 0,
        }
    }
}

impl<T> MemorySurface<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spacers(&self) -> Spacers {
        self.spacers
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn slot(&self, slot: SlotId) -> Option<&(usize, T)> {
        self.slots.get(slot.0).and_then(Option::as_ref)
    }

    /// Logical indices of occupied slots, in slot order.
    pub fn labels(&self) -> Vec<usize> {
        self.slots.iter().flatten().map(|(i, _)| *i).collect()
    }

    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn attach_calls(&self) -> usize {
        self.attach_calls
    }

    /// Slot writes (relabels + vacates) since attach.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl<T: Clone> RenderSurface<T> for MemorySurface<T> {
    fn attach_slots(&mut self, count: usize) {
        self.attach_calls += 1;
        self.slots = (0..count).map(|_| None).collect();
    }

    fn apply_spacers(&mut self, spacers: Spacers) {
        self.spacers = spacers;
    }

    fn relabel(&mut self, slot: SlotId, index: usize, item: &T) {
        if let Some(s) = self.slots.get_mut(slot.0) {
            *s = Some((index, item.clone()));
            self.writes += 1;
        }
    }

    fn vacate(&mut self, slot: SlotId) {
        if let Some(s) = self.slots.get_mut(slot.0) {
            *s = None;
            self.writes += 1;
        }
    }
}
