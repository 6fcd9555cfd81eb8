//! Visibility observer seam.
//!
//! Wraps whatever visibility primitive the host has (intersection
//! detection, scroll geometry, a test script). The watcher only registers
//! and unregisters slots; notifications come back to it as batches of
//! `VisibilityChange` that the host delivers on the owning thread.

use std::collections::BTreeSet;

use core_model::SlotId;

/// One visibility transition reported by the host primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityChange {
    pub target: SlotId,
    pub is_intersecting: bool,
}

impl VisibilityChange {
    pub fn entered(target: SlotId) -> Self {
        Self {
            target,
            is_intersecting: true,
        }
    }

    pub fn left(target: SlotId) -> Self {
        Self {
            target,
            is_intersecting: false,
        }
    }
}

pub trait VisibilityObserver {
    fn observe(&mut self, target: SlotId);
    fn unobserve(&mut self, target: SlotId);
}

impl<T: VisibilityObserver + ?Sized> VisibilityObserver for &mut T {
    fn observe(&mut self, target: SlotId) {
        (**self).observe(target)
    }
    fn unobserve(&mut self, target: SlotId) {
        (**self).unobserve(target)
    }
}

impl<T: VisibilityObserver + ?Sized> VisibilityObserver for Box<T> {
    fn observe(&mut self, target: SlotId) {
        (**self).observe(target)
    }
    fn unobserve(&mut self, target: SlotId) {
        (**self).unobserve(target)
    }
}

/// Observer that only records which slots are registered. Hosts that route
/// notifications themselves use it to ask what should be reported.
#[derive(Debug, Default, Clone)]
pub struct ObservedSet {
    observed: BTreeSet<SlotId>,
    observe_calls: usize,
    unobserve_calls: usize,
}

impl ObservedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_observed(&self, target: SlotId) -> bool {
        self.observed.contains(&target)
    }

    pub fn observed(&self) -> impl Iterator<Item = SlotId> + '_ {
        self.observed.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.observed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observed.is_empty()
    }

    pub fn observe_calls(&self) -> usize {
        self.observe_calls
    }

    pub fn unobserve_calls(&self) -> usize {
        self.unobserve_calls
    }
}

impl VisibilityObserver for ObservedSet {
    fn observe(&mut self, target: SlotId) {
        self.observe_calls += 1;
        self.observed.insert(target);
    }

    fn unobserve(&mut self, target: SlotId) {
        self.unobserve_calls += 1;
        self.observed.remove(&target);
    }
}
