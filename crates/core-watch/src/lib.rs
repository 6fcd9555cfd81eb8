//! Boundary watcher.
//!
//! Watches the first and last occupied slots of the current window and turns
//! entering crossings of those slots into `BoundaryCrossed` events on the
//! controller channel. It never touches scroll state itself.
//!
//! Registration lifecycle: `watch` releases the previous registration before
//! acquiring the new one and bumps `generation`; events carry the generation
//! they were observed under so the controller can drop stale ones. Dropping
//! the watcher releases whatever is still registered, so a destroyed surface
//! leaves no observer registrations behind.
//!
//! Batch interpretation follows `BatchPolicy`:
//! - `Coalesce`: entries for unwatched slots and leaving entries are
//!   discarded and the rest deduped by slot. One edge left => emit it. Both
//!   edges entered in one batch => the viewport spans the whole window and
//!   the direction is ambiguous, so nothing is emitted.
//! - `DropMulti`: any batch with more than one entry is discarded; a single
//!   entry is handled as above.

use core_config::BatchPolicy;
use core_events::EventSender;
use core_model::{BoundaryEdge, BoundaryPair, SlotId};
use smallvec::SmallVec;
use tracing::{debug, trace};

mod observer;
pub use observer::{ObservedSet, VisibilityChange, VisibilityObserver};

/// Why a batch produced no event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchVerdict {
    Emitted(BoundaryEdge),
    /// No entering crossing of a watched slot.
    Ignored,
    /// Both edges entered together.
    Ambiguous,
    /// Rejected by `BatchPolicy::DropMulti`.
    DroppedMulti,
    /// Nothing is being watched.
    Unwatched,
    /// The controller channel did not accept the event.
    SendFailed,
}

pub struct BoundaryWatcher<O: VisibilityObserver> {
    observer: O,
    sender: EventSender,
    policy: BatchPolicy,
    current: Option<BoundaryPair>,
    generation: u64,
}

impl<O: VisibilityObserver> BoundaryWatcher<O> {
    pub fn new(observer: O, sender: EventSender) -> Self {
        Self {
            observer,
            sender,
            policy: BatchPolicy::default(),
            current: None,
            generation: 0,
        }
    }

    pub fn with_policy(mut self, policy: BatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the watched pair. `None` leaves nothing registered.
    pub fn watch(&mut self, pair: Option<BoundaryPair>) {
        self.release();
        self.generation += 1;
        if let Some(pair) = pair {
            for slot in pair.slots() {
                self.observer.observe(slot);
            }
            debug!(
                target: "watch",
                generation = self.generation,
                first = pair.first.0,
                last = pair.last.0,
                first_index = pair.first_index,
                last_index = pair.last_index,
                "watch_registered"
            );
        }
        self.current = pair;
    }

    /// Unregister the current pair, if any.
    pub fn release(&mut self) {
        if let Some(pair) = self.current.take() {
            for slot in pair.slots() {
                self.observer.unobserve(slot);
            }
            trace!(target: "watch", generation = self.generation, "watch_released");
        }
    }

    pub fn on_batch(&mut self, batch: &[VisibilityChange]) -> BatchVerdict {
        let verdict = self.classify(batch);
        if let BatchVerdict::Emitted(edge) = verdict {
            if !self.sender.boundary(edge, self.generation) {
                return BatchVerdict::SendFailed;
            }
            trace!(
                target: "watch",
                edge = edge.as_str(),
                generation = self.generation,
                "boundary_crossed"
            );
        } else {
            trace!(target: "watch", entries = batch.len(), verdict = ?verdict, "batch_skipped");
        }
        verdict
    }

    fn classify(&self, batch: &[VisibilityChange]) -> BatchVerdict {
        let Some(pair) = self.current else {
            return BatchVerdict::Unwatched;
        };
        if self.policy == BatchPolicy::DropMulti && batch.len() > 1 {
            return BatchVerdict::DroppedMulti;
        }
        let mut entered: SmallVec<[SlotId; 2]> = SmallVec::new();
        for change in batch {
            if change.is_intersecting
                && pair.edge_of(change.target).is_some()
                && !entered.contains(&change.target)
            {
                entered.push(change.target);
            }
        }
        match entered.as_slice() {
            [] => BatchVerdict::Ignored,
            [slot] => pair
                .edge_of(*slot)
                .map_or(BatchVerdict::Ignored, BatchVerdict::Emitted),
            _ => BatchVerdict::Ambiguous,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn current(&self) -> Option<BoundaryPair> {
        self.current
    }

    pub fn policy(&self) -> BatchPolicy {
        self.policy
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }
}

impl<O: VisibilityObserver> Drop for BoundaryWatcher<O> {
    fn drop(&mut self) {
        self.release();
    }
}
