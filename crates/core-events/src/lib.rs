//! Event types and channel helpers for the scroll controller.
//!
//! Boundary notifications are delivered as explicit messages through a
//! single-consumer channel rather than invoked as callbacks into controller
//! state. The consumer (one `ScrollController` per list view) drains the
//! channel on its own thread; producers may live elsewhere because the sender
//! is `Send + Clone`.

use core_model::BoundaryEdge;
use crossbeam_channel::{Receiver, Sender, TrySendError};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{trace, warn};

// -------------------------------------------------------------------------------------------------
// Channel Policy
// -------------------------------------------------------------------------------------------------
// Bounded: a watcher emits at most two boundary events per notification batch and the consumer
// drains after every batch, so the queue never approaches the cap during normal scrolling. A full
// queue means the consumer stopped pumping; the event is dropped and counted instead of blocking
// the producer (the next real crossing is re-reported by the host primitive anyway).
// -------------------------------------------------------------------------------------------------
pub const EVENT_CHANNEL_CAP: usize = 1024;

pub static CHANNEL_SEND_FAILURES: AtomicU64 = AtomicU64::new(0); // closed channel
pub static CHANNEL_FULL_DROPS: AtomicU64 = AtomicU64::new(0);
pub static BOUNDARY_EVENTS_SENT: AtomicU64 = AtomicU64::new(0);

/// A watched boundary slot entered the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryCrossed {
    pub edge: BoundaryEdge,
    /// Watch registration the crossing was observed under. Crossings from a
    /// superseded registration are stale and must be ignored.
    pub generation: u64,
}

impl BoundaryCrossed {
    pub fn new(edge: BoundaryEdge, generation: u64) -> Self {
        Self { edge, generation }
    }
}

/// Top-level message consumed by the scroll controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Boundary(BoundaryCrossed),
    /// The render surface is going away; release registrations and stop.
    Shutdown,
}

/// Producer half of the controller channel with telemetry on failure paths.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: Sender<Event>,
}

impl EventSender {
    /// Non-blocking send. Returns `false` when the event was not queued.
    pub fn send(&self, event: Event) -> bool {
        let is_boundary = matches!(event, Event::Boundary(_));
        match self.tx.try_send(event) {
            Ok(()) => {
                if is_boundary {
                    BOUNDARY_EVENTS_SENT.fetch_add(1, Ordering::Relaxed);
                }
                trace!(target: "events", queued = self.tx.len(), "event_queued");
                true
            }
            Err(TrySendError::Full(ev)) => {
                CHANNEL_FULL_DROPS.fetch_add(1, Ordering::Relaxed);
                warn!(target: "events", event = ?ev, "channel_full_drop");
                false
            }
            Err(TrySendError::Disconnected(_)) => {
                CHANNEL_SEND_FAILURES.fetch_add(1, Ordering::Relaxed);
                trace!(target: "events", "channel_closed");
                false
            }
        }
    }

    pub fn boundary(&self, edge: BoundaryEdge, generation: u64) -> bool {
        self.send(Event::Boundary(BoundaryCrossed::new(edge, generation)))
    }
}

/// Create the bounded controller channel.
pub fn event_channel() -> (EventSender, Receiver<Event>) {
    event_channel_with_capacity(EVENT_CHANNEL_CAP)
}

pub fn event_channel_with_capacity(cap: usize) -> (EventSender, Receiver<Event>) {
    let (tx, rx) = crossbeam_channel::bounded(cap);
    (EventSender { tx }, rx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_events_arrive_in_order() {
        let (tx, rx) = event_channel();
        assert!(tx.boundary(BoundaryEdge::Last, 1));
        assert!(tx.boundary(BoundaryEdge::First, 2));
        assert_eq!(
            rx.try_recv().unwrap(),
            Event::Boundary(BoundaryCrossed::new(BoundaryEdge::Last, 1))
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            Event::Boundary(BoundaryCrossed::new(BoundaryEdge::First, 2))
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn full_channel_drops_without_blocking() {
        let (tx, rx) = event_channel_with_capacity(1);
        let before = CHANNEL_FULL_DROPS.load(Ordering::Relaxed);
        assert!(tx.boundary(BoundaryEdge::Last, 1));
        assert!(!tx.boundary(BoundaryEdge::Last, 1));
        assert!(CHANNEL_FULL_DROPS.load(Ordering::Relaxed) > before);
        assert_eq!(rx.len(), 1);
    }

    #[test]
    fn send_after_consumer_dropped_reports_failure() {
        let (tx, rx) = event_channel();
        drop(rx);
        let before = CHANNEL_SEND_FAILURES.load(Ordering::Relaxed);
        assert!(!tx.send(Event::Shutdown));
        assert!(CHANNEL_SEND_FAILURES.load(Ordering::Relaxed) > before);
    }

    #[test]
    fn sender_crosses_threads() {
        let (tx, rx) = event_channel();
        std::thread::spawn(move || {
            tx.boundary(BoundaryEdge::First, 7);
        })
        .join()
        .unwrap();
        assert_eq!(
            rx.recv().unwrap(),
            Event::Boundary(BoundaryCrossed::new(BoundaryEdge::First, 7))
        );
    }
}
