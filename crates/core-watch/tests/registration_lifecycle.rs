use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use core_events::event_channel;
use core_model::{BoundaryPair, SlotId};
use core_watch::{BoundaryWatcher, VisibilityObserver};
use pretty_assertions::assert_eq;

#[derive(Default)]
struct Registry {
    live: BTreeSet<SlotId>,
    peak: usize,
    log: Vec<String>,
}

/// Observer sharing its registry with the test so it can be inspected after
/// the watcher is dropped.
#[derive(Clone, Default)]
struct SharedObserver(Rc<RefCell<Registry>>);

impl VisibilityObserver for SharedObserver {
    fn observe(&mut self, target: SlotId) {
        let mut r = self.0.borrow_mut();
        assert!(r.live.insert(target), "slot {target:?} observed twice");
        r.peak = r.peak.max(r.live.len());
        r.log.push(format!("+{}", target.0));
    }

    fn unobserve(&mut self, target: SlotId) {
        let mut r = self.0.borrow_mut();
        assert!(r.live.remove(&target), "slot {target:?} was not observed");
        r.log.push(format!("-{}", target.0));
    }
}

#[test]
fn long_session_never_leaks_registrations() {
    let shared = SharedObserver::default();
    let (tx, _rx) = event_channel();
    let mut watcher = BoundaryWatcher::new(shared.clone(), tx);
    for page in 0..5_000 {
        watcher.watch(BoundaryPair::for_window(page * 42, 42));
    }
    let registry = shared.0.borrow();
    assert_eq!(registry.peak, 2);
    assert_eq!(registry.live.len(), 2);
    assert_eq!(watcher.generation(), 5_000);
}

#[test]
fn release_precedes_reacquire() {
    let shared = SharedObserver::default();
    let (tx, _rx) = event_channel();
    let mut watcher = BoundaryWatcher::new(shared.clone(), tx);
    watcher.watch(BoundaryPair::for_window(0, 42));
    watcher.watch(BoundaryPair::for_window(9_996, 4));
    assert_eq!(shared.0.borrow().log, vec!["+0", "+41", "-0", "-41", "+0", "+3"]);
}

#[test]
fn dropping_watcher_releases_everything() {
    let shared = SharedObserver::default();
    {
        let (tx, _rx) = event_channel();
        let mut watcher = BoundaryWatcher::new(shared.clone(), tx);
        watcher.watch(BoundaryPair::for_window(0, 42));
        assert_eq!(shared.0.borrow().live.len(), 2);
    }
    assert!(shared.0.borrow().live.is_empty());
}
