//! Window renderer metrics.
//!
//! Relaxed atomic counters read through `snapshot`. `last_render_ns` is a
//! point sample of the most recent completed render.

use std::sync::atomic::{AtomicU64, Ordering::Relaxed};

use core_model::RenderDirection;

#[derive(Debug, Default)]
pub struct WindowMetrics {
    renders: AtomicU64,
    initial: AtomicU64,
    advances: AtomicU64,
    retreats: AtomicU64,
    rejected: AtomicU64,
    slot_relabels: AtomicU64,
    slot_vacates: AtomicU64,
    last_render_ns: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowMetricsSnapshot {
    pub renders: u64,
    pub initial: u64,
    pub advances: u64,
    pub retreats: u64,
    pub rejected: u64,
    pub slot_relabels: u64,
    pub slot_vacates: u64,
    pub last_render_ns: u64,
}

impl WindowMetrics {
    pub fn snapshot(&self) -> WindowMetricsSnapshot {
        WindowMetricsSnapshot {
            renders: self.renders.load(Relaxed),
            initial: self.initial.load(Relaxed),
            advances: self.advances.load(Relaxed),
            retreats: self.retreats.load(Relaxed),
            rejected: self.rejected.load(Relaxed),
            slot_relabels: self.slot_relabels.load(Relaxed),
            slot_vacates: self.slot_vacates.load(Relaxed),
            last_render_ns: self.last_render_ns.load(Relaxed),
        }
    }

    pub(crate) fn record_render(
        &self,
        direction: RenderDirection,
        relabels: u64,
        vacates: u64,
        ns: u64,
    ) {
        self.renders.fetch_add(1, Relaxed);
        let per_direction = match direction {
            RenderDirection::Initial => &self.initial,
            RenderDirection::Advance => &self.advances,
            RenderDirection::Retreat => &self.retreats,
        };
        per_direction.fetch_add(1, Relaxed);
        self.slot_relabels.fetch_add(relabels, Relaxed);
        self.slot_vacates.fetch_add(vacates, Relaxed);
        self.last_render_ns.store(ns, Relaxed);
    }

    pub(crate) fn record_rejected(&self) {
        self.rejected.fetch_add(1, Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_by_direction() {
        let m = WindowMetrics::default();
        m.record_render(RenderDirection::Initial, 42, 0, 10);
        m.record_render(RenderDirection::Advance, 42, 0, 20);
        m.record_render(RenderDirection::Advance, 4, 38, 30);
        m.record_rejected();
        let s = m.snapshot();
        assert_eq!(s.renders, 3);
        assert_eq!(s.initial, 1);
        assert_eq!(s.advances, 2);
        assert_eq!(s.retreats, 0);
        assert_eq!(s.rejected, 1);
        assert_eq!(s.slot_relabels, 88);
        assert_eq!(s.slot_vacates, 38);
        assert_eq!(s.last_render_ns, 30);
    }
}
