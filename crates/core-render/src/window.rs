//! Window renderer: page transitions, spacer recomputation, slot relabeling.
//!
//! Contract of `render_page(page, direction)`:
//! 1. `page > max_page_index` is a silent no-op (`RenderOutcome::OutOfRange`).
//!    Double-fired boundary notifications reach this path during normal
//!    scrolling, so it is logged at debug and counted, never surfaced.
//! 2. The page range comes from the logical store.
//! 3. Spacers are recomputed per direction (see below).
//! 4. Spacers are written to the surface.
//! 5. Slots `0..count` are relabeled in place with `start + i`; slots past
//!    `count` that were occupied are vacated. Nothing is reallocated.
//! 6. The new boundary pair is returned for re-registration.
//!
//! Spacer arithmetic. `top` is always the height above the page's first
//! element, `item_height * page * page_size`. For every full page that is the
//! same value as `item_height * ((page - 1) * page_size + count)`.
//! `bottom` is updated incrementally from the previous render:
//! * Advance: the height newly collapsed into `top` is consumed from `bottom`
//!   (floored at 0). Between full pages that is `item_height * count`.
//! * Retreat: the decrease in `top` is returned to `bottom`.
//!
//! Both deltas also account for a change in materialized count (entering or
//! leaving the short final page), which is what keeps
//! `top + bottom + count * item_height == len * item_height` after every
//! render, with `bottom == 0` on the final page.

use std::time::Instant;

use core_model::{BoundaryPair, RenderDirection, SlotId, Spacers};
use core_store::{ItemSource, LogicalStore};
use tracing::{debug, trace, warn};

use crate::geometry::Geometry;
use crate::metrics::{WindowMetrics, WindowMetricsSnapshot};
use crate::slots::SlotArena;
use crate::surface::RenderSurface;

/// Summary of a completed render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderedPage {
    pub page: usize,
    pub direction: RenderDirection,
    pub spacers: Spacers,
    pub materialized: usize,
    pub boundary: Option<BoundaryPair>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderOutcome {
    Rendered(RenderedPage),
    /// Requested page outside `[0, max]`; nothing changed.
    OutOfRange { requested: usize, max: usize },
}

impl RenderOutcome {
    pub fn rendered(&self) -> Option<&RenderedPage> {
        match self {
            RenderOutcome::Rendered(page) => Some(page),
            RenderOutcome::OutOfRange { .. } => None,
        }
    }
}

pub struct WindowRenderer<S: ItemSource, R> {
    geometry: Geometry,
    store: LogicalStore<S>,
    surface: R,
    arena: SlotArena,
    page_index: usize,
    spacers: Spacers,
    metrics: WindowMetrics,
}

impl<S, R> WindowRenderer<S, R>
where
    S: ItemSource,
    R: RenderSurface<S::Item>,
{
    /// Attach `page_size` slots to `surface`. Nothing is rendered until the
    /// first `render_page(0, Initial)`.
    pub fn new(geometry: Geometry, source: S, mut surface: R) -> Self {
        let page_size = geometry.page_size();
        surface.attach_slots(page_size);
        let store = LogicalStore::new(source, page_size);
        debug!(
            target: "render.window",
            len = store.len(),
            window_size = geometry.window_size(),
            page_size,
            max_page = store.max_page_index(),
            "renderer_created"
        );
        Self {
            geometry,
            store,
            surface,
            arena: SlotArena::new(page_size),
            page_index: 0,
            spacers: Spacers::ZERO,
            metrics: WindowMetrics::default(),
        }
    }

    pub fn render_page(&mut self, page: usize, direction: RenderDirection) -> RenderOutcome {
        let max = self.store.max_page_index();
        if page > max {
            self.metrics.record_rejected();
            debug!(
                target: "render.window",
                requested = page,
                max,
                direction = direction.as_str(),
                "render_out_of_range"
            );
            return RenderOutcome::OutOfRange {
                requested: page,
                max,
            };
        }

        let started = Instant::now();
        let range = self.store.page_range(page);
        let count = range.len();
        let previous_count = self.arena.occupied();

        self.spacers = self.next_spacers(page, direction, count, previous_count);
        self.surface.apply_spacers(self.spacers);

        let items = self.store.slice(page);
        if items.len() < count {
            warn!(
                target: "render.window",
                page,
                expected = count,
                found = items.len(),
                "items_missing"
            );
        }
        let mut relabels = 0u64;
        for (offset, item) in items.iter().enumerate() {
            let slot = SlotId(offset);
            let index = range.start + offset;
            self.arena.relabel(slot, index);
            self.surface.relabel(slot, index, item);
            relabels += 1;
        }
        let mut vacates = 0u64;
        for offset in items.len()..self.arena.capacity() {
            let slot = SlotId(offset);
            if self.arena.vacate(slot) {
                self.surface.vacate(slot);
                vacates += 1;
            }
        }

        self.page_index = page;
        let ns = started.elapsed().as_nanos() as u64;
        self.metrics.record_render(direction, relabels, vacates, ns);

        let rendered = RenderedPage {
            page,
            direction,
            spacers: self.spacers,
            materialized: self.arena.occupied(),
            boundary: self.arena.boundary_pair(),
        };
        trace!(
            target: "render.window",
            page,
            direction = direction.as_str(),
            top = rendered.spacers.top,
            bottom = rendered.spacers.bottom,
            materialized = rendered.materialized,
            relabels,
            vacates,
            ns,
            "page_rendered"
        );
        RenderOutcome::Rendered(rendered)
    }

    fn next_spacers(
        &self,
        page: usize,
        direction: RenderDirection,
        count: usize,
        previous_count: usize,
    ) -> Spacers {
        let h = self.geometry.item_height();
        let top = self.geometry.height_of(page * self.store.page_size());
        // Height that leaves (positive) or joins (negative) the rendered slots.
        let count_delta = h * (previous_count as f64 - count as f64);
        match direction {
            RenderDirection::Initial => {
                let below = self.store.len() - page * self.store.page_size() - count;
                Spacers::new(top, self.geometry.height_of(below))
            }
            RenderDirection::Advance => {
                let consumed = (top - self.spacers.top) - count_delta;
                Spacers::new(top, (self.spacers.bottom - consumed).max(0.0))
            }
            RenderDirection::Retreat => {
                let restored = (self.spacers.top - top) + count_delta;
                Spacers::new(top, (self.spacers.bottom + restored).max(0.0))
            }
        }
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn max_page_index(&self) -> usize {
        self.store.max_page_index()
    }

    pub fn spacers(&self) -> Spacers {
        self.spacers
    }

    pub fn materialized(&self) -> usize {
        self.arena.occupied()
    }

    pub fn boundary_pair(&self) -> Option<BoundaryPair> {
        self.arena.boundary_pair()
    }

    /// Logical index shown by `slot`, if occupied.
    pub fn label(&self, slot: SlotId) -> Option<usize> {
        self.arena.label(slot)
    }

    /// Scroll extent implied by the current spacers and slots.
    pub fn extent(&self) -> f64 {
        self.spacers
            .extent(self.arena.occupied(), self.geometry.item_height())
    }

    /// Height of the full logical list.
    pub fn full_height(&self) -> f64 {
        self.geometry.height_of(self.store.len())
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn store(&self) -> &LogicalStore<S> {
        &self.store
    }

    pub fn surface(&self) -> &R {
        &self.surface
    }

    pub fn metrics_snapshot(&self) -> WindowMetricsSnapshot {
        self.metrics.snapshot()
    }
}
