//! Scroll controller: the top-level session for one windowed list view.
//!
//! State machine over the page index:
//! * `AtStart` (page 0), `Middle`, `AtEnd` (page == max). A list with a
//!   single page reports `AtStart`; both transitions are blocked there.
//! * First edge visible: unless `AtStart`, retreat one page.
//! * Last edge visible: unless `AtEnd`, advance one page.
//!
//! Every transition renders the page and re-registers the new boundary pair
//! before returning, so the next notification always sees a consistent
//! window. Boundary events arrive through the controller's channel; events
//! observed under a superseded watch generation are dropped, which keeps a
//! double-fired crossing from advancing twice.
//!
//! One controller per list view. All mutation happens on the thread that
//! owns it; other threads can only hand it events through `sender()`.

use core_config::{BatchPolicy, ConfigurationError, ListConfig};
use core_events::{BoundaryCrossed, Event, EventSender, event_channel};
use core_model::{BoundaryEdge, BoundaryPair, RenderDirection, Spacers};
use core_render::{Geometry, RenderOutcome, RenderSurface, WindowRenderer};
use core_store::ItemSource;
use core_watch::{BatchVerdict, BoundaryWatcher, VisibilityChange, VisibilityObserver};
use crossbeam_channel::Receiver;
use tracing::{debug, info, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollState {
    AtStart,
    Middle,
    AtEnd,
}

impl ScrollState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScrollState::AtStart => "at_start",
            ScrollState::Middle => "middle",
            ScrollState::AtEnd => "at_end",
        }
    }
}

/// Result of handling one boundary notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Advanced { from: usize, to: usize },
    Retreated { from: usize, to: usize },
    /// Already at the boundary in that direction.
    Blocked(ScrollState),
    /// Observed under a superseded registration.
    Stale { generation: u64, current: u64 },
    /// The controller has been shut down.
    Closed,
}

impl Transition {
    pub fn moved(&self) -> bool {
        matches!(
            self,
            Transition::Advanced { .. } | Transition::Retreated { .. }
        )
    }
}

pub struct ScrollController<S, R, O>
where
    S: ItemSource,
    O: VisibilityObserver,
{
    renderer: WindowRenderer<S, R>,
    watcher: BoundaryWatcher<O>,
    sender: EventSender,
    events: Receiver<Event>,
    closed: bool,
}

impl<S, R, O> ScrollController<S, R, O>
where
    S: ItemSource,
    R: RenderSurface<S::Item>,
    O: VisibilityObserver,
{
    /// Build the session and perform the initial render of page 0.
    pub fn new(geometry: Geometry, source: S, surface: R, observer: O) -> Self {
        Self::with_policy(geometry, source, surface, observer, BatchPolicy::default())
    }

    pub fn with_policy(
        geometry: Geometry,
        source: S,
        surface: R,
        observer: O,
        policy: BatchPolicy,
    ) -> Self {
        let (sender, events) = event_channel();
        let renderer = WindowRenderer::new(geometry, source, surface);
        let watcher = BoundaryWatcher::new(observer, sender.clone()).with_policy(policy);
        let mut controller = Self {
            renderer,
            watcher,
            sender,
            events,
            closed: false,
        };
        controller.render(0, RenderDirection::Initial);
        info!(
            target: "scroll",
            len = controller.renderer.store().len(),
            page_size = geometry.page_size(),
            max_page = controller.max_page_index(),
            policy = policy.as_str(),
            "session_started"
        );
        controller
    }

    /// Validate `config` against the host viewport before anything is
    /// attached; misconfiguration prevents initialization.
    pub fn from_config(
        config: &ListConfig,
        host_viewport_height: f64,
        source: S,
        surface: R,
        observer: O,
        policy: BatchPolicy,
    ) -> Result<Self, ConfigurationError> {
        let geometry = Geometry::from_config(config, host_viewport_height)?;
        Ok(Self::with_policy(geometry, source, surface, observer, policy))
    }

    pub fn state(&self) -> ScrollState {
        let page = self.renderer.page_index();
        if page == 0 {
            ScrollState::AtStart
        } else if page >= self.renderer.max_page_index() {
            ScrollState::AtEnd
        } else {
            ScrollState::Middle
        }
    }

    pub fn on_first_visible(&mut self) -> Transition {
        if self.closed {
            return Transition::Closed;
        }
        let from = self.renderer.page_index();
        if from == 0 {
            trace!(target: "scroll", "retreat_blocked_at_start");
            return Transition::Blocked(self.state());
        }
        match self.render(from - 1, RenderDirection::Retreat) {
            Some(to) => Transition::Retreated { from, to },
            None => Transition::Blocked(self.state()),
        }
    }

    pub fn on_last_visible(&mut self) -> Transition {
        if self.closed {
            return Transition::Closed;
        }
        let from = self.renderer.page_index();
        if from >= self.renderer.max_page_index() {
            trace!(target: "scroll", "advance_blocked_at_end");
            return Transition::Blocked(self.state());
        }
        match self.render(from + 1, RenderDirection::Advance) {
            Some(to) => Transition::Advanced { from, to },
            None => Transition::Blocked(self.state()),
        }
    }

    /// Dispatch one boundary event, dropping it if its generation is stale.
    pub fn handle(&mut self, crossed: BoundaryCrossed) -> Transition {
        let current = self.watcher.generation();
        if crossed.generation != current {
            debug!(
                target: "scroll",
                edge = crossed.edge.as_str(),
                generation = crossed.generation,
                current,
                "stale_boundary_dropped"
            );
            return Transition::Stale {
                generation: crossed.generation,
                current,
            };
        }
        match crossed.edge {
            BoundaryEdge::First => self.on_first_visible(),
            BoundaryEdge::Last => self.on_last_visible(),
        }
    }

    /// Host callback: route a notification batch through the watcher and
    /// apply whatever it produced. Returns the transitions applied.
    pub fn on_visibility(&mut self, batch: &[VisibilityChange]) -> Vec<Transition> {
        if self.closed {
            return Vec::new();
        }
        if let BatchVerdict::Ambiguous = self.watcher.on_batch(batch) {
            debug!(target: "scroll", entries = batch.len(), "ambiguous_batch_ignored");
        }
        self.pump()
    }

    /// Drain queued events without blocking.
    pub fn pump(&mut self) -> Vec<Transition> {
        let mut applied = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            match event {
                Event::Boundary(crossed) => applied.push(self.handle(crossed)),
                Event::Shutdown => {
                    self.shutdown();
                    applied.push(Transition::Closed);
                }
            }
        }
        applied
    }

    /// Release the watch registration and refuse further transitions.
    pub fn shutdown(&mut self) {
        if self.closed {
            return;
        }
        self.watcher.release();
        self.closed = true;
        info!(target: "scroll", page = self.renderer.page_index(), "session_closed");
    }

    fn render(&mut self, page: usize, direction: RenderDirection) -> Option<usize> {
        match self.renderer.render_page(page, direction) {
            RenderOutcome::Rendered(rendered) => {
                self.watcher.watch(rendered.boundary);
                debug!(
                    target: "scroll",
                    page,
                    direction = direction.as_str(),
                    generation = self.watcher.generation(),
                    state = self.state().as_str(),
                    "page_transition"
                );
                Some(rendered.page)
            }
            RenderOutcome::OutOfRange { .. } => None,
        }
    }

    /// Producer handle for fake notifiers and cross-thread hosts.
    pub fn sender(&self) -> EventSender {
        self.sender.clone()
    }

    pub fn generation(&self) -> u64 {
        self.watcher.generation()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn page_index(&self) -> usize {
        self.renderer.page_index()
    }

    pub fn max_page_index(&self) -> usize {
        self.renderer.max_page_index()
    }

    pub fn spacers(&self) -> Spacers {
        self.renderer.spacers()
    }

    pub fn materialized(&self) -> usize {
        self.renderer.materialized()
    }

    /// Pair currently registered with the watcher.
    pub fn boundary(&self) -> Option<BoundaryPair> {
        self.watcher.current()
    }

    pub fn renderer(&self) -> &WindowRenderer<S, R> {
        &self.renderer
    }

    pub fn watcher(&self) -> &BoundaryWatcher<O> {
        &self.watcher
    }
}

impl<S, R, O> Drop for ScrollController<S, R, O>
where
    S: ItemSource,
    O: VisibilityObserver,
{
    fn drop(&mut self) {
        self.watcher.release();
    }
}
