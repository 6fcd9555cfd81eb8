//! Windowed list rendering: geometry, slot pool and page transitions.
//!
//! Exposed Components:
//! - `geometry`: pure sizing (`window_size`, `page_size`) plus the validated
//!   `Geometry` value every other component is built from.
//! - `surface`: the `RenderSurface` seam the host implements. The renderer
//!   writes exactly two spacer offsets and the content of at most
//!   `page_size` slots attached once at construction.
//! - `slots`: fixed arena of position-tagged slots relabeled in place.
//! - `window`: `WindowRenderer::render_page`, the core transition that
//!   re-slices the store, recomputes spacers and relabels slots.
//! - `metrics`: render counters and last-render timing.
//!
//! Invariants after every completed render:
//! - `top + bottom + materialized * item_height == len * item_height`.
//! - `materialized <= page_size`, equal except on the final page.
//! - `page_index` stays within `[0, max_page_index]`.

pub mod geometry;
pub mod metrics;
pub mod slots;
pub mod surface;
pub mod window;

pub use geometry::Geometry;
pub use surface::{MemorySurface, RenderSurface};
pub use window::{RenderOutcome, RenderedPage, WindowRenderer};
