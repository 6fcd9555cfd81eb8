//! Spacer state: the two non-rendering offsets surrounding the window.

/// Leading and trailing offsets (physical length units, e.g. pixels).
///
/// Together with the materialized slots they make the surface's scroll extent
/// equal to the full list height: `top + bottom + count * item_height`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Spacers {
    pub top: f64,
    pub bottom: f64,
}

impl Spacers {
    pub const ZERO: Spacers = Spacers {
        top: 0.0,
        bottom: 0.0,
    };

    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    /// Total scroll extent given the materialized slot height.
    pub fn extent(&self, materialized: usize, item_height: f64) -> f64 {
        self.top + self.bottom + materialized as f64 * item_height
    }
}
