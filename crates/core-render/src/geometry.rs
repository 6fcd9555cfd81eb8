//! Geometry calculator: viewport and item height to window and page sizes.
//!
//! `window_size = ceil(viewport / item) + 1`: enough slots to cover the
//! viewport plus one overscan slot so a boundary slot never sits exactly on
//! the viewport edge. `page_size = 2 * window_size`: after a shift a full
//! window of fresh slots remains on either side of the viewport.

use core_config::{ConfigurationError, ListConfig, validate_heights};

/// `None` when the ratio is not finite or the slot count overflows `usize`.
pub fn window_size(viewport_height: f64, item_height: f64) -> Option<usize> {
    let rows = (viewport_height / item_height).ceil();
    // `usize::MAX as f64` rounds up to 2^64, so this rejects every saturating cast.
    if !rows.is_finite() || rows < 0.0 || rows >= usize::MAX as f64 {
        return None;
    }
    (rows as usize).checked_add(1)
}

pub fn page_size(window_size: usize) -> Option<usize> {
    window_size.checked_mul(2)
}

/// Validated sizing for one list view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    item_height: f64,
    viewport_height: f64,
    window_size: usize,
    page_size: usize,
}

impl Geometry {
    pub fn new(item_height: f64, viewport_height: f64) -> Result<Self, ConfigurationError> {
        validate_heights(item_height, viewport_height)?;
        let too_large = ConfigurationError::GeometryTooLarge {
            item_height,
            viewport_height,
        };
        let window_size = window_size(viewport_height, item_height).ok_or(too_large)?;
        let page_size = page_size(window_size).ok_or(too_large)?;
        Ok(Self {
            item_height,
            viewport_height,
            window_size,
            page_size,
        })
    }

    /// Resolve `config` against the host viewport height, then size.
    pub fn from_config(
        config: &ListConfig,
        host_viewport_height: f64,
    ) -> Result<Self, ConfigurationError> {
        let (item_height, viewport_height) = config.resolve(host_viewport_height)?;
        Self::new(item_height, viewport_height)
    }

    pub fn item_height(&self) -> f64 {
        self.item_height
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Physical height of `count` items.
    pub fn height_of(&self, count: usize) -> f64 {
        self.item_height * count as f64
    }
}
