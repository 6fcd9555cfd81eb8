//! Logical store: the full, immutable item sequence answered by page.
//!
//! A page is the half-open range `[page * page_size, (page + 1) * page_size)`
//! clamped to the list length. Slicing never goes out of range; a page past
//! the end is simply empty.
//!
//! `max_page_index` is `floor(len / page_size)` for any length that is not an
//! exact multiple of the page size. For an exact multiple the trailing page
//! would be empty, so it is not addressable and the max is one lower. Every
//! addressable page of a non-empty list therefore has at least one item,
//! which keeps a boundary slot available to scroll back from.

use std::ops::Range;
use tracing::debug;

mod source;
pub use source::{Generated, ItemSource, Placeholder, PlaceholderItem};

#[derive(Debug, Clone)]
pub struct LogicalStore<S> {
    source: S,
    page_size: usize,
}

impl<S: ItemSource> LogicalStore<S> {
    /// `page_size` of zero is treated as one.
    pub fn new(source: S, page_size: usize) -> Self {
        debug_assert!(page_size > 0, "page size must be positive");
        let page_size = page_size.max(1);
        debug!(target: "store", len = source.len(), page_size, "store_created");
        Self { source, page_size }
    }

    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.len() == 0
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn max_page_index(&self) -> usize {
        let len = self.len();
        if len == 0 {
            return 0;
        }
        (len - 1) / self.page_size
    }

    /// Logical indices covered by `page`, clamped to the list.
    pub fn page_range(&self, page: usize) -> Range<usize> {
        let len = self.len();
        let start = page.saturating_mul(self.page_size).min(len);
        let end = start.saturating_add(self.page_size).min(len);
        start..end
    }

    /// Items of `page` in order. Fewer than `page_size` at the tail.
    pub fn slice(&self, page: usize) -> Vec<S::Item> {
        self.page_range(page)
            .filter_map(|i| self.source.item(i))
            .collect()
    }

    pub fn item(&self, index: usize) -> Option<S::Item> {
        self.source.item(index)
    }
}
