use std::fmt;

/// Read-only indexed access to the logical list.
pub trait ItemSource {
    type Item: Clone;

    fn len(&self) -> usize;

    /// `None` only for `index >= len()`.
    fn item(&self, index: usize) -> Option<Self::Item>;
}

impl<T: Clone> ItemSource for Vec<T> {
    type Item = T;

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn item(&self, index: usize) -> Option<T> {
        self.get(index).cloned()
    }
}

impl<T: Clone> ItemSource for &[T] {
    type Item = T;

    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn item(&self, index: usize) -> Option<T> {
        self.get(index).cloned()
    }
}

/// Items produced on demand from their index.
pub struct Generated<F> {
    len: usize,
    make: F,
}

impl<F> Generated<F> {
    pub fn new(len: usize, make: F) -> Self {
        Self { len, make }
    }
}

impl<F> fmt::Debug for Generated<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generated").field("len", &self.len).finish()
    }
}

impl<T: Clone, F: Fn(usize) -> T> ItemSource for Generated<F> {
    type Item = T;

    fn len(&self) -> usize {
        self.len
    }

    fn item(&self, index: usize) -> Option<T> {
        (index < self.len).then(|| (self.make)(index))
    }
}

/// Blank item whose only content is its logical index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderItem {
    pub index: usize,
}

impl fmt::Display for PlaceholderItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index)
    }
}

/// A list of `len` placeholder items.
#[derive(Debug, Clone, Copy)]
pub struct Placeholder {
    len: usize,
}

impl Placeholder {
    pub fn new(len: usize) -> Self {
        Self { len }
    }
}

impl ItemSource for Placeholder {
    type Item = PlaceholderItem;

    fn len(&self) -> usize {
        self.len
    }

    fn item(&self, index: usize) -> Option<PlaceholderItem> {
        (index < self.len).then_some(PlaceholderItem { index })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_items_come_from_index() {
        let src = Generated::new(3, |i| format!("row {i}"));
        assert_eq!(src.item(2).as_deref(), Some("row 2"));
        assert_eq!(src.item(3), None);
    }

    #[test]
    fn placeholder_displays_index() {
        let src = Placeholder::new(10_000);
        assert_eq!(src.item(41).unwrap().to_string(), "41");
        assert!(src.item(10_000).is_none());
    }
}
