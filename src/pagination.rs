//! Client-side pagination over an in-memory list.
//!
//! Pages are 1-based. With `n` items and page size `s`:
//!
//! ```text
//! total_pages   = ceil(n / s)
//! current_items = items[(page - 1) * s .. min(page * s, n)]
//! ```
//!
//! `page_index` always satisfies `1 <= page_index <= max(total_pages, 1)`.
//! [`Paginator::go_to`] rejects out-of-range pages without touching state.

/// A list plus a page cursor into it.
#[derive(Debug, Clone, PartialEq)]
pub struct Paginator<T> {
    items: Vec<T>,
    page_size: usize,
    page_index: usize,
}

impl<T> Paginator<T> {
    /// Start on page 1. A `page_size` of 0 is treated as 1.
    pub fn new(items: Vec<T>, page_size: usize) -> Self {
        Self {
            items,
            page_size: page_size.max(1),
            page_index: 1,
        }
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_items(&self) -> usize {
        self.items.len()
    }

    pub fn total_pages(&self) -> usize {
        self.items.len().div_ceil(self.page_size)
    }

    /// Items on the current page.
    pub fn current_items(&self) -> &[T] {
        let start = (self.page_index - 1) * self.page_size;
        let end = (start + self.page_size).min(self.items.len());
        self.items.get(start..end).unwrap_or(&[])
    }

    /// Move to `page`. Returns `false` and leaves the cursor alone when
    /// `page` is outside `1..=total_pages`.
    pub fn go_to(&mut self, page: usize) -> bool {
        if page < 1 || page > self.total_pages() {
            return false;
        }
        self.page_index = page;
        true
    }

    /// Whether the "previous" control is enabled.
    pub fn has_previous(&self) -> bool {
        self.page_index > 1
    }

    /// Whether the "next" control is enabled.
    pub fn has_next(&self) -> bool {
        self.page_index < self.total_pages()
    }
}
