//! Pagination state and fetched pages

use serde::Serialize;

/// Page sizes offered by the list screens
pub const PAGE_SIZE_OPTIONS: &[u32] = &[10, 25, 50, 100];

/// One fetch result: a bounded slice of records plus the server's total count
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64) -> Self {
        Self { items, total }
    }

    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }

    /// Clamp a server response so it never claims more rows than were asked for,
    /// nor a total smaller than what it returned.
    pub fn bounded(mut self, page_size: u32) -> Self {
        let limit = page_size as usize;
        if self.items.len() > limit {
            tracing::warn!(
                returned = self.items.len(),
                page_size,
                "server returned more rows than requested; truncating"
            );
            self.items.truncate(limit);
        }
        self.total = self.total.max(self.items.len() as u64);
        self
    }
}

/// Zero-indexed pagination coordinates plus the last known total
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub current: u32,
    pub page_size: u32,
    pub total: u64,
}

impl Pagination {
    pub fn new(page_size: u32) -> Self {
        Self {
            current: 0,
            page_size: page_size.max(1),
            total: 0,
        }
    }

    /// Number of pages implied by the last total (at least one)
    pub fn page_count(&self) -> u32 {
        if self.total == 0 {
            return 1;
        }
        let size = u64::from(self.page_size.max(1));
        self.total.div_ceil(size).min(u64::from(u32::MAX)) as u32
    }

    pub fn has_next(&self) -> bool {
        self.current + 1 < self.page_count()
    }

    pub fn has_prev(&self) -> bool {
        self.current > 0
    }

    /// Next larger (or smaller) entry of [`PAGE_SIZE_OPTIONS`]
    pub fn step_page_size(&self, grow: bool) -> u32 {
        if grow {
            PAGE_SIZE_OPTIONS
                .iter()
                .copied()
                .find(|&s| s > self.page_size)
                .unwrap_or(self.page_size)
        } else {
            PAGE_SIZE_OPTIONS
                .iter()
                .rev()
                .copied()
                .find(|&s| s < self.page_size)
                .unwrap_or(self.page_size)
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(25)
    }
}

/// The coordinates a list fetch is issued for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery<F> {
    pub filter: F,
    pub page: u32,
    pub page_size: u32,
}
