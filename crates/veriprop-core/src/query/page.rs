//! Page envelope returned by every list endpoint.

use serde::{Deserialize, Serialize};

/// Which slice of the sorted collection to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Zero-indexed page number.
    pub page: usize,
    /// Items per page (at least 1).
    pub page_size: usize,
}

impl PageWindow {
    pub fn new(page: usize, page_size: usize) -> Self {
        Self {
            page,
            page_size: page_size.max(1),
        }
    }

    /// Offset of the first item on this page.
    pub fn start(&self) -> usize {
        self.page.saturating_mul(self.page_size)
    }
}

/// Paginated response.
///
/// Invariants:
/// - `count == items.len() == min(page_size, total.saturating_sub(page * page_size))`
/// - `total_pages == ceil(total / page_size)`
/// - `prev_page` is present iff `page > 0`
/// - `next_page` is present iff `page * page_size + page_size < total`
///
/// Absent `prev_page` / `next_page` are omitted from the JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
    pub count: usize,
    pub total_pages: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev_page: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page: Option<usize>,
}

impl<T: Clone> Page<T> {
    /// Cut `window` out of an already filtered and sorted collection.
    ///
    /// Only the returned slice is cloned. An out-of-range page yields no items.
    pub fn from_sorted(sorted: &[&T], window: PageWindow) -> Self {
        let total = sorted.len();
        let start = window.start();
        let items: Vec<T> = sorted
            .iter()
            .skip(start)
            .take(window.page_size)
            .map(|item| (*item).clone())
            .collect();

        Self {
            count: items.len(),
            items,
            page: window.page,
            page_size: window.page_size,
            total,
            total_pages: total.div_ceil(window.page_size),
            prev_page: window.page.checked_sub(1),
            next_page: (start.saturating_add(window.page_size) < total)
                .then(|| window.page.saturating_add(1)),
        }
    }
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
