//! Page windows for [`Collection::paginate`](crate::Collection::paginate).

use serde::{Deserialize, Serialize};

/// Externally computed offset/limit pair.
pub trait PageWindow {
    /// Index of the first entry on the page.
    fn offset(&self) -> isize;

    /// Maximum number of entries on the page. Zero or less means unbounded.
    fn limit(&self) -> isize;
}

/// Page-number pagination over a known number of items.
///
/// The requested page is clamped to the valid range, and a page size of zero
/// or less puts everything on a single page.
///
/// ```
/// use sheaf::{PageWindow, Pagination};
///
/// let pages = Pagination::new(5, 3).with_page(1);
/// assert_eq!(pages.page_count(), 2);
/// assert_eq!((pages.offset(), pages.limit()), (3, 3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pagination {
    /// Zero-based page requested.
    pub page: usize,
    /// Items per page.
    pub page_size: i64,
    /// Total number of items being paged.
    pub total_count: usize,
}

impl Pagination {
    /// Items per page when none is configured.
    pub const DEFAULT_PAGE_SIZE: i64 = 20;

    /// Creates a pagination on the first page.
    pub fn new(total_count: usize, page_size: i64) -> Self {
        Pagination {
            page: 0,
            page_size,
            total_count,
        }
    }

    /// Returns a copy pointing at `page`.
    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    /// Number of pages; at least one when there are items.
    pub fn page_count(&self) -> usize {
        match usize::try_from(self.page_size) {
            Ok(size) if size > 0 => self.total_count.div_ceil(size),
            _ => usize::from(self.total_count > 0),
        }
    }

    /// The requested page clamped to `0..page_count`.
    pub fn current_page(&self) -> usize {
        self.page.min(self.page_count().saturating_sub(1))
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination::new(0, Pagination::DEFAULT_PAGE_SIZE)
    }
}

impl PageWindow for Pagination {
    fn offset(&self) -> isize {
        if self.page_size < 1 {
            return 0;
        }
        let offset = (self.current_page() as u128) * (self.page_size as u128);
        isize::try_from(offset).unwrap_or(isize::MAX)
    }

    fn limit(&self) -> isize {
        if self.page_size < 1 {
            -1
        } else {
            isize::try_from(self.page_size).unwrap_or(isize::MAX)
        }
    }
}

impl<T: PageWindow + ?Sized> PageWindow for &T {
    fn offset(&self) -> isize {
        (**self).offset()
    }

    fn limit(&self) -> isize {
        (**self).limit()
    }
}
