//! Pagination over derived views.

use serde::{Deserialize, Serialize};

/// Page size used by the admin tables.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Which page of a view to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-indexed).
    pub page: usize,
    /// Items per page.
    pub per_page: usize,
}

impl PageRequest {
    /// Create a page request. Zero values are raised to 1.
    pub fn new(page: usize, per_page: usize) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }

    /// The first page with the given size.
    pub fn first(per_page: usize) -> Self {
        Self::new(1, per_page)
    }

    /// The same request with zero values raised to 1.
    ///
    /// Requests built field by field or deserialized skip [`PageRequest::new`].
    pub fn normalized(self) -> Self {
        Self::new(self.page, self.per_page)
    }

    /// Index of the first item on this page.
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

/// Pagination info.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: usize,
    /// Items per page.
    pub per_page: usize,
    /// Total number of items across all pages.
    pub total: usize,
    /// Total number of pages, never less than 1.
    pub total_pages: usize,
    /// Whether there's a next page.
    pub has_next: bool,
    /// Whether there's a previous page.
    pub has_prev: bool,
}

impl Pagination {
    /// Create pagination info.
    pub fn new(request: PageRequest, total: usize) -> Self {
        let request = request.normalized();
        let total_pages = total.div_ceil(request.per_page).max(1);

        Self {
            page: request.page,
            per_page: request.per_page,
            total,
            total_pages,
            has_next: request.page < total_pages,
            has_prev: request.page > 1,
        }
    }

    /// Get the offset of the first item on the current page.
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }

    /// Get page numbers for display (e.g., [4, 5, 6, 7, 8]).
    pub fn page_numbers(&self, max_visible: usize) -> Vec<usize> {
        if self.total_pages <= max_visible {
            return (1..=self.total_pages).collect();
        }

        let half = max_visible / 2;
        let start = self.page.saturating_sub(half).max(1);
        let end = (start + max_visible - 1).min(self.total_pages);
        let start = (end + 1).saturating_sub(max_visible).max(1);

        (start..=end).collect()
    }

    /// Check if on last page.
    pub fn is_last(&self) -> bool {
        self.page >= self.total_pages
    }

    /// Get start item number (1-indexed), 0 when the page is empty.
    pub fn start_item(&self) -> usize {
        if self.offset() >= self.total {
            0
        } else {
            self.offset() + 1
        }
    }

    /// Get end item number.
    pub fn end_item(&self) -> usize {
        self.page.saturating_mul(self.per_page).min(self.total)
    }
}

/// One page of a derived view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Pagination info.
    pub pagination: Pagination,
}

impl<T> Page<T> {
    /// Check if this page holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get number of items on this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Transform the items, keeping pagination.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

/// Slice a view into the requested page.
///
/// A page past the end yields an empty page rather than an error.
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> Page<T> {
    let request = request.normalized();
    let pagination = Pagination::new(request, items.len());
    let items = items
        .into_iter()
        .skip(request.offset())
        .take(request.per_page)
        .collect();

    Page { items, pagination }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginate_slices_requested_page() {
        let page = paginate((1..=25).collect(), PageRequest::new(2, 10));
        assert_eq!(page.items, (11..=20).collect::<Vec<_>>());
        assert_eq!(page.pagination.total_pages, 3);
        assert!(page.pagination.has_next);
        assert!(page.pagination.has_prev);
    }

    #[test]
    fn test_paginate_last_partial_page() {
        let page = paginate((1..=25).collect(), PageRequest::new(3, 10));
        assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
        assert!(page.pagination.is_last());
        assert_eq!(page.pagination.end_item(), 25);
    }

    #[test]
    fn test_paginate_beyond_last_page_is_empty() {
        let page = paginate(vec![1, 2, 3], PageRequest::new(9, 2));
        assert!(page.is_empty());
        assert_eq!(page.pagination.total_pages, 2);
        assert_eq!(page.pagination.start_item(), 0);
    }

    #[test]
    fn test_empty_view_has_one_page() {
        let page = paginate(Vec::<u8>::new(), PageRequest::default());
        assert!(page.is_empty());
        assert_eq!(page.pagination.total_pages, 1);
        assert!(!page.pagination.has_next);
    }

    #[test]
    fn test_page_request_floors_zero() {
        let request = PageRequest::new(0, 0);
        assert_eq!(request.page, 1);
        assert_eq!(request.per_page, 1);
        assert_eq!(request.offset(), 0);
    }

    #[test]
    fn test_deserialized_zero_request_is_floored() {
        let request: PageRequest = serde_json::from_str(r#"{"page":0,"per_page":0}"#).unwrap();
        assert_eq!(request.offset(), 0);

        let page = paginate(vec![1, 2, 3], request);
        assert_eq!(page.items, vec![1]);
        assert_eq!(page.pagination.page, 1);
        assert_eq!(page.pagination.per_page, 1);
        assert_eq!(page.pagination.total_pages, 3);
        assert!(!page.pagination.has_prev);

        let unbuilt = PageRequest { page: 0, per_page: 0 };
        let pagination = Pagination::new(unbuilt, 0);
        assert_eq!(pagination.total_pages, 1);
        assert_eq!(pagination.start_item(), 0);
    }

    #[test]
    fn test_page_numbers_window() {
        let pagination = Pagination::new(PageRequest::new(6, 10), 200);
        assert_eq!(pagination.page_numbers(5), vec![4, 5, 6, 7, 8]);

        let pagination = Pagination::new(PageRequest::new(1, 10), 200);
        assert_eq!(pagination.page_numbers(5), vec![1, 2, 3, 4, 5]);

        let pagination = Pagination::new(PageRequest::new(20, 10), 200);
        assert_eq!(pagination.page_numbers(5), vec![16, 17, 18, 19, 20]);
    }
}
