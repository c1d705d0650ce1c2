//! Filtered, sorted, and paginated admin tables.
//!
//! The same stages as the catalog view: text, status, stable sort, page.

use crate::search::{paginate, Page, PageRequest, SortDirection};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// A row in an admin table.
pub trait ListRecord {
    /// Columns the table can sort by.
    type SortField: Copy;

    /// Check the record against an already lower-cased search string.
    fn matches_text(&self, needle: &str) -> bool;

    /// Raw status string.
    fn status(&self) -> &str;

    /// Ascending comparison on one column.
    fn compare_by(&self, other: &Self, field: Self::SortField) -> Ordering;
}

/// Status selection: everything, or one status compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(String),
}

impl StatusFilter {
    /// Parse the UI value, where `"all"` selects everything.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("all") || value.trim().is_empty() {
            StatusFilter::All
        } else {
            StatusFilter::Only(value.to_string())
        }
    }

    pub fn matches(&self, status: &str) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted.eq_ignore_ascii_case(status),
        }
    }
}

impl From<&str> for StatusFilter {
    fn from(value: &str) -> Self {
        StatusFilter::parse(value)
    }
}

/// Search, filter, sort, and page parameters for an admin table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery<F> {
    pub text: String,
    pub status: StatusFilter,
    pub sort_by: F,
    pub direction: SortDirection,
    pub page: PageRequest,
}

impl<F: Default> Default for ListQuery<F> {
    fn default() -> Self {
        Self {
            text: String::new(),
            status: StatusFilter::All,
            sort_by: F::default(),
            direction: SortDirection::Desc,
            page: PageRequest::default(),
        }
    }
}

impl<F: Default + Copy + PartialEq> ListQuery<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_status(mut self, status: impl Into<StatusFilter>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_sort(mut self, field: F, direction: SortDirection) -> Self {
        self.sort_by = field;
        self.direction = direction;
        self
    }

    pub fn with_page(mut self, page: PageRequest) -> Self {
        self.page = page;
        self
    }

    /// Column header click: flip direction on the active column, otherwise
    /// sort the new column ascending.
    pub fn toggle_sort(&mut self, field: F) {
        if self.sort_by == field {
            self.direction = self.direction.toggled();
        } else {
            self.sort_by = field;
            self.direction = SortDirection::Asc;
        }
    }
}

/// Derive the ordered rows for `query`, before pagination.
pub fn list_view<'a, R: ListRecord>(records: &'a [R], query: &ListQuery<R::SortField>) -> Vec<&'a R> {
    let needle = query.text.trim().to_lowercase();

    let mut rows: Vec<&R> = records
        .iter()
        .filter(|record| needle.is_empty() || record.matches_text(&needle))
        .filter(|record| query.status.matches(record.status()))
        .collect();

    rows.sort_by(|a, b| query.direction.apply(a.compare_by(b, query.sort_by)));
    rows
}

/// Derive one page of rows for `query`.
pub fn list_page<'a, R: ListRecord>(records: &'a [R], query: &ListQuery<R::SortField>) -> Page<&'a R> {
    paginate(list_view(records, query), query.page)
}

/// Records per lower-cased status.
pub fn status_counts<R: ListRecord>(records: &[R]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.status().to_lowercase()).or_insert(0) += 1;
    }
    counts
}
