//! Search module.
//!
//! Query parameters, sort orders, and pagination shared by the catalog view
//! and the admin tables.

mod query;
mod results;

pub use query::{
    CategoryFilter, Query, SortDirection, SortKey, UnknownSortKey, DEFAULT_MAX_PRICE,
};
pub use results::{paginate, Page, PageRequest, Pagination, DEFAULT_PAGE_SIZE};
