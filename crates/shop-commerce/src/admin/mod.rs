//! Admin back-office module.
//!
//! Order and inquiry tables driven by the same search, filter, sort, and
//! pagination stages as the storefront catalog.

mod listing;
mod records;
mod source;

pub use listing::{list_page, list_view, status_counts, ListQuery, ListRecord, StatusFilter};
pub use records::{
    InquiryRecord, InquirySortField, OrderRecord, OrderSortField, UnknownSortField,
};
pub use source::AdminSource;
