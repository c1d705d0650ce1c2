//! Product catalog module.
//!
//! Holds the fetched item collection and derives filtered, sorted, and
//! paginated views of it.

mod item;
mod source;
mod view;

pub use item::Item;
pub use source::CatalogSource;
pub use view::{categories, view};

use crate::search::{paginate, Page, PageRequest, Query};
use serde::{Deserialize, Serialize};

/// A fetched item collection plus its category choices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    items: Vec<Item>,
    categories: Vec<String>,
    load_error: Option<String>,
}

impl Catalog {
    /// Build a catalog from an item collection.
    pub fn new(items: Vec<Item>) -> Self {
        let categories = categories(&items);
        Self {
            items,
            categories,
            load_error: None,
        }
    }

    /// Fetch the catalog from `source`.
    ///
    /// A failed fetch yields an empty catalog that remembers the failure.
    pub async fn load(source: &dyn CatalogSource) -> Self {
        match source.fetch_items().await {
            Ok(items) => {
                tracing::info!(items = items.len(), "catalog loaded");
                Self::new(items)
            }
            Err(e) => {
                tracing::warn!(error = %e, "catalog fetch failed, showing empty catalog");
                Self {
                    load_error: Some(e.to_string()),
                    ..Self::default()
                }
            }
        }
    }

    /// Replace the item collection and recompute categories.
    pub fn replace(&mut self, items: Vec<Item>) {
        *self = Self::new(items);
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Distinct categories, in first-seen order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Message from a failed load, if any.
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Look up an item by id.
    pub fn get(&self, id: &crate::ids::ItemId) -> Option<&Item> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Derive the ordered view for `query`.
    pub fn view(&self, query: &Query) -> Vec<&Item> {
        view(&self.items, query)
    }

    /// Derive one page of the view for `query`.
    pub fn page(&self, query: &Query, request: PageRequest) -> Page<&Item> {
        paginate(self.view(query), request)
    }
}
