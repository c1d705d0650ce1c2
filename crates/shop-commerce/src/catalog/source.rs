//! Catalog fetch collaborator.

use crate::catalog::Item;
use crate::error::CommerceError;
use async_trait::async_trait;

/// Supplies the raw item collection.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch every item the storefront offers.
    async fn fetch_items(&self) -> Result<Vec<Item>, CommerceError>;
}
