//! Catalog fetch over HTTP.

use crate::ApiClient;
use async_trait::async_trait;
use shop_commerce::catalog::{CatalogSource, Item};
use shop_commerce::CommerceError;

/// Product listing endpoint.
pub const PRODUCTS_PATH: &str = "/api/products";

/// [`CatalogSource`] backed by `GET /api/products`.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: ApiClient,
}

impl HttpCatalog {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    async fn fetch_items(&self) -> Result<Vec<Item>, CommerceError> {
        let items: Vec<Item> = self.client.get_json(PRODUCTS_PATH).await?;
        tracing::debug!(items = items.len(), "fetched catalog");
        Ok(items)
    }
}
