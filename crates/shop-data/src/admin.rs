//! Admin list endpoints over HTTP.

use crate::ApiClient;
use async_trait::async_trait;
use shop_commerce::admin::{AdminSource, InquiryRecord, OrderRecord};
use shop_commerce::CommerceError;

/// Order listing endpoint; requires the bearer token.
pub const ORDERS_PATH: &str = "/api/orders";
/// Inquiry listing endpoint; requires the bearer token.
pub const INQUIRIES_PATH: &str = "/api/admin/inquiries";

/// [`AdminSource`] backed by the back-office endpoints.
#[derive(Debug, Clone)]
pub struct HttpAdmin {
    client: ApiClient,
}

impl HttpAdmin {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AdminSource for HttpAdmin {
    async fn fetch_orders(&self) -> Result<Vec<OrderRecord>, CommerceError> {
        if !self.client.has_auth_token() {
            tracing::warn!("fetching orders without an auth token");
        }
        Ok(self.client.get_json_authorized(ORDERS_PATH).await?)
    }

    async fn fetch_inquiries(&self) -> Result<Vec<InquiryRecord>, CommerceError> {
        if !self.client.has_auth_token() {
            tracing::warn!("fetching inquiries without an auth token");
        }
        Ok(self.client.get_json_authorized(INQUIRIES_PATH).await?)
    }
}
