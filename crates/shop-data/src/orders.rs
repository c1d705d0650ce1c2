//! Order submission over HTTP.

use crate::ApiClient;
use async_trait::async_trait;
use serde::Deserialize;
use shop_commerce::checkout::{OrderDraft, OrderResult, OrderStatus, OrderSubmitter};
use shop_commerce::ids::OrderId;
use shop_commerce::CommerceError;

/// Order creation endpoint used by the storefront's order form.
///
/// The backend's order controller also maps creation to `POST /api/orders`,
/// with a body carrying `parts`/`pcs` instead of `items`. The storefront form
/// posts the `items` shape here, which is what [`OrderDraft`] serializes to.
pub const ADD_ORDER_PATH: &str = "/api/orders/add";

/// The parts of the created order the storefront reads back.
///
/// The echoed line items use the server's own shape and are ignored; the
/// result carries the submitted draft instead.
#[derive(Debug, Deserialize)]
struct CreatedOrder {
    id: OrderId,
    #[serde(default)]
    status: Option<String>,
}

/// [`OrderSubmitter`] backed by `POST /api/orders/add`.
#[derive(Debug, Clone)]
pub struct HttpOrders {
    client: ApiClient,
}

impl HttpOrders {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OrderSubmitter for HttpOrders {
    async fn submit(&self, draft: &OrderDraft) -> Result<OrderResult, CommerceError> {
        let created: CreatedOrder = self.client.post_json(ADD_ORDER_PATH, draft).await?;
        let status = created
            .status
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or(OrderStatus::Pending);

        tracing::info!(order_id = %created.id, %status, "order created");
        Ok(OrderResult::new(created.id, status, draft.clone()))
    }
}
