//! Order submission collaborator.

use crate::checkout::{OrderDraft, OrderResult};
use crate::error::CommerceError;
use async_trait::async_trait;

/// Hands an order to the order service.
///
/// Implementations report any non-success outcome as an error; the
/// checkout flow does not look at status codes.
#[async_trait]
pub trait OrderSubmitter: Send + Sync {
    async fn submit(&self, draft: &OrderDraft) -> Result<OrderResult, CommerceError>;
}
