//! Admin list endpoints collaborator.

use crate::admin::{InquiryRecord, OrderRecord};
use crate::error::CommerceError;
use async_trait::async_trait;

/// Supplies the back-office tables.
#[async_trait]
pub trait AdminSource: Send + Sync {
    async fn fetch_orders(&self) -> Result<Vec<OrderRecord>, CommerceError>;

    async fn fetch_inquiries(&self) -> Result<Vec<InquiryRecord>, CommerceError>;
}
