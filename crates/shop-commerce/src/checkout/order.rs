//! Order payloads and results.

use crate::cart::CartSnapshot;
use crate::checkout::BuyerDetails;
use crate::ids::{ItemId, OrderId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order status as reported by the order service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum OrderStatus {
    /// Order placed, awaiting processing.
    #[default]
    Pending,
    /// Order being prepared.
    Processing,
    /// Order shipped.
    Shipped,
    /// Order delivered.
    Delivered,
    /// Order cancelled.
    Cancelled,
    /// Order returned.
    Returned,
    /// Order closed out.
    Completed,
}

impl OrderStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [OrderStatus; 7] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
        OrderStatus::Returned,
        OrderStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Returned => "returned",
            OrderStatus::Completed => "completed",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Returned => "Returned",
            OrderStatus::Completed => "Completed",
        }
    }

    /// Check if order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Delivered
                | OrderStatus::Cancelled
                | OrderStatus::Returned
                | OrderStatus::Completed
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Error for a status string the order service never sends.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown order status: {0}")]
pub struct UnknownOrderStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| UnknownOrderStatus(s.to_string()))
    }
}

impl TryFrom<String> for OrderStatus {
    type Error = UnknownOrderStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        status.display_name().to_string()
    }
}

/// One line of an order payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderLine {
    #[serde(rename = "productId")]
    pub item_id: ItemId,
    pub quantity: u32,
}

/// Submission-ready order, built once per checkout attempt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderDraft {
    #[serde(rename = "customerName")]
    pub buyer_name: String,
    #[serde(rename = "customerEmail")]
    pub buyer_email: String,
    #[serde(rename = "customerPhone")]
    pub buyer_phone: String,
    #[serde(rename = "items")]
    pub lines: Vec<OrderLine>,
    #[serde(default)]
    pub notes: String,
    #[serde(rename = "orderDate")]
    pub created_at: NaiveDate,
    #[serde(default)]
    pub status: OrderStatus,
}

impl OrderDraft {
    /// Build a draft from a cart snapshot and the buyer's form fields.
    ///
    /// Contact fields are trimmed; quantities and ids are copied.
    pub fn new(snapshot: &CartSnapshot, buyer: &BuyerDetails, created_at: NaiveDate) -> Self {
        Self {
            buyer_name: buyer.name.trim().to_string(),
            buyer_email: buyer.email.trim().to_string(),
            buyer_phone: buyer.phone.trim().to_string(),
            lines: snapshot
                .lines
                .iter()
                .map(|line| OrderLine {
                    item_id: line.item.id.clone(),
                    quantity: line.quantity,
                })
                .collect(),
            notes: buyer.notes.trim().to_string(),
            created_at,
            status: OrderStatus::Pending,
        }
    }

    /// Total units across lines.
    pub fn unit_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |acc, line| acc.saturating_add(line.quantity))
    }
}

/// Server-confirmed order: the draft plus its assigned id and status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderResult {
    pub id: OrderId,
    #[serde(flatten)]
    pub draft: OrderDraft,
}

impl OrderResult {
    pub fn new(id: OrderId, status: OrderStatus, mut draft: OrderDraft) -> Self {
        draft.status = status;
        Self { id, draft }
    }

    pub fn status(&self) -> OrderStatus {
        self.draft.status
    }
}
