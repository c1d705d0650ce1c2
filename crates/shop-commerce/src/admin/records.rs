//! Records served by the admin list endpoints.

use crate::admin::ListRecord;
use crate::checkout::{OrderLine, OrderStatus};
use crate::ids::{InquiryId, OrderId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// An order as listed in the back office.
///
/// Status stays a string: the order service stores it free-form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub id: OrderId,
    #[serde(default, deserialize_with = "nullable")]
    pub customer_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub customer_email: String,
    #[serde(default, deserialize_with = "nullable")]
    pub customer_phone: String,
    /// `yyyy-MM-dd`, so string order is date order.
    #[serde(default, deserialize_with = "nullable")]
    pub order_date: String,
    #[serde(default, deserialize_with = "nullable")]
    pub status: String,
    #[serde(default, deserialize_with = "nullable")]
    pub notes: String,
    #[serde(default, deserialize_with = "lenient_lines")]
    pub items: Vec<OrderLine>,
}

impl OrderRecord {
    /// The status, if it is one the order service defines.
    pub fn parsed_status(&self) -> Option<OrderStatus> {
        self.status.parse().ok()
    }
}

/// Missing and `null` text fields both read as empty.
fn nullable<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Item lists come back in more than one shape; unknown shapes list as empty.
fn lenient_lines<'de, D>(deserializer: D) -> Result<Vec<OrderLine>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// A customer support inquiry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InquiryRecord {
    pub id: InquiryId,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub email: String,
    #[serde(default, deserialize_with = "nullable")]
    pub subject: String,
    #[serde(default, deserialize_with = "nullable")]
    pub message: String,
    #[serde(default, deserialize_with = "nullable")]
    pub status: String,
    /// ISO-8601 timestamp.
    #[serde(default, deserialize_with = "nullable")]
    pub created_at: String,
}

/// Sortable order columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrderSortField {
    Id,
    #[default]
    OrderDate,
    CustomerName,
    Status,
}

/// Sortable inquiry columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InquirySortField {
    Id,
    #[default]
    CreatedAt,
    Name,
    Status,
}

/// Error for an unrecognized column name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort field: {0}")]
pub struct UnknownSortField(pub String);

impl OrderSortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderSortField::Id => "id",
            OrderSortField::OrderDate => "orderDate",
            OrderSortField::CustomerName => "customerName",
            OrderSortField::Status => "status",
        }
    }
}

impl FromStr for OrderSortField {
    type Err = UnknownSortField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "id" => Ok(OrderSortField::Id),
            "orderdate" | "date" => Ok(OrderSortField::OrderDate),
            "customername" | "name" => Ok(OrderSortField::CustomerName),
            "status" => Ok(OrderSortField::Status),
            _ => Err(UnknownSortField(s.to_string())),
        }
    }
}

impl fmt::Display for OrderSortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl InquirySortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            InquirySortField::Id => "id",
            InquirySortField::CreatedAt => "createdAt",
            InquirySortField::Name => "name",
            InquirySortField::Status => "status",
        }
    }
}

impl FromStr for InquirySortField {
    type Err = UnknownSortField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "id" => Ok(InquirySortField::Id),
            "createdat" | "date" => Ok(InquirySortField::CreatedAt),
            "name" => Ok(InquirySortField::Name),
            "status" => Ok(InquirySortField::Status),
            _ => Err(UnknownSortField(s.to_string())),
        }
    }
}

impl fmt::Display for InquirySortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric ids compare numerically; anything else falls back to text.
fn compare_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        _ => a.cmp(b),
    }
}

impl ListRecord for OrderRecord {
    type SortField = OrderSortField;

    fn matches_text(&self, needle: &str) -> bool {
        self.customer_name.to_lowercase().contains(needle)
            || self.customer_email.to_lowercase().contains(needle)
            || self.id.as_str().contains(needle)
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn compare_by(&self, other: &Self, field: OrderSortField) -> Ordering {
        match field {
            OrderSortField::Id => compare_ids(self.id.as_str(), other.id.as_str()),
            OrderSortField::OrderDate => self.order_date.cmp(&other.order_date),
            OrderSortField::CustomerName => self
                .customer_name
                .to_lowercase()
                .cmp(&other.customer_name.to_lowercase()),
            OrderSortField::Status => self.status.to_lowercase().cmp(&other.status.to_lowercase()),
        }
    }
}

impl ListRecord for InquiryRecord {
    type SortField = InquirySortField;

    fn matches_text(&self, needle: &str) -> bool {
        [&self.name, &self.email, &self.subject, &self.message]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn compare_by(&self, other: &Self, field: InquirySortField) -> Ordering {
        match field {
            InquirySortField::Id => compare_ids(self.id.as_str(), other.id.as_str()),
            InquirySortField::CreatedAt => self.created_at.cmp(&other.created_at),
            InquirySortField::Name => self.name.to_lowercase().cmp(&other.name.to_lowercase()),
            InquirySortField::Status => self.status.to_lowercase().cmp(&other.status.to_lowercase()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_record_from_api() {
        let json = r#"{
            "id": 12,
            "customerName": "Sam",
            "customerEmail": "sam@example.com",
            "customerPhone": "555",
            "orderDate": "2024-02-10",
            "status": "Pending",
            "notes": null,
            "items": [{"id": 1, "quantity": 2, "product": {"id": 4}}]
        }"#;
        let record: OrderRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id.as_str(), "12");
        assert_eq!(record.parsed_status(), Some(OrderStatus::Pending));
        assert!(record.notes.is_empty());
        assert!(record.items.is_empty());
    }

    #[test]
    fn test_inquiry_record_from_api() {
        let json = r#"{
            "id": 3,
            "name": "Kim",
            "email": "kim@example.com",
            "subject": "Refund",
            "message": "Card was charged twice",
            "status": "PENDING",
            "createdAt": "2024-04-01T09:30:00"
        }"#;
        let record: InquiryRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.subject, "Refund");
        assert!(record.matches_text("charged"));
        assert!(!record.matches_text("shipping"));
    }

    #[test]
    fn test_sort_field_parse() {
        assert_eq!("order-date".parse(), Ok(OrderSortField::OrderDate));
        assert_eq!("customerName".parse(), Ok(OrderSortField::CustomerName));
        assert_eq!("created_at".parse(), Ok(InquirySortField::CreatedAt));
        assert!("total".parse::<OrderSortField>().is_err());
    }

    #[test]
    fn test_numeric_ids_compare_numerically() {
        assert_eq!(compare_ids("9", "10"), Ordering::Less);
        assert_eq!(compare_ids("b", "a"), Ordering::Greater);
    }
}
