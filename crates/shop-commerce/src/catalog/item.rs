//! Catalog item type.

use crate::ids::ItemId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A catalog entry as returned by the remote catalog.
///
/// Items are immutable once fetched; the cart keeps its own snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique, stable identifier.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Long description, searched alongside the name.
    #[serde(default)]
    pub description: String,
    /// Unit price.
    pub price: Money,
    /// Units available for purchase. Zero means out of stock.
    #[serde(default)]
    pub stock: u32,
    /// Category label used by the category filter.
    #[serde(default)]
    pub category: String,
    /// Image reference, if the catalog has one.
    #[serde(default, alias = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
}

impl Item {
    /// Create an item with no description or image.
    pub fn new(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        price: Money,
        stock: u32,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price,
            stock,
            category: category.into(),
            image_ref: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the image reference.
    pub fn with_image(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = Some(image_ref.into());
        self
    }

    /// Check if at least one unit can be bought.
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_deserializes_api_shape() {
        let json = r#"{
            "id": 3,
            "name": "RTX 4070",
            "description": "Graphics card",
            "price": 599.99,
            "stock": 4,
            "category": "GPU",
            "imageUrl": "https://img.example/4070.png"
        }"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.id.as_str(), "3");
        assert_eq!(item.price.cents(), 59999);
        assert_eq!(item.image_ref.as_deref(), Some("https://img.example/4070.png"));
        assert!(item.in_stock());
    }

    #[test]
    fn test_item_missing_optional_fields() {
        let item: Item = serde_json::from_str(r#"{"id":"a","name":"A","price":10}"#).unwrap();
        assert_eq!(item.stock, 0);
        assert!(item.description.is_empty());
        assert!(item.category.is_empty());
        assert!(!item.in_stock());
    }
}
