//! Catalog query parameters.

use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Upper bound of the price slider when nothing else is configured.
pub const DEFAULT_MAX_PRICE: Money = Money::from_units(1000);

/// Sort keys for catalog views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Sort by name A-Z.
    #[default]
    Name,
    /// Sort by price, low to high.
    PriceAsc,
    /// Sort by price, high to low.
    PriceDesc,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortKey::Name => "Name: A-Z",
            SortKey::PriceAsc => "Price: Low to High",
            SortKey::PriceDesc => "Price: High to Low",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognized sort key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort key: {0}")]
pub struct UnknownSortKey(pub String);

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "price-asc" | "price-low" => Ok(SortKey::PriceAsc),
            "price-desc" | "price-high" => Ok(SortKey::PriceDesc),
            _ => Err(UnknownSortKey(s.to_string())),
        }
    }
}

/// Direction for sortable list columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// Flip the direction, as clicking the active column header does.
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Apply this direction to an ascending ordering.
    pub fn apply(self, ordering: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Category selection: everything, or one exact category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Parse the UI value, where `"all"` selects everything.
    pub fn parse(value: &str) -> Self {
        if value == "all" {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value.to_string())
        }
    }

    /// Check whether a category passes this filter.
    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        CategoryFilter::parse(value)
    }
}

/// Combined search, filter, and sort parameters for a catalog view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// Free text matched against name and description.
    pub text: String,
    /// Category selection.
    pub category: CategoryFilter,
    /// Inclusive lower price bound.
    pub min_price: Money,
    /// Inclusive upper price bound.
    pub max_price: Money,
    /// Sort order.
    pub sort: SortKey,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            text: String::new(),
            category: CategoryFilter::All,
            min_price: Money::ZERO,
            max_price: DEFAULT_MAX_PRICE,
            sort: SortKey::Name,
        }
    }
}

impl Query {
    /// Create a query that keeps everything up to the default price ceiling.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the category filter.
    pub fn with_category(mut self, category: impl Into<CategoryFilter>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the inclusive price range.
    pub fn with_price_range(mut self, min: Money, max: Money) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    /// Set the sort key.
    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_builder() {
        let query = Query::new()
            .with_text("ssd")
            .with_category("Storage")
            .with_price_range(Money::from_units(10), Money::from_units(200))
            .with_sort(SortKey::PriceDesc);

        assert_eq!(query.text, "ssd");
        assert_eq!(query.category, CategoryFilter::Only("Storage".to_string()));
        assert_eq!(query.max_price, Money::from_units(200));
        assert_eq!(query.sort, SortKey::PriceDesc);
    }

    #[test]
    fn test_query_default() {
        let query = Query::default();
        assert!(query.text.is_empty());
        assert_eq!(query.category, CategoryFilter::All);
        assert_eq!(query.min_price, Money::ZERO);
        assert_eq!(query.max_price.cents(), 100_000);
        assert_eq!(query.sort, SortKey::Name);
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!("price-asc".parse(), Ok(SortKey::PriceAsc));
        assert_eq!("price-high".parse(), Ok(SortKey::PriceDesc));
        assert_eq!("NAME".parse(), Ok(SortKey::Name));
        assert!("rating".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_category_filter_all() {
        assert_eq!(CategoryFilter::parse("all"), CategoryFilter::All);
        assert!(CategoryFilter::All.matches("anything"));
        assert!(!CategoryFilter::parse("CPU").matches("cpu"));
    }
}
