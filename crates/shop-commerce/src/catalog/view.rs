//! Derived catalog views.
//!
//! Stages run in a fixed order: text, category, price, then a stable sort.

use crate::catalog::Item;
use crate::search::{Query, SortKey};

/// Derive the ordered view of `items` for `query`.
///
/// Pure and total: empty collections and empty results are valid.
pub fn view<'a>(items: &'a [Item], query: &Query) -> Vec<&'a Item> {
    let needle = query.text.to_lowercase();

    let mut matched: Vec<&Item> = items
        .iter()
        .filter(|item| matches_text(item, &needle))
        .filter(|item| query.category.matches(&item.category))
        .filter(|item| query.min_price <= item.price && item.price <= query.max_price)
        .collect();

    // `sort_by` is stable; ties keep their filtered order.
    match query.sort {
        SortKey::Name => matched.sort_by(|a, b| a.name.cmp(&b.name)),
        SortKey::PriceAsc => matched.sort_by(|a, b| a.price.cmp(&b.price)),
        SortKey::PriceDesc => matched.sort_by(|a, b| b.price.cmp(&a.price)),
    }

    matched
}

/// Distinct categories in first-seen order.
pub fn categories(items: &[Item]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for item in items {
        if !seen.iter().any(|c| c == &item.category) {
            seen.push(item.category.clone());
        }
    }
    seen
}

fn matches_text(item: &Item, needle: &str) -> bool {
    needle.is_empty()
        || item.name.to_lowercase().contains(needle)
        || item.description.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::search::CategoryFilter;

    fn item(id: u64, name: &str, cents: i64, category: &str) -> Item {
        Item::new(id, name, Money::from_cents(cents), 5, category)
    }

    fn names(view: &[&Item]) -> Vec<String> {
        view.iter().map(|i| i.name.clone()).collect()
    }

    fn fixture() -> Vec<Item> {
        vec![
            item(1, "Ryzen 7", 29_900, "CPU").with_description("Eight cores"),
            item(2, "Core i5", 19_900, "CPU"),
            item(3, "Samsung SSD", 8_999, "Storage").with_description("NVMe drive"),
            item(4, "Seagate HDD", 5_499, "Storage"),
            item(5, "Cable", 999, "Accessories"),
        ]
    }

    #[test]
    fn test_text_matches_name_or_description() {
        let items = fixture();
        let query = Query::new().with_text("nvme");
        assert_eq!(names(&view(&items, &query)), vec!["Samsung SSD"]);

        let query = Query::new().with_text("CORE");
        // "Core i5" by name, "Ryzen 7" by description
        assert_eq!(names(&view(&items, &query)), vec!["Core i5", "Ryzen 7"]);
    }

    #[test]
    fn test_category_exact_match() {
        let items = fixture();
        let query = Query::new().with_category("Storage");
        assert_eq!(names(&view(&items, &query)), vec!["Samsung SSD", "Seagate HDD"]);

        let query = Query::new().with_category("storage");
        assert!(view(&items, &query).is_empty());
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let items = fixture();
        let query = Query::new().with_price_range(Money::from_cents(999), Money::from_cents(8_999));
        assert_eq!(
            names(&view(&items, &query)),
            vec!["Cable", "Samsung SSD", "Seagate HDD"]
        );
    }

    #[test]
    fn test_stages_are_a_conjunction() {
        let items = fixture();
        let query = Query::new()
            .with_text("s")
            .with_category("Storage")
            .with_price_range(Money::ZERO, Money::from_cents(6_000));

        let result = view(&items, &query);
        assert_eq!(names(&result), vec!["Seagate HDD"]);
        for item in result {
            assert!(query.category.matches(&item.category));
            assert!(item.price <= query.max_price);
        }
    }

    #[test]
    fn test_price_sort_is_stable() {
        let items = vec![
            item(1, "B", 1_000, "x"),
            item(2, "A", 500, "x"),
            item(3, "C", 1_000, "x"),
            item(4, "D", 1_000, "x"),
        ];

        let asc = view(&items, &Query::new().with_sort(SortKey::PriceAsc));
        assert_eq!(names(&asc), vec!["A", "B", "C", "D"]);

        let desc = view(&items, &Query::new().with_sort(SortKey::PriceDesc));
        assert_eq!(names(&desc), vec!["B", "C", "D", "A"]);
    }

    #[test]
    fn test_view_is_deterministic() {
        let items = fixture();
        let query = Query::new().with_sort(SortKey::PriceDesc);
        assert_eq!(view(&items, &query), view(&items, &query));
    }

    #[test]
    fn test_empty_collection() {
        let query = Query {
            category: CategoryFilter::Only("CPU".into()),
            ..Query::default()
        };
        assert!(view(&[], &query).is_empty());
        assert!(categories(&[]).is_empty());
    }

    #[test]
    fn test_categories_first_seen_order() {
        assert_eq!(categories(&fixture()), vec!["CPU", "Storage", "Accessories"]);
    }
}
