//! Catalog browsing commands.

use anyhow::{Context as _, Result};
use serde::Serialize;
use shop_commerce::catalog::{Catalog, Item};
use shop_commerce::search::{PageRequest, Pagination, Query, SortKey};
use shop_commerce::Money;
use shop_data::HttpCatalog;

use super::CatalogArgs;
use crate::context::Context;
use crate::output::truncate;

const WIDTHS: [usize; 5] = [6, 32, 14, 10, 8];

#[derive(Serialize)]
struct CatalogPage<'a> {
    items: Vec<&'a Item>,
    pagination: Pagination,
    categories: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    load_error: Option<&'a str>,
}

/// Fetch the catalog, mapping fetch failures to an empty catalog.
pub async fn load(ctx: &Context) -> Result<Catalog> {
    let client = ctx.api_client()?;
    let catalog = Catalog::load(&HttpCatalog::new(client)).await;
    if let Some(e) = catalog.load_error() {
        ctx.output.warn(&format!("Catalog unavailable: {}", e));
    }
    Ok(catalog)
}

/// Build the view query from flags and configured defaults.
fn build_query(args: &CatalogArgs, ctx: &Context) -> Result<Query> {
    let sort: SortKey = args.sort.parse()?;
    let min = args.min_price.map(Money::from_decimal).unwrap_or(Money::ZERO);
    let max = args
        .max_price
        .map(Money::from_decimal)
        .unwrap_or(ctx.config.catalog.max_price);

    Ok(Query::new()
        .with_text(args.search.clone())
        .with_category(args.category.as_str())
        .with_price_range(min, max)
        .with_sort(sort))
}

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let query = build_query(&args, ctx).context("Invalid catalog query")?;
    let per_page = args.page_size.unwrap_or(ctx.config.catalog.page_size);
    let catalog = load(ctx).await?;
    let page = catalog.page(&query, PageRequest::new(args.page, per_page));

    if ctx.output.is_json() {
        ctx.output.json(&CatalogPage {
            items: page.items,
            pagination: page.pagination,
            categories: catalog.categories(),
            load_error: catalog.load_error(),
        });
        return Ok(());
    }

    ctx.output.header("Catalog");

    if page.is_empty() {
        ctx.output.info("No items match.");
        return Ok(());
    }

    ctx.output
        .table_header(&["ID", "NAME", "CATEGORY", "PRICE", "STOCK"], &WIDTHS);
    for item in &page.items {
        let price = item.price.to_string();
        let stock = if item.in_stock() {
            item.stock.to_string()
        } else {
            "sold out".to_string()
        };
        ctx.output.table_row(
            &[
                item.id.as_str(),
                &truncate(&item.name, WIDTHS[1]),
                &item.category,
                &price,
                &stock,
            ],
            &WIDTHS,
        );
    }

    let p = page.pagination;
    ctx.output.info("");
    ctx.output.info(&format!(
        "Showing {}-{} of {} (page {}/{})",
        p.start_item(),
        p.end_item(),
        p.total,
        p.page,
        p.total_pages
    ));

    Ok(())
}

/// Run the categories command.
pub async fn categories(ctx: &Context) -> Result<()> {
    let catalog = load(ctx).await?;

    if ctx.output.is_json() {
        ctx.output.json(&catalog.categories());
        return Ok(());
    }

    ctx.output.header("Categories");
    if catalog.categories().is_empty() {
        ctx.output.info("No categories.");
    }
    for category in catalog.categories() {
        let count = catalog
            .items()
            .iter()
            .filter(|item| &item.category == category)
            .count();
        ctx.output.kv(category, &format!("{} item(s)", count));
    }

    Ok(())
}
