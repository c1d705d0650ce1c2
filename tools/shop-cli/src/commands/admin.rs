//! Back-office table commands.

use anyhow::{Context as _, Result};
use serde::Serialize;
use shop_commerce::admin::{
    list_page, status_counts, AdminSource, InquirySortField, ListQuery, ListRecord,
    OrderSortField, StatusFilter,
};
use shop_commerce::search::{PageRequest, Pagination, SortDirection};
use shop_data::HttpAdmin;
use std::collections::BTreeMap;
use std::str::FromStr;

use super::{InquiriesArgs, OrdersArgs, TableArgs};
use crate::context::Context;
use crate::output::{status_badge, truncate};

const ORDER_WIDTHS: [usize; 5] = [6, 12, 22, 28, 12];
const INQUIRY_WIDTHS: [usize; 5] = [6, 20, 20, 30, 12];

#[derive(Serialize)]
struct TablePage<'a, R> {
    rows: Vec<&'a R>,
    pagination: Pagination,
}

fn parse_direction(value: &str) -> Result<SortDirection> {
    match value.to_lowercase().as_str() {
        "asc" => Ok(SortDirection::Asc),
        "desc" => Ok(SortDirection::Desc),
        other => anyhow::bail!("unknown sort direction: {} (expected asc or desc)", other),
    }
}

/// Build a list query from the shared table flags.
fn build_query<F>(table: &TableArgs, sort: &str) -> Result<ListQuery<F>>
where
    F: FromStr + Default + Copy + PartialEq,
    F::Err: std::error::Error + Send + Sync + 'static,
{
    let field: F = sort.parse()?;
    Ok(ListQuery::new()
        .with_text(table.search.clone())
        .with_status(StatusFilter::parse(&table.status))
        .with_sort(field, parse_direction(&table.direction)?)
        .with_page(PageRequest::new(table.page, table.page_size)))
}

fn print_counts(counts: &BTreeMap<String, usize>, total: usize, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(counts);
        return;
    }
    ctx.output.kv("total", &total.to_string());
    for (status, count) in counts {
        ctx.output.kv(status, &count.to_string());
    }
}

fn print_footer(pagination: &Pagination, ctx: &Context) {
    ctx.output.info("");
    ctx.output.info(&format!(
        "Showing {}-{} of {} (page {}/{})",
        pagination.start_item(),
        pagination.end_item(),
        pagination.total,
        pagination.page,
        pagination.total_pages
    ));
}

/// Run the orders command.
pub async fn orders(args: OrdersArgs, ctx: &Context) -> Result<()> {
    let query: ListQuery<OrderSortField> =
        build_query(&args.table, &args.sort).context("Invalid order query")?;
    if ctx.config.api.auth_token.is_none() {
        ctx.output
            .warn("No API token configured; the orders endpoint may refuse the request.");
    }
    let admin = HttpAdmin::new(ctx.api_client()?);
    let records = admin
        .fetch_orders()
        .await
        .context("Failed to fetch orders")?;
    tracing::debug!(count = records.len(), "orders fetched");

    if args.table.counts {
        print_counts(&status_counts(&records), records.len(), ctx);
        return Ok(());
    }

    let page = list_page(&records, &query);
    if ctx.output.is_json() {
        ctx.output.json(&TablePage {
            rows: page.items,
            pagination: page.pagination,
        });
        return Ok(());
    }

    ctx.output.header("Orders");
    if page.is_empty() {
        ctx.output.info("No orders match.");
        return Ok(());
    }

    ctx.output.table_header(
        &["ID", "DATE", "CUSTOMER", "EMAIL", "STATUS"],
        &ORDER_WIDTHS,
    );
    for order in &page.items {
        ctx.output.table_row(
            &[
                order.id.as_str(),
                &order.order_date,
                &truncate(&order.customer_name, ORDER_WIDTHS[2]),
                &truncate(&order.customer_email, ORDER_WIDTHS[3]),
                &status_badge(order.status()),
            ],
            &ORDER_WIDTHS,
        );
    }
    print_footer(&page.pagination, ctx);

    Ok(())
}

/// Run the inquiries command.
pub async fn inquiries(args: InquiriesArgs, ctx: &Context) -> Result<()> {
    let query: ListQuery<InquirySortField> =
        build_query(&args.table, &args.sort).context("Invalid inquiry query")?;
    if ctx.config.api.auth_token.is_none() {
        ctx.output
            .warn("No API token configured; the inquiries endpoint may refuse the request.");
    }
    let admin = HttpAdmin::new(ctx.api_client()?);
    let records = admin
        .fetch_inquiries()
        .await
        .context("Failed to fetch inquiries")?;
    tracing::debug!(count = records.len(), "inquiries fetched");

    if args.table.counts {
        print_counts(&status_counts(&records), records.len(), ctx);
        return Ok(());
    }

    let page = list_page(&records, &query);
    if ctx.output.is_json() {
        ctx.output.json(&TablePage {
            rows: page.items,
            pagination: page.pagination,
        });
        return Ok(());
    }

    ctx.output.header("Inquiries");
    if page.is_empty() {
        ctx.output.info("No inquiries match.");
        return Ok(());
    }

    ctx.output.table_header(
        &["ID", "RECEIVED", "FROM", "SUBJECT", "STATUS"],
        &INQUIRY_WIDTHS,
    );
    for inquiry in &page.items {
        ctx.output.table_row(
            &[
                inquiry.id.as_str(),
                &truncate(&inquiry.created_at, INQUIRY_WIDTHS[1]),
                &truncate(&inquiry.name, INQUIRY_WIDTHS[2]),
                &truncate(&inquiry.subject, INQUIRY_WIDTHS[3]),
                &status_badge(inquiry.status()),
            ],
            &INQUIRY_WIDTHS,
        );
    }
    print_footer(&page.pagination, ctx);

    Ok(())
}
