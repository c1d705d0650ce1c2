//! Checkout command: fill a cart from the catalog and place an order.

use anyhow::{Context as _, Result};
use serde::Serialize;
use shop_commerce::cart::{Cart, CartPricing, CartSnapshot, PricingRules};
use shop_commerce::catalog::Catalog;
use shop_commerce::checkout::{BuyerDetails, CheckoutState, Identity, OrderResult};
use shop_commerce::session::{SessionHandle, ShopSession};
use shop_commerce::ItemId;
use shop_data::HttpOrders;
use std::sync::Arc;

use super::CheckoutArgs;
use crate::context::Context;
use crate::output::{status_badge, truncate};

const WIDTHS: [usize; 4] = [32, 5, 10, 10];

/// One `--item` flag.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ItemRequest {
    id: ItemId,
    quantity: u32,
}

/// Parse `ID` or `ID:QUANTITY`.
fn parse_item_arg(value: &str) -> Result<ItemRequest> {
    let (id, quantity) = match value.split_once(':') {
        Some((id, qty)) => {
            let quantity: u32 = qty
                .trim()
                .parse()
                .with_context(|| format!("Invalid quantity in '{}'", value))?;
            (id.trim(), quantity)
        }
        None => (value.trim(), 1),
    };

    if id.is_empty() {
        anyhow::bail!("Missing item id in '{}'", value);
    }
    if quantity == 0 {
        anyhow::bail!("Quantity must be at least 1 in '{}'", value);
    }

    Ok(ItemRequest {
        id: ItemId::new(id),
        quantity,
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckoutReport<'a> {
    state: &'static str,
    cart: &'a CartSnapshot,
    pricing: CartPricing,
    #[serde(skip_serializing_if = "Option::is_none")]
    order: Option<&'a OrderResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    failure: Option<String>,
}

/// Put each requested item into the session cart, reporting clamps.
async fn fill_cart(
    session: &SessionHandle,
    catalog: &Catalog,
    requests: &[ItemRequest],
    ctx: &Context,
) -> Result<()> {
    for request in requests {
        let Some(item) = catalog.get(&request.id) else {
            ctx.output
                .warn(&format!("Item {} is not in the catalog, skipping", request.id));
            continue;
        };

        if !session.add(item.clone()).await? {
            ctx.output.warn(&format!(
                "{} could not be added (stock: {})",
                item.name, item.stock
            ));
            continue;
        }
        if request.quantity > 1 {
            session
                .set_quantity(request.id.clone(), i64::from(request.quantity) - 1)
                .await?;
        }
    }

    let snapshot = session.snapshot().await?;
    for request in requests {
        if let Some(line) = snapshot.lines.iter().find(|line| line.item.id == request.id) {
            if line.quantity < request.quantity {
                ctx.output.warn(&format!(
                    "{}: only {} in stock, quantity reduced from {}",
                    line.item.name, line.quantity, request.quantity
                ));
            }
        }
    }

    Ok(())
}

fn print_summary(snapshot: &CartSnapshot, pricing: &CartPricing, ctx: &Context) {
    ctx.output.header("Order summary");
    ctx.output
        .table_header(&["ITEM", "QTY", "PRICE", "TOTAL"], &WIDTHS);
    for line in &snapshot.lines {
        ctx.output.table_row(
            &[
                truncate(&line.item.name, WIDTHS[0]).as_str(),
                &line.quantity.to_string(),
                &line.item.price.to_string(),
                &line.line_total().to_string(),
            ],
            &WIDTHS,
        );
    }
    ctx.output.info("");
    ctx.output.kv("Subtotal", &pricing.subtotal.to_string());
    let shipping = if pricing.has_free_shipping() {
        "free".to_string()
    } else {
        pricing.shipping_total.to_string()
    };
    ctx.output.kv("Shipping", &shipping);
    ctx.output.kv("Tax", &pricing.tax_total.to_string());
    ctx.output.kv("Total", &pricing.grand_total.to_string());
}

/// Form values: identity first, flags on top.
fn buyer_details(args: &CheckoutArgs, identity: &Identity) -> BuyerDetails {
    let mut buyer = BuyerDetails::prefilled(identity).with_notes(args.notes.clone());
    if let Some(name) = &args.name {
        buyer = buyer.with_name(name.clone());
    }
    if let Some(email) = &args.email {
        buyer = buyer.with_email(email.clone());
    }
    if let Some(phone) = &args.phone {
        buyer = buyer.with_phone(phone.clone());
    }
    buyer
}

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let requests = args
        .items
        .iter()
        .map(|value| parse_item_arg(value))
        .collect::<Result<Vec<_>>>()?;

    let catalog = super::catalog::load(ctx).await?;
    if catalog.is_empty() {
        anyhow::bail!("The catalog is empty; nothing can be ordered");
    }

    let submitter = Arc::new(HttpOrders::new(ctx.api_client()?));
    let session =
        ShopSession::new(Cart::new(), ctx.config.checkout_policy(), submitter).spawn();

    fill_cart(&session, &catalog, &requests, ctx).await?;

    let snapshot = session.snapshot().await?;
    if snapshot.is_empty() {
        anyhow::bail!("Cart is empty; nothing to order");
    }
    let pricing = PricingRules::default().price(snapshot.total());

    if args.dry_run {
        if ctx.output.is_json() {
            ctx.output.json(&CheckoutReport {
                state: CheckoutState::Idle.as_str(),
                cart: &snapshot,
                pricing,
                order: None,
                failure: None,
            });
        } else {
            print_summary(&snapshot, &pricing, ctx);
            ctx.output.info("");
            ctx.output.info("Dry run: order not submitted.");
        }
        return Ok(());
    }

    if !ctx.output.is_json() {
        print_summary(&snapshot, &pricing, ctx);
    }

    let identity = ctx.config.identity();
    let buyer = buyer_details(&args, &identity);
    ctx.output.debug(&format!(
        "Submitting {} line(s) as {}",
        snapshot.lines.len(),
        if identity.is_authenticated() {
            "authenticated buyer"
        } else {
            "guest"
        }
    ));

    let started = session.confirm(identity, buyer).await?;
    let state = if started.is_submitting() {
        session.settled().await?
    } else {
        started
    };
    tracing::info!(state = state.as_str(), "checkout settled");

    if ctx.output.is_json() {
        ctx.output.json(&CheckoutReport {
            state: state.as_str(),
            cart: &snapshot,
            pricing,
            order: state.result(),
            failure: state.failure().map(ToString::to_string),
        });
    }

    match &state {
        CheckoutState::Confirmed(order) => {
            ctx.output.info("");
            ctx.output.success(&format!(
                "Order {} placed ({})",
                order.id,
                status_badge(order.status().as_str())
            ));
            Ok(())
        }
        CheckoutState::Failed(reason) => anyhow::bail!("Checkout failed: {}", reason),
        other => anyhow::bail!("Checkout did not complete (state: {})", other.as_str()),
    }
}
