//! CLI command implementations.

pub mod admin;
pub mod catalog;
pub mod checkout;
pub mod config;

use clap::{Args, Subcommand};

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    /// Text matched against name and description.
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Category, or "all".
    #[arg(short = 'C', long, default_value = "all")]
    pub category: String,

    /// Lowest price, inclusive.
    #[arg(long)]
    pub min_price: Option<f64>,

    /// Highest price, inclusive (default: catalog.max_price).
    #[arg(long)]
    pub max_price: Option<f64>,

    /// Sort order: name, price-asc, price-desc.
    #[arg(long, default_value = "name")]
    pub sort: String,

    /// Page number (1-based).
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Items per page (default: catalog.page_size).
    #[arg(long)]
    pub page_size: Option<usize>,
}

/// Shared arguments for the admin tables.
#[derive(Args)]
pub struct TableArgs {
    /// Search text.
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Status, or "all".
    #[arg(long, default_value = "all")]
    pub status: String,

    /// Sort direction: asc or desc.
    #[arg(long, default_value = "desc")]
    pub direction: String,

    /// Page number (1-based).
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Rows per page.
    #[arg(long, default_value = "10")]
    pub page_size: usize,

    /// Print per-status counts instead of rows.
    #[arg(long)]
    pub counts: bool,
}

/// Arguments for the orders command.
#[derive(Args)]
pub struct OrdersArgs {
    #[command(flatten)]
    pub table: TableArgs,

    /// Sort column: id, orderDate, customerName, status.
    #[arg(long, default_value = "orderDate")]
    pub sort: String,
}

/// Arguments for the inquiries command.
#[derive(Args)]
pub struct InquiriesArgs {
    #[command(flatten)]
    pub table: TableArgs,

    /// Sort column: id, createdAt, name, status.
    #[arg(long, default_value = "createdAt")]
    pub sort: String,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Item to buy, as ID or ID:QUANTITY. Repeatable.
    #[arg(short, long = "item", required = true)]
    pub items: Vec<String>,

    /// Buyer name (default: identity.name).
    #[arg(long)]
    pub name: Option<String>,

    /// Buyer email (default: identity.email).
    #[arg(long)]
    pub email: Option<String>,

    /// Buyer phone (default: identity.phone).
    #[arg(long)]
    pub phone: Option<String>,

    /// Order notes.
    #[arg(long, default_value = "")]
    pub notes: String,

    /// Show the order summary without submitting.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration.
    Show,
    /// Write a default shop.toml in the current directory.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
