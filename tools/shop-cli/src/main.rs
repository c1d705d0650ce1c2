//! Shop CLI - browse the storefront and its back office from a terminal.
//!
//! Commands:
//! - `shop catalog` - Search, filter, sort, and page the catalog
//! - `shop categories` - List catalog categories
//! - `shop orders` - Admin order table
//! - `shop inquiries` - Admin inquiry table
//! - `shop checkout` - Place an order
//! - `shop config` - Manage configuration

mod commands;
mod config;
mod context;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{CatalogArgs, CheckoutArgs, ConfigArgs, InquiriesArgs, OrdersArgs};
use logging::LogFormat;

/// Shop CLI - storefront and back office for the shop API
#[derive(Parser)]
#[command(name = "shop")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Log line format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Human)]
    log_format: LogFormat,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search and browse the catalog
    Catalog(CatalogArgs),

    /// List catalog categories
    Categories,

    /// List orders (admin)
    Orders(OrdersArgs),

    /// List customer inquiries (admin)
    Inquiries(InquiriesArgs),

    /// Place an order
    Checkout(CheckoutArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose, cli.log_format);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    // Execute command
    let result = match cli.command {
        Commands::Catalog(args) => commands::catalog::run(args, &ctx).await,
        Commands::Categories => commands::catalog::categories(&ctx).await,
        Commands::Orders(args) => commands::admin::orders(args, &ctx).await,
        Commands::Inquiries(args) => commands::admin::inquiries(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
