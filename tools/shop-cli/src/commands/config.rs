//! Configuration management commands.

use std::fs;

use anyhow::{bail, Context as _, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, ShopConfig};
use crate::context::{Context, CONFIG_NAMES};

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
    }
}

/// Hide all but the last four characters of a secret.
fn mask_token(token: &str) -> String {
    let count = token.chars().count();
    if count <= 4 {
        return "****".to_string();
    }
    let tail: String = token.chars().skip(count - 4).collect();
    format!("****{}", tail)
}

/// Copy of the config that is safe to print.
fn redacted(config: &ShopConfig) -> ShopConfig {
    let mut config = config.clone();
    config.api.auth_token = config.api.auth_token.as_deref().map(mask_token);
    config
}

fn show_config(ctx: &Context) -> Result<()> {
    let config = redacted(&ctx.config);

    if ctx.output.is_json() {
        ctx.output.json(&config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("source", &path.display().to_string()),
        None => ctx.output.kv("source", "defaults (no config file found)"),
    }

    ctx.output.info("");
    ctx.output.info("[api]");
    ctx.output.kv("base_url", &config.api.base_url);
    ctx.output.kv("timeout_ms", &config.api.timeout_ms.to_string());
    ctx.output.kv(
        "auth_token",
        config.api.auth_token.as_deref().unwrap_or("(not set)"),
    );

    ctx.output.info("");
    ctx.output.info("[catalog]");
    ctx.output
        .kv("page_size", &config.catalog.page_size.to_string());
    ctx.output.kv("max_price", &config.catalog.max_price.to_string());

    ctx.output.info("");
    ctx.output.info("[checkout]");
    ctx.output.kv(
        "require_authentication",
        &config.checkout.require_authentication.to_string(),
    );
    ctx.output.kv(
        "submit_timeout_ms",
        &config.checkout.submit_timeout_ms.to_string(),
    );

    ctx.output.info("");
    ctx.output.info("[identity]");
    let unset = "(not set)";
    ctx.output
        .kv("name", config.identity.name.as_deref().unwrap_or(unset));
    ctx.output
        .kv("email", config.identity.email.as_deref().unwrap_or(unset));
    ctx.output
        .kv("phone", config.identity.phone.as_deref().unwrap_or(unset));

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}
