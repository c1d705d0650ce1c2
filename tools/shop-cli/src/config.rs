//! CLI configuration.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use shop_commerce::checkout::{CheckoutPolicy, Identity};
use shop_commerce::search::{DEFAULT_MAX_PRICE, DEFAULT_PAGE_SIZE};
use shop_commerce::Money;
use shop_data::ApiConfig;

/// Environment variable replacing `api.base_url`.
pub const API_URL_ENV: &str = "SHOP_API_URL";
/// Environment variable replacing `api.auth_token`.
pub const API_TOKEN_ENV: &str = "SHOP_API_TOKEN";

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShopConfig {
    /// API connection.
    #[serde(default)]
    pub api: ApiConfig,

    /// Catalog browsing defaults.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Checkout rules.
    #[serde(default)]
    pub checkout: CheckoutConfig,

    /// Profile fields used to prefill orders.
    #[serde(default)]
    pub identity: IdentityConfig,
}

impl ShopConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))
    }

    /// Apply environment overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`. Empty values are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = lookup(API_URL_ENV) {
            self.api.base_url = url;
        }
        if let Some(token) = lookup(API_TOKEN_ENV) {
            self.api.auth_token = Some(token);
        }
        self
    }

    /// Checkout rules for the orchestrator.
    pub fn checkout_policy(&self) -> CheckoutPolicy {
        CheckoutPolicy {
            require_authentication: self.checkout.require_authentication,
            submit_timeout: Duration::from_millis(self.checkout.submit_timeout_ms),
        }
    }

    /// The caller's identity: authenticated when an API token is configured.
    pub fn identity(&self) -> Identity {
        if self.api.auth_token.is_none() {
            return Identity::Anonymous;
        }
        Identity::Authenticated {
            name: self.identity.name.clone(),
            email: self.identity.email.clone(),
            phone: self.identity.phone.clone(),
        }
    }
}

/// Catalog browsing defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Items per page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Upper bound of the price filter.
    #[serde(default = "default_max_price")]
    pub max_price: Money,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_max_price() -> Money {
    DEFAULT_MAX_PRICE
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            max_price: default_max_price(),
        }
    }
}

/// Checkout rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// Refuse orders from anonymous callers.
    #[serde(default = "default_true")]
    pub require_authentication: bool,

    /// Bounded wait for the order service, in milliseconds.
    #[serde(default = "default_submit_timeout_ms")]
    pub submit_timeout_ms: u64,
}

fn default_true() -> bool {
    true
}

fn default_submit_timeout_ms() -> u64 {
    30_000
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            require_authentication: true,
            submit_timeout_ms: default_submit_timeout_ms(),
        }
    }
}

/// Profile fields used to prefill orders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdentityConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Generate a default shop.toml config file.
pub fn generate_default_config() -> String {
    r#"# Shop CLI configuration

[api]
base_url = "http://localhost:8080"
timeout_ms = 10000
# auth_token = "..."     # or set SHOP_API_TOKEN

[catalog]
page_size = 10
max_price = 1000.0

[checkout]
require_authentication = true
submit_timeout_ms = 30000

[identity]
# name = "Jane Doe"
# email = "jane@example.com"
# phone = "555-0100"
"#
    .to_string()
}
