//! HTTP collaborators for the storefront API.
//!
//! Implements the `shop-commerce` collaborator traits over the remote REST
//! API with `reqwest`.
//!
//! # Example
//!
//! ```rust,no_run
//! use shop_commerce::prelude::*;
//! use shop_data::{ApiClient, ApiConfig, HttpCatalog};
//!
//! # async fn run() -> Result<(), shop_data::FetchError> {
//! let client = ApiClient::new(ApiConfig::new("http://localhost:8080"))?;
//! let catalog = Catalog::load(&HttpCatalog::new(client)).await;
//! println!("{} items", catalog.len());
//! # Ok(())
//! # }
//! ```

mod admin;
mod catalog;
mod config;
mod error;
mod orders;
mod response;

pub use admin::HttpAdmin;
pub use catalog::HttpCatalog;
pub use config::ApiConfig;
pub use error::FetchError;
pub use orders::HttpOrders;
pub use response::ApiResponse;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Client for the storefront API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
}

impl ApiClient {
    /// Create a client from connection settings.
    pub fn new(config: ApiConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.base_url.trim_end_matches('/').to_string(),
                auth_token: config.auth_token,
            }),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Whether a bearer token is configured.
    pub fn has_auth_token(&self) -> bool {
        self.inner.auth_token.is_some()
    }

    /// Resolve a path against the base URL. Absolute URLs pass through.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.inner.base_url, path)
        } else {
            format!("{}/{}", self.inner.base_url, path)
        }
    }

    /// GET a JSON document.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let request = self.inner.client.get(self.url(path));
        self.send(request, path, false).await
    }

    /// GET a JSON document with the bearer token attached.
    pub async fn get_json_authorized<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, FetchError> {
        let request = self.inner.client.get(self.url(path));
        self.send(request, path, true).await
    }

    /// POST a JSON body and decode the JSON reply.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, FetchError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.inner.client.post(self.url(path)).json(body);
        self.send(request, path, false).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        mut request: reqwest::RequestBuilder,
        path: &str,
        authorized: bool,
    ) -> Result<T, FetchError> {
        if authorized {
            if let Some(token) = &self.inner.auth_token {
                request = request.bearer_auth(token);
            }
        }

        tracing::debug!(path, "api request");
        let response = ApiResponse::read(request.send().await?).await?;
        tracing::debug!(path, status = response.status, "api response");
        response.error_for_status()?.json()
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url)
            .field("auth_token", &self.inner.auth_token.as_ref().map(|_| "***"))
            .finish_non_exhaustive()
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{ApiClient, ApiConfig, FetchError, HttpAdmin, HttpCatalog, HttpOrders};
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(ApiConfig::new(base)).unwrap()
    }

    #[test]
    fn test_url_joins_base() {
        let client = client("http://localhost:8080/");
        assert_eq!(client.url("/api/products"), "http://localhost:8080/api/products");
        assert_eq!(client.url("api/products"), "http://localhost:8080/api/products");
    }

    #[test]
    fn test_url_absolute_passthrough() {
        let client = client("http://localhost:8080");
        assert_eq!(client.url("https://cdn.example.com/x"), "https://cdn.example.com/x");
    }

    #[test]
    fn test_debug_hides_token() {
        let client =
            ApiClient::new(ApiConfig::new("http://localhost:8080").with_auth_token("secret")).unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains("secret"));
        assert!(client.has_auth_token());
    }
}
