//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::AdminConfig;
use crate::db::Store;
use crate::shopify::{ShopifyClient, ShopifyError};

/// Application state shared across all handlers.
///
/// Cheap to clone: everything lives behind one `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    store: Store,
    http: reqwest::Client,
}

impl AppState {
    /// Create the shared state. `http` is reused by every outbound call.
    #[must_use]
    pub fn new(config: AdminConfig, store: Store, http: reqwest::Client) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                http,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn store(&self) -> &Store {
        &self.inner.store
    }

    /// Shared outbound HTTP client.
    #[must_use]
    pub fn http(&self) -> &reqwest::Client {
        &self.inner.http
    }

    /// Build a Shopify client for this request.
    ///
    /// # Errors
    ///
    /// Returns `ShopifyError::Config` if `SHOPIFY_URL` is missing or invalid,
    /// so the failure surfaces at request time rather than at startup.
    pub fn shopify(&self) -> Result<ShopifyClient, ShopifyError> {
        ShopifyClient::from_config(&self.inner.config.shopify, self.inner.http.clone())
    }
}
