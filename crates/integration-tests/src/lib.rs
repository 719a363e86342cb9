//! Integration test support for the tattoo dashboard.
//!
//! # Running Tests
//!
//! ```bash
//! # HTTP tests (no database needed)
//! cargo test -p tattoo-dashboard-integration-tests
//!
//! # Catalog tests against a replica set (transactions need one)
//! MONGODB_URI="mongodb://localhost:27017/?replicaSet=rs0" \
//!     cargo test -p tattoo-dashboard-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `admin_api` - The admin router served over TCP, with a fake Shopify
//! - `catalog` - Repository behaviour against a real `MongoDB`

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::net::SocketAddr;

use bson::doc;
use secrecy::SecretString;
use tattoo_dashboard_admin::config::{AdminConfig, MongoConfig, ShopifyConfig};
use tattoo_dashboard_admin::db::Store;
use tattoo_dashboard_admin::models::NewProduct;
use tattoo_dashboard_admin::routes;
use tattoo_dashboard_admin::state::AppState;

/// Bearer token accepted by servers started with [`test_config`].
pub const API_TOKEN: &str = "k3J9!pQ2@vL8#xZ5$mN1^bH7&cT4*wR6";

/// Connection string for catalog tests, falling back to a local replica set.
#[must_use]
pub fn mongodb_uri() -> String {
    std::env::var("MONGODB_URI")
        .unwrap_or_else(|_| "mongodb://localhost:27017/?replicaSet=rs0".to_string())
}

/// Database name unique to one test, so tests can run in parallel.
#[must_use]
pub fn unique_database() -> String {
    format!("tattoo_dashboard_it_{}", bson::oid::ObjectId::new().to_hex())
}

/// Admin configuration pointing at `shopify_url` (if any) and a fresh database.
#[must_use]
pub fn test_config(shopify_url: Option<String>) -> AdminConfig {
    AdminConfig {
        mongodb: MongoConfig {
            uri: SecretString::from(mongodb_uri()),
            database: unique_database(),
        },
        host: [127, 0, 0, 1].into(),
        port: 0,
        api_token: SecretString::from(API_TOKEN),
        shopify: ShopifyConfig {
            url: shopify_url.map(SecretString::from),
            ..ShopifyConfig::default()
        },
        webhook_url: None,
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 0.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// Serve the admin router on an ephemeral port and return its base URL.
pub async fn spawn_admin(config: AdminConfig) -> String {
    let store = Store::connect(&config.mongodb).await.unwrap();
    let state = AppState::new(config, store, reqwest::Client::new());
    let app = routes::routes(&state).with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// A throwaway catalog database, dropped by [`TestCatalog::cleanup`].
pub struct TestCatalog {
    pub store: Store,
}

impl TestCatalog {
    /// Connect to `MONGODB_URI` with a fresh database and create its indexes.
    pub async fn new() -> Self {
        Self::connect(mongodb_uri()).await
    }

    /// Like [`TestCatalog::new`], but the client identifies itself as
    /// `app_name` so server fail points can target only this catalog.
    pub async fn with_app_name(app_name: &str) -> Self {
        let uri = mongodb_uri();
        let separator = if uri.contains('?') { '&' } else { '?' };
        Self::connect(format!("{uri}{separator}appName={app_name}")).await
    }

    async fn connect(uri: String) -> Self {
        let config = MongoConfig {
            uri: SecretString::from(uri),
            database: unique_database(),
        };
        let store = Store::connect(&config).await.unwrap();
        store.create_indexes().await.unwrap();
        Self { store }
    }

    /// Make the next matching commands from clients named `app_name` fail.
    ///
    /// The first `skip` matching commands succeed. Needs a server started
    /// with `--setParameter enableTestCommands=1`.
    pub async fn fail_commands(&self, commands: &[&str], app_name: &str, skip: i32) {
        self.store
            .client()
            .database("admin")
            .run_command(doc! {
                "configureFailPoint": "failCommand",
                "mode": { "skip": skip },
                "data": {
                    "failCommands": commands.to_vec(),
                    "appName": app_name,
                    "errorCode": 2,
                },
            })
            .await
            .unwrap();
    }

    /// Switch off the fail point set by [`TestCatalog::fail_commands`].
    pub async fn clear_fail_point(&self) {
        self.store
            .client()
            .database("admin")
            .run_command(doc! { "configureFailPoint": "failCommand", "mode": "off" })
            .await
            .unwrap();
    }

    /// Drop the test database.
    pub async fn cleanup(self) {
        self.store.database().drop().await.unwrap();
    }
}

/// Build a seedable product from JSON.
#[must_use]
pub fn new_product(value: serde_json::Value) -> NewProduct {
    serde_json::from_value(value).unwrap()
}
