//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                         - Liveness check
//! GET    /health/ready                   - Readiness check (pings MongoDB)
//!
//! # Everything below requires `Authorization: Bearer <ADMIN_API_TOKEN>`
//!
//! # Local catalog (MongoDB)
//! GET    /api/products                   - Every product aggregate
//! GET    /api/products/{id}              - One product aggregate by internal id
//! PUT    /api/products/{id}              - Update fields, variants and metadata
//! DELETE /api/products/{id}              - Delete a product and its children
//! PATCH  /api/products/{id}/status       - Set the product status
//!
//! # Dashboard
//! GET    /api/dashboard/stats            - Totals, average price, recent products
//!
//! # Shopify mirror
//! GET    /api/shopify/products?q=        - Every Shopify product, flattened
//! PUT    /api/shopify/products/update    - Change a Shopify product's status
//!
//! # Webhook
//! POST   /api/trigger-webhook            - Call the configured webhook
//! ```

pub mod dashboard;
pub mod health;
pub mod products;
pub mod shopify;
pub mod webhook;

use axum::{Router, middleware::from_extractor_with_state, routing::get};

use crate::middleware::RequireApiToken;
use crate::state::AppState;

/// Build the full route tree.
///
/// `state` is needed up front because the bearer-token layer reads the
/// configured token from it.
pub fn routes(state: &AppState) -> Router<AppState> {
    let api = Router::new()
        .merge(products::router())
        .merge(dashboard::router())
        .merge(shopify::router())
        .merge(webhook::router())
        .route_layer(from_extractor_with_state::<RequireApiToken, AppState>(
            state.clone(),
        ));

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/api", api)
}
