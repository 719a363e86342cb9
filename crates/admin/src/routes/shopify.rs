//! Shopify mirror handlers.

use axum::{
    Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    routing::{get, put},
};
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use tattoo_dashboard_core::{ShopifyProductId, ShopifyStatus};

use crate::{
    error::AppError,
    shopify::FlatProduct,
    state::AppState,
};

/// Build the Shopify router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/shopify/products", get(list_products))
        .route("/shopify/products/update", put(update_status))
}

/// Query parameters for the product listing.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    /// Case-insensitive match on title or SKU.
    #[serde(default)]
    pub q: Option<String>,
}

/// Body of a status change. `productId` may be a number or a numeric string.
#[derive(Debug, Default, Deserialize)]
pub struct StatusChangeRequest {
    #[serde(rename = "productId", default)]
    pub product_id: Option<Value>,
    #[serde(default)]
    pub status: Option<String>,
}

impl StatusChangeRequest {
    /// Validated product id and status.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` if either field is missing or blank, or
    /// the id is not an integer.
    pub fn validate(self) -> Result<(ShopifyProductId, String), AppError> {
        let required = || AppError::BadRequest("Product ID and status are required".to_string());

        let id = self
            .product_id
            .as_ref()
            .and_then(parse_product_id)
            .ok_or_else(required)?;
        let status = self
            .status
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(required)?;

        Ok((id, status))
    }
}

fn parse_product_id(value: &Value) -> Option<ShopifyProductId> {
    match value {
        Value::Number(n) => n.as_i64().map(ShopifyProductId::new),
        Value::String(s) => s.trim().parse().ok().map(ShopifyProductId::new),
        _ => None,
    }
}

/// Every Shopify product, flattened, optionally filtered by `?q=`.
///
/// # Errors
///
/// Returns 500 with details if `SHOPIFY_URL` is unset or any page fails.
#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<FlatProduct>>, AppError> {
    const CONTEXT: &str = "Failed to fetch products";

    let client = state.shopify().map_err(AppError::shopify(CONTEXT))?;
    let products = client
        .fetch_all_products()
        .await
        .map_err(AppError::shopify(CONTEXT))?;

    let search = query.q.unwrap_or_default();
    let flat = products
        .iter()
        .map(FlatProduct::project)
        .filter(|p| p.matches_query(&search))
        .collect();

    Ok(Json(flat))
}

/// Change a product's status on Shopify and return the updated product.
///
/// # Errors
///
/// Returns 400 for a missing id or status, 500 with details if Shopify
/// rejects the change.
#[instrument(skip(state, payload))]
pub async fn update_status(
    State(state): State<AppState>,
    payload: Result<Json<StatusChangeRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    const CONTEXT: &str = "Failed to update product";

    let Json(request) = payload?;
    let (id, status) = request.validate()?;

    if ShopifyStatus::from_received(&status).is_none() {
        tracing::warn!(product_id = %id, status = %status, "Forwarding unrecognized Shopify status");
    }

    let client = state.shopify().map_err(AppError::shopify(CONTEXT))?;
    let product = client
        .update_status(id, &status)
        .await
        .map_err(AppError::shopify(CONTEXT))?;

    Ok(Json(product))
}
