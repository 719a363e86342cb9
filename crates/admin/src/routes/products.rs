//! Local catalog product handlers.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    routing::{get, patch},
};
use serde::Serialize;
use tracing::instrument;

use tattoo_dashboard_core::InternalId;

use crate::{
    db::{DeletedProduct, ProductRepository},
    error::AppError,
    models::{ProductAggregate, ProductUpdate, StatusUpdate},
    state::AppState,
};

/// Build the products router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/products/{id}/status", patch(update_status))
}

/// Response for a successful delete.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: &'static str,
    pub deleted: DeletedProduct,
}

/// Response for a successful status change.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub success: bool,
    pub status: String,
}

fn parse_id(raw: &str) -> Result<InternalId, AppError> {
    InternalId::parse(raw).map_err(|e| AppError::BadRequest(format!("Invalid product id: {e}")))
}

/// List every product with variants, images, metadata, and sales.
///
/// # Errors
///
/// Returns 500 if the catalog cannot be read.
#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductAggregate>>, AppError> {
    let products = ProductRepository::new(state.store())
        .list_all()
        .await
        .map_err(AppError::database("Failed to fetch products"))?;
    Ok(Json(products))
}

/// Get one product aggregate.
///
/// # Errors
///
/// Returns 404 if no product has this internal id.
#[instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductAggregate>, AppError> {
    let id = parse_id(&id)?;
    ProductRepository::new(state.store())
        .get(&id)
        .await
        .map_err(AppError::database("Failed to fetch product"))?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))
}

/// Replace a product's fields, variants, and metadata.
///
/// # Errors
///
/// Returns 400 for a malformed body or variant id, 404 for an unknown product.
#[instrument(skip(state, payload))]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ProductUpdate>, JsonRejection>,
) -> Result<Json<ProductAggregate>, AppError> {
    let id = parse_id(&id)?;
    let Json(update) = payload?;

    let product = ProductRepository::new(state.store())
        .update(&id, &update)
        .await
        .map_err(AppError::database("Failed to update product"))?;
    Ok(Json(product))
}

/// Delete a product and everything that references it.
///
/// # Errors
///
/// Returns 404 if no product has this internal id (nothing is deleted).
#[instrument(skip(state))]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    let id = parse_id(&id)?;
    let deleted = ProductRepository::new(state.store())
        .delete(&id)
        .await
        .map_err(AppError::database("Failed to delete product"))?;

    Ok(Json(DeleteResponse {
        message: "Product deleted successfully",
        deleted,
    }))
}

/// Set a product's status. Any string is accepted.
///
/// # Errors
///
/// Returns 400 if the body has no `status`, 404 for an unknown product.
#[instrument(skip(state, payload))]
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<StatusUpdate>, JsonRejection>,
) -> Result<Json<StatusResponse>, AppError> {
    let id = parse_id(&id)?;
    let Json(StatusUpdate { status }) = payload?;

    ProductRepository::new(state.store())
        .update_status(&id, &status)
        .await
        .map_err(AppError::database("Failed to update product status"))?;

    Ok(Json(StatusResponse {
        success: true,
        status,
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_accepts_free_form_keys() {
        assert_eq!(parse_id("koi sleeve").unwrap().as_str(), "koi sleeve");
        assert_eq!(parse_id("TAT-0001").unwrap().as_str(), "TAT-0001");
    }

    #[test]
    fn test_parse_id_rejects_empty() {
        let err = parse_id("").unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m.starts_with("Invalid product id")));
    }
}
