//! Dashboard statistics handler.

use axum::{Json, Router, extract::State, routing::get};
use tracing::instrument;

use crate::{error::AppError, services::DashboardStats, state::AppState};

/// Build the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new().route("/dashboard/stats", get(stats))
}

/// Catalog totals, average price, and the first few products.
///
/// # Errors
///
/// Returns 500 if the catalog cannot be read.
#[instrument(skip(state))]
pub async fn stats(State(state): State<AppState>) -> Result<Json<DashboardStats>, AppError> {
    DashboardStats::load(state.store())
        .await
        .map(Json)
        .map_err(AppError::database("Failed to load dashboard statistics"))
}
