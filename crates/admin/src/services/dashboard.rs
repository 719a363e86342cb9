//! Catalog statistics for the dashboard overview.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::instrument;

use tattoo_dashboard_core::{InternalId, ProductStatus};

use crate::db::{ProductRepository, RepositoryError, Store};
use crate::models::ProductAggregate;

/// Number of products listed under "recent".
pub const RECENT_LIMIT: usize = 5;

/// Summary figures over the whole catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_products: usize,
    pub active_products: usize,
    pub total_sales: usize,
    /// Mean over products of each product's mean variant price, 2 d.p.
    #[serde(with = "rust_decimal::serde::float")]
    pub average_price: Decimal,
    pub recent_products: Vec<RecentProduct>,
}

/// Compact product row for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentProduct {
    pub internal_id: InternalId,
    pub title: Option<String>,
    pub category: Option<String>,
    pub style: Option<String>,
    pub status: Option<String>,
    pub sales_count: usize,
    pub image: Option<String>,
}

impl DashboardStats {
    /// Compute statistics from joined aggregates (list form, with sales).
    #[must_use]
    pub fn compute(products: &[ProductAggregate]) -> Self {
        let active_products = products
            .iter()
            .filter(|p| {
                p.product
                    .status
                    .as_deref()
                    .and_then(ProductStatus::from_stored)
                    .is_some_and(ProductStatus::is_active)
            })
            .count();

        let total_sales = products.iter().map(ProductAggregate::sales_count).sum();

        let product_means: Vec<Decimal> = products.iter().filter_map(mean_variant_price).collect();
        let average_price = mean(&product_means).unwrap_or_default().round_dp(2);

        let recent_products = products
            .iter()
            .take(RECENT_LIMIT)
            .map(|p| RecentProduct {
                internal_id: p.product.internal_id.clone(),
                title: p.product.title.clone(),
                category: p.product.category.clone(),
                style: p.product.style.clone(),
                status: p.product.status.clone(),
                sales_count: p.sales_count(),
                image: p.images.first().and_then(|i| i.src.clone()),
            })
            .collect();

        Self {
            total_products: products.len(),
            active_products,
            total_sales,
            average_price,
            recent_products,
        }
    }

    /// Load every aggregate and compute statistics.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the catalog cannot be read.
    #[instrument(skip(store))]
    pub async fn load(store: &Store) -> Result<Self, RepositoryError> {
        let products = ProductRepository::new(store).list_all().await?;
        Ok(Self::compute(&products))
    }
}

/// `None` when the product has no priced variant.
fn mean_variant_price(product: &ProductAggregate) -> Option<Decimal> {
    let prices: Vec<Decimal> = product.variants.iter().filter_map(|v| v.price).collect();
    mean(&prices)
}

fn mean(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    let total: Decimal = values.iter().sum();
    total.checked_div(Decimal::from(values.len()))
}
