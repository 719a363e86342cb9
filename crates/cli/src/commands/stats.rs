//! Catalog statistics.

use tracing::info;

use tattoo_dashboard_admin::services::DashboardStats;

/// Print the dashboard statistics for the configured catalog.
///
/// # Errors
///
/// Returns an error if the catalog cannot be read.
pub async fn print() -> Result<(), Box<dyn std::error::Error>> {
    let store = super::connect().await?;
    let stats = DashboardStats::load(&store).await?;

    info!("Catalog Statistics");
    info!("==================");
    info!("Total products:  {}", stats.total_products);
    info!("Active products: {}", stats.active_products);
    info!("Total sales:     {}", stats.total_sales);
    info!("Average price:   {}", stats.average_price);
    info!("Recent products:");

    for product in &stats.recent_products {
        info!(
            "  {:<16} {:<32} {:<10} sales={}",
            product.internal_id.as_str(),
            product.title.as_deref().unwrap_or("-"),
            product.status.as_deref().unwrap_or("-"),
            product.sales_count
        );
    }

    Ok(())
}
