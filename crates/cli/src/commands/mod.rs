//! CLI subcommands.

pub mod indexes;
pub mod seed;
pub mod stats;

use tattoo_dashboard_admin::config::MongoConfig;
use tattoo_dashboard_admin::db::Store;

/// Connect to the catalog named by `MONGODB_URI` / `MONGODB_DATABASE`.
async fn connect() -> Result<Store, Box<dyn std::error::Error>> {
    let config = MongoConfig::from_env()?;
    let store = Store::connect(&config).await?;
    tracing::info!(database = %config.database, "Connected to catalog");
    Ok(store)
}
