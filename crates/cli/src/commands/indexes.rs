//! Index creation.
//!
//! # Environment Variables
//!
//! - `MONGODB_URI` - `MongoDB` connection string
//! - `MONGODB_DATABASE` - Catalog database name (default `tattoo_dashboard`)

/// Create the catalog indexes. Safe to run repeatedly.
///
/// # Errors
///
/// Returns an error if `MONGODB_URI` is missing or index creation fails.
pub async fn create() -> Result<(), Box<dyn std::error::Error>> {
    let store = super::connect().await?;

    tracing::info!("Creating catalog indexes...");
    store.create_indexes().await?;
    tracing::info!("Catalog indexes ready");
    Ok(())
}
