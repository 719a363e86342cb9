//! Seed the catalog with product aggregates from a YAML file.
//!
//! Each product is inserted with its variants, images and metadata inside
//! one transaction. Products whose `internal_id` already exists are skipped,
//! so a seed file can be applied repeatedly.
//!
//! ```yaml
//! products:
//!   - internal_id: TAT-0001
//!     title: Koi Sleeve
//!     status: active
//!     variants:
//!       - { title: Full sleeve, price: 450.0, inventory_quantity: 2 }
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info, warn};

use tattoo_dashboard_admin::db::ProductRepository;
use tattoo_dashboard_admin::models::NewProduct;

/// Top-level shape of a seed file.
#[derive(Debug, Deserialize)]
pub struct SeedFile {
    pub products: Vec<NewProduct>,
}

/// Problems found before connecting to the database.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeedValidationError {
    #[error("internal_id {0} appears more than once")]
    DuplicateInternalId(String),
    #[error("{0}: title must not be empty")]
    EmptyTitle(String),
    #[error("{0}: variant price must not be negative")]
    NegativePrice(String),
}

/// Check a seed file for mistakes that would otherwise surface half-way
/// through seeding.
#[must_use]
pub fn validate(seed: &SeedFile) -> Vec<SeedValidationError> {
    let mut errors = Vec::new();
    let mut seen = std::collections::HashSet::new();

    for product in &seed.products {
        let id = product.internal_id.as_str();
        if !seen.insert(id) {
            errors.push(SeedValidationError::DuplicateInternalId(id.to_string()));
        }
        if product.title.trim().is_empty() {
            errors.push(SeedValidationError::EmptyTitle(id.to_string()));
        }
        if product.variants.iter().any(|v| v.price.is_sign_negative()) {
            errors.push(SeedValidationError::NegativePrice(id.to_string()));
        }
    }

    errors
}

/// Insert every product in `file_path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, fails validation,
/// or a database operation fails.
pub async fn products(file_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let path = Path::new(file_path);
    if !path.exists() {
        return Err(format!("File not found: {file_path}").into());
    }

    info!(path = %file_path, "Loading products from file");

    // Read and validate YAML before connecting to database
    let content = tokio::fs::read_to_string(path).await?;
    let seed: SeedFile = serde_yaml::from_str(&content)?;
    info!(products = seed.products.len(), "Parsed seed file");

    let errors = validate(&seed);
    if !errors.is_empty() {
        error!("Seed file validation failed:");
        for err in &errors {
            error!("  - {err}");
        }
        return Err(format!("{} validation errors found", errors.len()).into());
    }

    let store = super::connect().await?;
    let repository = ProductRepository::new(&store);

    let mut inserted = 0_usize;
    let mut skipped = 0_usize;
    for product in &seed.products {
        match repository.insert_aggregate(product).await? {
            Some(id) => {
                info!(internal_id = %product.internal_id, id = %id, "Inserted product");
                inserted += 1;
            }
            None => {
                warn!(internal_id = %product.internal_id, "Product already exists, skipped");
                skipped += 1;
            }
        }
    }

    info!("Seeding complete!");
    info!("  Products inserted: {inserted}");
    info!("  Products skipped (already exist): {skipped}");
    Ok(())
}
