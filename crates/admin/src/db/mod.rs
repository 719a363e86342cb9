//! Database operations for the local catalog (`MongoDB`).
//!
//! # Collections
//!
//! - `products` - Root product documents, keyed externally by `internal_id`
//! - `variants` - Purchasable variants (`product_id` -> `products._id`)
//! - `images` - Product images (`product_id` -> `products._id`)
//! - `metadata` - Tattoo metadata, one per product (`product_id` -> `products._id`)
//! - `sales` - Sale records, only counted (`product_id` -> `products._id`)
//!
//! `internal_id` and `_id` are different keys: reads match on `internal_id`,
//! joins and child deletes use `_id`.
//!
//! # Indexes
//!
//! Indexes are NOT created automatically on startup. Create them via:
//! ```bash
//! cargo run -p tattoo-dashboard-cli -- indexes
//! ```

pub mod products;

use bson::{Document, doc};
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, ClientSession, Collection, Database, IndexModel};
use secrecy::ExposeSecret;
use thiserror::Error;
use tracing::instrument;

use crate::config::MongoConfig;

pub use products::{DeletedProduct, ProductRepository};

/// Root product collection.
pub const PRODUCTS: &str = "products";
/// Variant collection.
pub const VARIANTS: &str = "variants";
/// Image collection.
pub const IMAGES: &str = "images";
/// Tattoo metadata collection.
pub const METADATA: &str = "metadata";
/// Sale collection.
pub const SALES: &str = "sales";

/// Every collection that references a product through `product_id`.
pub const CHILD_COLLECTIONS: [&str; 4] = [VARIANTS, IMAGES, METADATA, SALES];

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Driver error from `MongoDB` (network, command, transaction).
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// A value could not be encoded as BSON.
    #[error("encoding error: {0}")]
    Encoding(#[from] bson::ser::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Caller-supplied data was rejected before any write.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,
}

impl From<bson::de::Error> for RepositoryError {
    fn from(err: bson::de::Error) -> Self {
        Self::DataCorruption(err.to_string())
    }
}

/// Process-wide handle to the catalog database.
///
/// Wraps the driver `Client`, which owns the connection pool. Cloning is cheap
/// and every clone shares the same pool.
#[derive(Debug, Clone)]
pub struct Store {
    client: Client,
    database: Database,
}

impl Store {
    /// Build the client and select the catalog database.
    ///
    /// No connection is opened until the first operation. An `appName` in the
    /// connection string takes precedence over the package name.
    ///
    /// # Errors
    ///
    /// Returns `mongodb::error::Error` if the connection string is invalid.
    pub async fn connect(config: &MongoConfig) -> Result<Self, mongodb::error::Error> {
        let mut options = ClientOptions::parse(config.uri.expose_secret()).await?;
        if options.app_name.is_none() {
            options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        }
        options.max_pool_size = Some(10);
        options.min_pool_size = Some(2);

        let client = Client::with_options(options)?;
        let database = client.database(&config.database);

        Ok(Self { client, database })
    }

    /// The driver client (used to start sessions).
    #[must_use]
    pub const fn client(&self) -> &Client {
        &self.client
    }

    /// The catalog database.
    #[must_use]
    pub const fn database(&self) -> &Database {
        &self.database
    }

    /// An untyped handle to one of the catalog collections.
    #[must_use]
    pub fn collection(&self, name: &str) -> Collection<Document> {
        self.database.collection(name)
    }

    /// Round-trip a `ping` to the server.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the server is unreachable.
    pub async fn ping(&self) -> Result<(), RepositoryError> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    /// Create the lookup indexes the catalog relies on.
    ///
    /// `internal_id` is unique on products; every child collection gets a
    /// `product_id` index for the fan-out join.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if index creation fails.
    #[instrument(skip(self))]
    pub async fn create_indexes(&self) -> Result<(), RepositoryError> {
        let unique = IndexOptions::builder().unique(true).build();
        self.collection(PRODUCTS)
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "internal_id": 1 })
                    .options(unique)
                    .build(),
            )
            .await?;

        for name in CHILD_COLLECTIONS {
            self.collection(name)
                .create_index(IndexModel::builder().keys(doc! { "product_id": 1 }).build())
                .await?;
            tracing::debug!(collection = name, "Index ensured");
        }

        Ok(())
    }

    /// Commit the transaction on `session` if `outcome` is `Ok`, abort otherwise.
    ///
    /// Consumes the session so it is released on both paths.
    async fn finish_transaction<T>(
        mut session: ClientSession,
        outcome: Result<T, RepositoryError>,
    ) -> Result<T, RepositoryError> {
        match outcome {
            Ok(value) => {
                session.commit_transaction().await?;
                Ok(value)
            }
            Err(err) => {
                if let Err(abort_err) = session.abort_transaction().await {
                    tracing::warn!(error = %abort_err, "Failed to abort transaction");
                }
                Err(err)
            }
        }
    }
}
