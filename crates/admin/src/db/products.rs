//! Product aggregate repository.
//!
//! Reads join the four child collections onto `products` with `$lookup`.
//! Multi-collection writes (update, delete, seed insert) run inside one
//! transaction each; the status patch is a single-document update.

use bson::oid::ObjectId;
use bson::{Bson, Document, doc};
use futures::TryStreamExt;
use mongodb::ClientSession;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use tracing::instrument;

use tattoo_dashboard_core::InternalId;

use super::{IMAGES, METADATA, PRODUCTS, RepositoryError, SALES, Store, VARIANTS};
use crate::models::{MetadataUpdate, NewProduct, ProductAggregate, ProductUpdate, VariantUpdate};

/// Number of documents removed from each collection by a delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeletedProduct {
    pub variants: u64,
    pub images: u64,
    pub metadata: u64,
    pub sales: u64,
}

// =============================================================================
// Pipeline and update builders
// =============================================================================

/// One-to-many outer join of `from` on `product_id == products._id`.
///
/// The joined array is named after the collection.
fn lookup(from: &str) -> Document {
    doc! {
        "$lookup": {
            "from": from,
            "localField": "_id",
            "foreignField": "product_id",
            "as": from,
        }
    }
}

/// Single product with variants, images, and metadata.
fn detail_pipeline(id: &InternalId) -> Vec<Document> {
    vec![
        doc! { "$match": { "internal_id": id.as_str() } },
        doc! { "$limit": 1 },
        lookup(VARIANTS),
        lookup(IMAGES),
        lookup(METADATA),
    ]
}

/// Every product with all four child collections, unfiltered.
fn list_pipeline() -> Vec<Document> {
    vec![
        lookup(VARIANTS),
        lookup(IMAGES),
        lookup(METADATA),
        lookup(SALES),
    ]
}

fn decimal_to_bson(value: Option<Decimal>) -> Bson {
    value
        .and_then(|d| d.to_f64())
        .map_or(Bson::Null, Bson::Double)
}

/// `$set` for the scalar product fields. Absent fields are written as null.
fn product_set(update: &ProductUpdate, now: bson::DateTime) -> Document {
    doc! {
        "$set": {
            "title": update.title.clone(),
            "description": update.description.clone(),
            "category": update.category.clone(),
            "style": update.style.clone(),
            "status": update.status.clone(),
            "is_unique": update.is_unique,
            "updated_at": now,
        }
    }
}

fn variant_set(update: &VariantUpdate, now: bson::DateTime) -> Document {
    doc! {
        "$set": {
            "title": update.title.clone(),
            "price": decimal_to_bson(update.price),
            "inventory_quantity": update.inventory_quantity.clone(),
            "updated_at": now,
        }
    }
}

fn metadata_set(update: &MetadataUpdate, now: bson::DateTime) -> Result<Document, RepositoryError> {
    Ok(doc! {
        "$set": {
            "tattoo_details": bson::to_bson(&update.tattoo_details)?,
            "artist_notes": update.artist_notes.clone(),
            "care_instructions": update.care_instructions.clone(),
            "updated_at": now,
        }
    })
}

/// Parse every variant id up front so a malformed id rejects the whole
/// update before anything is written.
fn parse_variant_ids(
    variants: &[VariantUpdate],
) -> Result<Vec<(ObjectId, &VariantUpdate)>, RepositoryError> {
    variants
        .iter()
        .map(|variant| {
            ObjectId::parse_str(&variant.id)
                .map(|oid| (oid, variant))
                .map_err(|_| {
                    RepositoryError::InvalidInput(format!("invalid variant id: {}", variant.id))
                })
        })
        .collect()
}

fn new_product_documents(
    product: &NewProduct,
    product_id: ObjectId,
    now: bson::DateTime,
) -> Result<(Document, Vec<Document>, Vec<Document>, Document), RepositoryError> {
    let root = doc! {
        "_id": product_id,
        "internal_id": product.internal_id.as_str(),
        "title": product.title.as_str(),
        "description": product.description.clone(),
        "category": product.category.clone(),
        "style": product.style.clone(),
        "status": product.status.as_str(),
        "is_unique": product.is_unique,
        "created_at": now,
        "updated_at": now,
    };

    let variants = product
        .variants
        .iter()
        .map(|variant| {
            doc! {
                "product_id": product_id,
                "title": variant.title.as_str(),
                "price": decimal_to_bson(Some(variant.price)),
                "inventory_quantity": variant.inventory_quantity,
                "sku": variant.sku.clone(),
                "created_at": now,
                "updated_at": now,
            }
        })
        .collect();

    let images = product
        .images
        .iter()
        .map(|image| {
            doc! {
                "product_id": product_id,
                "src": image.src.as_str(),
                "alt": image.alt.clone(),
                "position": image.position,
            }
        })
        .collect();

    let metadata = product.metadata.clone().unwrap_or_default();
    let metadata = doc! {
        "product_id": product_id,
        "tattoo_details": bson::to_bson(&metadata.tattoo_details)?,
        "artist_notes": metadata.artist_notes,
        "care_instructions": metadata.care_instructions,
        "created_at": now,
        "updated_at": now,
    };

    Ok((root, variants, images, metadata))
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for product aggregate operations.
pub struct ProductRepository<'a> {
    store: &'a Store,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Get a product aggregate by internal id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the aggregation fails.
    /// Returns `RepositoryError::DataCorruption` if a document does not match its schema.
    #[instrument(skip(self), fields(internal_id = %id))]
    pub async fn get(&self, id: &InternalId) -> Result<Option<ProductAggregate>, RepositoryError> {
        let mut cursor = self
            .store
            .collection(PRODUCTS)
            .aggregate(detail_pipeline(id))
            .await?;

        match cursor.try_next().await? {
            Some(document) => Ok(Some(ProductAggregate::from_document(document)?)),
            None => Ok(None),
        }
    }

    /// List every product aggregate, including joined sales.
    ///
    /// Unpaginated: the whole catalog is materialized.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the aggregation fails.
    /// Returns `RepositoryError::DataCorruption` if a document does not match its schema.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<ProductAggregate>, RepositoryError> {
        let documents: Vec<Document> = self
            .store
            .collection(PRODUCTS)
            .aggregate(list_pipeline())
            .await?
            .try_collect()
            .await?;

        tracing::debug!(count = documents.len(), "Loaded product aggregates");

        documents
            .into_iter()
            .map(|document| ProductAggregate::from_document(document).map_err(Into::into))
            .collect()
    }

    /// Replace a product's scalar fields, the listed variants, and its
    /// metadata, then return the refreshed aggregate.
    ///
    /// All writes share one transaction. Fields absent from the payload are
    /// written as null. Variant ids that match nothing are ignored.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidInput` if a variant id is malformed (nothing is written).
    /// Returns `RepositoryError::NotFound` if no product has this internal id.
    /// Returns `RepositoryError::Database` if any write or the commit fails.
    #[instrument(skip(self, update), fields(internal_id = %id, variants = update.variants.len()))]
    pub async fn update(
        &self,
        id: &InternalId,
        update: &ProductUpdate,
    ) -> Result<ProductAggregate, RepositoryError> {
        let variants = parse_variant_ids(&update.variants)?;
        let now = bson::DateTime::now();
        let product_set = product_set(update, now);
        let metadata_set = metadata_set(&update.metadata, now)?;

        let mut session = self.store.client().start_session().await?;
        session.start_transaction().await?;
        let outcome = self
            .update_within(&mut session, id, &product_set, &variants, &metadata_set, now)
            .await;
        Store::finish_transaction(session, outcome).await?;

        self.get(id).await?.ok_or(RepositoryError::NotFound)
    }

    async fn update_within(
        &self,
        session: &mut ClientSession,
        id: &InternalId,
        product_set: &Document,
        variants: &[(ObjectId, &VariantUpdate)],
        metadata_set: &Document,
        now: bson::DateTime,
    ) -> Result<(), RepositoryError> {
        let product_id = self
            .resolve_object_id(session, id)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        self.store
            .collection(PRODUCTS)
            .update_one(doc! { "_id": product_id }, product_set.clone())
            .session(&mut *session)
            .await?;

        let variant_collection = self.store.collection(VARIANTS);
        for (variant_id, variant) in variants {
            let result = variant_collection
                .update_one(doc! { "_id": *variant_id }, variant_set(variant, now))
                .session(&mut *session)
                .await?;
            if result.matched_count == 0 {
                tracing::debug!(variant_id = %variant_id, "Variant not found, skipped");
            }
        }

        self.store
            .collection(METADATA)
            .update_one(doc! { "product_id": product_id }, metadata_set.clone())
            .session(&mut *session)
            .await?;

        Ok(())
    }

    /// Delete a product and every child document referencing it.
    ///
    /// The four child deletes and the product delete share one transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product has this internal id
    /// (nothing is deleted).
    /// Returns `RepositoryError::Database` if any delete or the commit fails
    /// (nothing is deleted).
    #[instrument(skip(self), fields(internal_id = %id))]
    pub async fn delete(&self, id: &InternalId) -> Result<DeletedProduct, RepositoryError> {
        let mut session = self.store.client().start_session().await?;
        session.start_transaction().await?;
        let outcome = self.delete_within(&mut session, id).await;
        let deleted = Store::finish_transaction(session, outcome).await?;

        tracing::info!(
            variants = deleted.variants,
            images = deleted.images,
            metadata = deleted.metadata,
            sales = deleted.sales,
            "Product deleted"
        );
        Ok(deleted)
    }

    async fn delete_within(
        &self,
        session: &mut ClientSession,
        id: &InternalId,
    ) -> Result<DeletedProduct, RepositoryError> {
        let product_id = self
            .resolve_object_id(session, id)
            .await?
            .ok_or(RepositoryError::NotFound)?;
        let filter = doc! { "product_id": product_id };

        let mut deleted = DeletedProduct::default();
        for (name, count) in [
            (VARIANTS, &mut deleted.variants),
            (IMAGES, &mut deleted.images),
            (METADATA, &mut deleted.metadata),
            (SALES, &mut deleted.sales),
        ] {
            *count = self
                .store
                .collection(name)
                .delete_many(filter.clone())
                .session(&mut *session)
                .await?
                .deleted_count;
        }

        self.store
            .collection(PRODUCTS)
            .delete_one(doc! { "_id": product_id })
            .session(&mut *session)
            .await?;

        Ok(deleted)
    }

    /// Set a product's status verbatim (no vocabulary check).
    ///
    /// Only `status` and `updated_at` are touched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product has this internal id.
    /// Returns `RepositoryError::Database` if the update fails.
    #[instrument(skip(self), fields(internal_id = %id))]
    pub async fn update_status(&self, id: &InternalId, status: &str) -> Result<(), RepositoryError> {
        let result = self
            .store
            .collection(PRODUCTS)
            .update_one(
                doc! { "internal_id": id.as_str() },
                doc! { "$set": { "status": status, "updated_at": bson::DateTime::now() } },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Insert a product aggregate in one transaction.
    ///
    /// Returns `None` without writing if the internal id is already taken.
    /// A metadata document is always created so the product has exactly one.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Encoding` if the metadata cannot be encoded.
    /// Returns `RepositoryError::Database` if any insert or the commit fails.
    #[instrument(skip(self, product), fields(internal_id = %product.internal_id))]
    pub async fn insert_aggregate(
        &self,
        product: &NewProduct,
    ) -> Result<Option<ObjectId>, RepositoryError> {
        let product_id = ObjectId::new();
        let documents = new_product_documents(product, product_id, bson::DateTime::now())?;

        let mut session = self.store.client().start_session().await?;
        session.start_transaction().await?;
        let outcome = self
            .insert_within(&mut session, &product.internal_id, documents)
            .await
            .map(|inserted| inserted.then_some(product_id));
        Store::finish_transaction(session, outcome).await
    }

    async fn insert_within(
        &self,
        session: &mut ClientSession,
        id: &InternalId,
        (root, variants, images, metadata): (Document, Vec<Document>, Vec<Document>, Document),
    ) -> Result<bool, RepositoryError> {
        if self.resolve_object_id(session, id).await?.is_some() {
            return Ok(false);
        }

        self.store
            .collection(PRODUCTS)
            .insert_one(root)
            .session(&mut *session)
            .await?;
        for (name, documents) in [(VARIANTS, variants), (IMAGES, images)] {
            if !documents.is_empty() {
                self.store
                    .collection(name)
                    .insert_many(documents)
                    .session(&mut *session)
                    .await?;
            }
        }
        self.store
            .collection(METADATA)
            .insert_one(metadata)
            .session(&mut *session)
            .await?;

        Ok(true)
    }

    /// Resolve an internal id to the product's database id.
    async fn resolve_object_id(
        &self,
        session: &mut ClientSession,
        id: &InternalId,
    ) -> Result<Option<ObjectId>, RepositoryError> {
        let found = self
            .store
            .collection(PRODUCTS)
            .find_one(doc! { "internal_id": id.as_str() })
            .projection(doc! { "_id": 1 })
            .session(&mut *session)
            .await?;

        found
            .map(|document| {
                document
                    .get_object_id("_id")
                    .map_err(|e| RepositoryError::DataCorruption(format!("product _id: {e}")))
            })
            .transpose()
    }
}
