//! Catalog repository behaviour against a real `MongoDB`.
//!
//! These tests require a replica set (multi-document transactions), e.g.
//! `docker run -p 27017:27017 mongo:7 --replSet rs0` followed by
//! `rs.initiate()`. Point `MONGODB_URI` at it and run with `--ignored`.

#![allow(clippy::unwrap_used)]

use bson::{Bson, Document, doc};
use rust_decimal::Decimal;
use serde_json::json;

use tattoo_dashboard_admin::db::{
    IMAGES, METADATA, PRODUCTS, ProductRepository, RepositoryError, SALES, VARIANTS,
};
use tattoo_dashboard_admin::models::ProductUpdate;
use tattoo_dashboard_admin::services::DashboardStats;
use tattoo_dashboard_core::InternalId;
use tattoo_dashboard_integration_tests::{TestCatalog, new_product};

fn id(raw: &str) -> InternalId {
    InternalId::parse(raw).unwrap()
}

async fn seed_koi(repo: &ProductRepository<'_>) -> bson::oid::ObjectId {
    repo.insert_aggregate(&new_product(json!({
        "internal_id": "TAT-KOI",
        "title": "Koi Sleeve",
        "description": "Koi in waves",
        "category": "sleeve",
        "style": "japanese",
        "status": "active",
        "variants": [
            { "title": "Half", "price": 320.0, "inventory_quantity": 4, "sku": "KOI-HALF" },
            { "title": "Full", "price": 450.0, "inventory_quantity": 2, "sku": "KOI-FULL" },
        ],
        "images": [{ "src": "https://cdn/koi.png", "position": 1 }],
        "metadata": {
            "tattoo_details": { "pain_level": 6, "complexity": "high" },
            "artist_notes": "Two sessions",
        },
    })))
    .await
    .unwrap()
    .unwrap()
}

async fn counts(catalog: &TestCatalog) -> [u64; 5] {
    let mut out = [0; 5];
    for (slot, name) in out
        .iter_mut()
        .zip([PRODUCTS, VARIANTS, IMAGES, METADATA, SALES])
    {
        *slot = catalog
            .store
            .collection(name)
            .count_documents(doc! {})
            .await
            .unwrap();
    }
    out
}

async fn raw_product(catalog: &TestCatalog, internal_id: &str) -> Document {
    catalog
        .store
        .collection(PRODUCTS)
        .find_one(doc! { "internal_id": internal_id })
        .await
        .unwrap()
        .unwrap()
}

#[tokio::test]
#[ignore = "Requires MongoDB replica set (MONGODB_URI)"]
async fn test_detail_joins_children_without_sales() {
    let catalog = TestCatalog::new().await;
    let repo = ProductRepository::new(&catalog.store);
    let product_id = seed_koi(&repo).await;

    let aggregate = repo.get(&id("TAT-KOI")).await.unwrap().unwrap();

    assert_eq!(aggregate.product.id, product_id);
    assert_eq!(aggregate.variants.len(), 2);
    assert_eq!(aggregate.images.len(), 1);
    assert_eq!(aggregate.metadata.len(), 1);
    assert!(aggregate.sales.is_none());
    assert!(repo.get(&id("TAT-NONE")).await.unwrap().is_none());

    catalog.cleanup().await;
}

#[tokio::test]
#[ignore = "Requires MongoDB replica set (MONGODB_URI)"]
async fn test_list_includes_sales() {
    let catalog = TestCatalog::new().await;
    let repo = ProductRepository::new(&catalog.store);
    let product_id = seed_koi(&repo).await;
    catalog
        .store
        .collection(SALES)
        .insert_many([
            doc! { "product_id": product_id, "amount": 320.0 },
            doc! { "product_id": product_id, "amount": 450.0 },
        ])
        .await
        .unwrap();

    let all = repo.list_all().await.unwrap();

    assert_eq!(all.len(), 1);
    assert_eq!(all[0].sales_count(), 2);

    let stats = DashboardStats::load(&catalog.store).await.unwrap();
    assert_eq!(stats.total_products, 1);
    assert_eq!(stats.active_products, 1);
    assert_eq!(stats.total_sales, 2);
    assert_eq!(stats.average_price, Decimal::new(38500, 2));

    catalog.cleanup().await;
}

#[tokio::test]
#[ignore = "Requires MongoDB replica set (MONGODB_URI)"]
async fn test_update_writes_present_fields_and_nulls_absent_ones() {
    let catalog = TestCatalog::new().await;
    let repo = ProductRepository::new(&catalog.store);
    seed_koi(&repo).await;
    let before = repo.get(&id("TAT-KOI")).await.unwrap().unwrap();
    let variant = &before.variants[0];

    let update: ProductUpdate = serde_json::from_value(json!({
        "title": "Koi Sleeve (revised)",
        "status": "draft",
        "variants": [
            { "_id": variant.id.to_hex(), "title": "Half", "price": 299.5, "inventory_quantity": 1 },
            { "_id": bson::oid::ObjectId::new().to_hex(), "price": 1.0 },
        ],
        "metadata": { "care_instructions": "Moisturise daily" },
    }))
    .unwrap();

    let after = repo.update(&id("TAT-KOI"), &update).await.unwrap();

    assert_eq!(after.product.title.as_deref(), Some("Koi Sleeve (revised)"));
    assert_eq!(after.product.status.as_deref(), Some("draft"));
    assert_eq!(after.product.description, None);
    assert_eq!(after.product.category, None);

    let updated = after.variants.iter().find(|v| v.id == variant.id).unwrap();
    assert_eq!(updated.price, Some(Decimal::new(2995, 1)));
    assert_eq!(updated.inventory_quantity, Some(Bson::Int64(1)));
    assert_eq!(updated.sku.as_deref(), Some("KOI-HALF"));
    assert_eq!(after.variants.len(), 2);

    let metadata = &after.metadata[0];
    assert_eq!(metadata.care_instructions.as_deref(), Some("Moisturise daily"));
    assert_eq!(metadata.artist_notes, None);
    assert_eq!(metadata.tattoo_details, None);

    catalog.cleanup().await;
}

#[tokio::test]
#[ignore = "Requires MongoDB replica set (MONGODB_URI)"]
async fn test_update_keeps_editor_values_readable() {
    let catalog = TestCatalog::new().await;
    let repo = ProductRepository::new(&catalog.store);
    seed_koi(&repo).await;
    let before = repo.get(&id("TAT-KOI")).await.unwrap().unwrap();

    let update: ProductUpdate = serde_json::from_value(json!({
        "title": "Koi Sleeve",
        "variants": [{ "_id": before.variants[0].id.to_hex(), "price": 320.0, "inventory_quantity": "7" }],
        "metadata": { "tattoo_details": { "pain_level": "", "complexity": "Extreme" } },
    }))
    .unwrap();
    repo.update(&id("TAT-KOI"), &update).await.unwrap();

    let all = repo.list_all().await.unwrap();
    let variant = all[0].variants.iter().find(|v| v.id == before.variants[0].id).unwrap();
    assert_eq!(variant.inventory_quantity, Some(Bson::String("7".to_string())));
    let details = all[0].metadata[0].tattoo_details.as_ref().unwrap();
    assert_eq!(details.pain_level, Some(Bson::String(String::new())));
    assert_eq!(details.complexity.as_deref(), Some("Extreme"));
    assert_eq!(DashboardStats::load(&catalog.store).await.unwrap().total_products, 1);

    catalog.cleanup().await;
}

#[tokio::test]
#[ignore = "Requires MongoDB replica set (MONGODB_URI)"]
async fn test_update_rolls_back_when_a_write_fails() {
    let catalog = TestCatalog::new().await;
    let repo = ProductRepository::new(&catalog.store);
    seed_koi(&repo).await;
    let before = repo.get(&id("TAT-KOI")).await.unwrap().unwrap();
    let raw_before = raw_product(&catalog, "TAT-KOI").await;

    // Metadata is written last; rejecting a null `artist_notes` fails it
    // after the product and variant writes succeeded.
    catalog
        .store
        .database()
        .run_command(doc! {
            "collMod": METADATA,
            "validator": { "artist_notes": { "$type": "string" } },
            "validationAction": "error",
        })
        .await
        .unwrap();

    let update: ProductUpdate = serde_json::from_value(json!({
        "title": "Never saved",
        "variants": [{ "_id": before.variants[0].id.to_hex(), "price": 1.0 }],
    }))
    .unwrap();
    let err = repo.update(&id("TAT-KOI"), &update).await.unwrap_err();

    assert!(matches!(err, RepositoryError::Database(_)));
    assert_eq!(raw_product(&catalog, "TAT-KOI").await, raw_before);
    let after = repo.get(&id("TAT-KOI")).await.unwrap().unwrap();
    assert_eq!(after.variants[0].price, before.variants[0].price);
    assert_eq!(after.metadata[0].artist_notes.as_deref(), Some("Two sessions"));

    catalog.cleanup().await;
}

#[tokio::test]
#[ignore = "Requires MongoDB replica set started with enableTestCommands=1 (MONGODB_URI)"]
async fn test_delete_rolls_back_when_a_step_fails() {
    const APP_NAME: &str = "catalog-delete-rollback";
    let catalog = TestCatalog::with_app_name(APP_NAME).await;
    let repo = ProductRepository::new(&catalog.store);
    let koi = seed_koi(&repo).await;
    catalog
        .store
        .collection(SALES)
        .insert_one(doc! { "product_id": koi })
        .await
        .unwrap();
    let before = counts(&catalog).await;
    let raw_before = raw_product(&catalog, "TAT-KOI").await;

    // Variants and images are removed, then the metadata delete fails.
    catalog.fail_commands(&["delete"], APP_NAME, 2).await;
    let outcome = repo.delete(&id("TAT-KOI")).await;
    catalog.clear_fail_point().await;

    assert!(matches!(outcome, Err(RepositoryError::Database(_))));
    assert_eq!(counts(&catalog).await, before);
    assert_eq!(raw_product(&catalog, "TAT-KOI").await, raw_before);

    catalog.cleanup().await;
}

#[tokio::test]
#[ignore = "Requires MongoDB replica set (MONGODB_URI)"]
async fn test_update_unknown_product_writes_nothing() {
    let catalog = TestCatalog::new().await;
    let repo = ProductRepository::new(&catalog.store);
    seed_koi(&repo).await;
    let before = raw_product(&catalog, "TAT-KOI").await;

    let update: ProductUpdate = serde_json::from_value(json!({ "title": "Ghost" })).unwrap();
    let err = repo.update(&id("TAT-GHOST"), &update).await.unwrap_err();

    assert!(matches!(err, RepositoryError::NotFound));
    assert_eq!(raw_product(&catalog, "TAT-KOI").await, before);

    catalog.cleanup().await;
}

#[tokio::test]
#[ignore = "Requires MongoDB replica set (MONGODB_URI)"]
async fn test_delete_unknown_product_mutates_nothing() {
    let catalog = TestCatalog::new().await;
    let repo = ProductRepository::new(&catalog.store);
    seed_koi(&repo).await;
    let before = counts(&catalog).await;

    let err = repo.delete(&id("TAT-GHOST")).await.unwrap_err();

    assert!(matches!(err, RepositoryError::NotFound));
    assert_eq!(counts(&catalog).await, before);

    catalog.cleanup().await;
}

#[tokio::test]
#[ignore = "Requires MongoDB replica set (MONGODB_URI)"]
async fn test_delete_removes_product_and_children_only() {
    let catalog = TestCatalog::new().await;
    let repo = ProductRepository::new(&catalog.store);
    let koi = seed_koi(&repo).await;
    repo.insert_aggregate(&new_product(json!({
        "internal_id": "TAT-SWALLOW",
        "title": "Swallow",
        "variants": [{ "title": "Standard", "price": 90.0 }],
    })))
    .await
    .unwrap()
    .unwrap();
    catalog
        .store
        .collection(SALES)
        .insert_one(doc! { "product_id": koi })
        .await
        .unwrap();

    let deleted = repo.delete(&id("TAT-KOI")).await.unwrap();

    assert_eq!(deleted.variants, 2);
    assert_eq!(deleted.images, 1);
    assert_eq!(deleted.metadata, 1);
    assert_eq!(deleted.sales, 1);
    assert_eq!(counts(&catalog).await, [1, 1, 0, 1, 0]);
    assert!(repo.get(&id("TAT-SWALLOW")).await.unwrap().is_some());

    catalog.cleanup().await;
}

#[tokio::test]
#[ignore = "Requires MongoDB replica set (MONGODB_URI)"]
async fn test_status_patch_touches_only_status_and_timestamp() {
    let catalog = TestCatalog::new().await;
    let repo = ProductRepository::new(&catalog.store);
    seed_koi(&repo).await;
    let mut before = raw_product(&catalog, "TAT-KOI").await;

    repo.update_status(&id("TAT-KOI"), "published").await.unwrap();

    let mut after = raw_product(&catalog, "TAT-KOI").await;
    assert_eq!(after.get_str("status").unwrap(), "published");
    for key in ["status", "updated_at"] {
        before.remove(key);
        after.remove(key);
    }
    assert_eq!(after, before);

    let err = repo.update_status(&id("TAT-GHOST"), "draft").await.unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound));

    catalog.cleanup().await;
}

#[tokio::test]
#[ignore = "Requires MongoDB replica set (MONGODB_URI)"]
async fn test_insert_skips_existing_internal_id() {
    let catalog = TestCatalog::new().await;
    let repo = ProductRepository::new(&catalog.store);
    seed_koi(&repo).await;
    let before = counts(&catalog).await;

    let again = repo
        .insert_aggregate(&new_product(json!({ "internal_id": "TAT-KOI", "title": "Dup" })))
        .await
        .unwrap();

    assert!(again.is_none());
    assert_eq!(counts(&catalog).await, before);

    catalog.cleanup().await;
}
