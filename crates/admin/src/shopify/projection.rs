//! Flattened product view for the stock screens.
//!
//! The first variant and first image are promoted to top-level `variant` and
//! `image` objects with a fixed set of fields. Fields missing from the source
//! become `null`; an empty `variants`/`images` array yields an all-null
//! object. The original arrays are kept as `all_variants`/`all_images`.

use serde::Serialize;
use serde_json::{Map, Value};

use tattoo_dashboard_core::{ShopifyProductId, StockLevel};

use super::ShopifyProduct;

/// Promoted first variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VariantSummary {
    pub id: Value,
    pub product_id: Value,
    pub title: Value,
    pub price: Value,
    /// `null` when absent or empty.
    pub sku: Value,
    pub position: Value,
    pub inventory_policy: Value,
    pub compare_at_price: Value,
    pub inventory_management: Value,
    pub inventory_quantity: Value,
    pub old_inventory_quantity: Value,
    pub requires_shipping: Value,
    pub taxable: Value,
    pub weight: Value,
    pub weight_unit: Value,
    /// `null` when absent or empty.
    pub barcode: Value,
}

/// Promoted first image.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImageSummary {
    pub id: Value,
    pub product_id: Value,
    pub position: Value,
    pub created_at: Value,
    pub updated_at: Value,
    /// `null` when absent or empty.
    pub alt: Value,
    pub width: Value,
    pub height: Value,
    pub src: Value,
    /// `[]` when the image exists but lists no variants.
    pub variant_ids: Value,
    pub admin_graphql_api_id: Value,
}

/// A Shopify product flattened for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatProduct {
    pub id: ShopifyProductId,
    pub title: Option<String>,
    pub body_html: Option<String>,
    pub vendor: Option<String>,
    pub product_type: Option<String>,
    pub created_at: Option<String>,
    pub handle: Option<String>,
    pub updated_at: Option<String>,
    pub published_at: Option<String>,
    pub template_suffix: Option<String>,
    pub published_scope: Option<String>,
    pub tags: Option<String>,
    pub status: Option<String>,
    pub admin_graphql_api_id: Option<String>,
    pub variant: VariantSummary,
    pub image: ImageSummary,
    pub all_variants: Vec<Value>,
    pub all_images: Vec<Value>,
    pub options: Vec<Value>,
    /// Classification of the promoted variant's inventory.
    pub stock_level: StockLevel,
}

impl FlatProduct {
    /// Project a Shopify product. Does not modify the input.
    #[must_use]
    pub fn project(product: &ShopifyProduct) -> Self {
        let variant = VariantSummary::from_source(product.variants.first().and_then(Value::as_object));
        let image = ImageSummary::from_source(product.images.first().and_then(Value::as_object));
        let stock_level = StockLevel::classify(variant.inventory_quantity.as_i64());

        Self {
            id: product.id,
            title: product.title.clone(),
            body_html: product.body_html.clone(),
            vendor: product.vendor.clone(),
            product_type: product.product_type.clone(),
            created_at: product.created_at.clone(),
            handle: product.handle.clone(),
            updated_at: product.updated_at.clone(),
            published_at: product.published_at.clone(),
            template_suffix: product.template_suffix.clone().filter(|s| !s.is_empty()),
            published_scope: product.published_scope.clone(),
            tags: product.tags.clone(),
            status: product.status.clone(),
            admin_graphql_api_id: product.admin_graphql_api_id.clone(),
            variant,
            image,
            all_variants: product.variants.clone(),
            all_images: product.images.clone(),
            options: product.options.clone(),
            stock_level,
        }
    }

    /// Case-insensitive match on title or promoted SKU. An empty query matches.
    #[must_use]
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        let title_hit = self
            .title
            .as_deref()
            .is_some_and(|t| t.to_lowercase().contains(&query));
        let sku_hit = self
            .variant
            .sku
            .as_str()
            .is_some_and(|s| s.to_lowercase().contains(&query));
        title_hit || sku_hit
    }
}

fn field(source: Option<&Map<String, Value>>, key: &str) -> Value {
    source
        .and_then(|s| s.get(key))
        .cloned()
        .unwrap_or(Value::Null)
}

/// Like [`field`] but empty strings also become `null`.
fn non_empty(source: Option<&Map<String, Value>>, key: &str) -> Value {
    match field(source, key) {
        Value::String(s) if s.is_empty() => Value::Null,
        other => other,
    }
}

impl VariantSummary {
    fn from_source(source: Option<&Map<String, Value>>) -> Self {
        Self {
            id: field(source, "id"),
            product_id: field(source, "product_id"),
            title: field(source, "title"),
            price: field(source, "price"),
            sku: non_empty(source, "sku"),
            position: field(source, "position"),
            inventory_policy: field(source, "inventory_policy"),
            compare_at_price: field(source, "compare_at_price"),
            inventory_management: field(source, "inventory_management"),
            inventory_quantity: field(source, "inventory_quantity"),
            old_inventory_quantity: field(source, "old_inventory_quantity"),
            requires_shipping: field(source, "requires_shipping"),
            taxable: field(source, "taxable"),
            weight: field(source, "weight"),
            weight_unit: field(source, "weight_unit"),
            barcode: non_empty(source, "barcode"),
        }
    }
}

impl ImageSummary {
    fn from_source(source: Option<&Map<String, Value>>) -> Self {
        let variant_ids = match (source, field(source, "variant_ids")) {
            (Some(_), Value::Null) => Value::Array(Vec::new()),
            (_, ids) => ids,
        };

        Self {
            id: field(source, "id"),
            product_id: field(source, "product_id"),
            position: field(source, "position"),
            created_at: field(source, "created_at"),
            updated_at: field(source, "updated_at"),
            alt: non_empty(source, "alt"),
            width: field(source, "width"),
            height: field(source, "height"),
            src: field(source, "src"),
            variant_ids,
            admin_graphql_api_id: field(source, "admin_graphql_api_id"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn shopify_product(value: Value) -> ShopifyProduct {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_empty_arrays_project_to_null_objects() {
        let product = shopify_product(json!({
            "id": 1,
            "title": "Blank",
            "variants": [],
            "images": [],
        }));

        let flat = FlatProduct::project(&product);

        assert_eq!(flat.variant, VariantSummary::default());
        assert_eq!(flat.image, ImageSummary::default());
        assert!(flat.all_variants.is_empty());
        assert!(flat.all_images.is_empty());
        assert_eq!(flat.stock_level, StockLevel::OutOfStock);

        let json = serde_json::to_value(&flat).unwrap();
        let variant = json["variant"].as_object().unwrap();
        assert_eq!(variant.len(), 16);
        assert!(variant.values().all(Value::is_null));
        let image = json["image"].as_object().unwrap();
        assert_eq!(image.len(), 11);
        assert!(image.values().all(Value::is_null));
        assert_eq!(json["all_variants"], json!([]));
    }

    #[test]
    fn test_promotes_first_variant_and_image() {
        let product = shopify_product(json!({
            "id": 2,
            "title": "Serpent",
            "template_suffix": "",
            "variants": [
                { "id": 11, "product_id": 2, "title": "A5", "price": "40.00", "sku": "SERP-A5", "inventory_quantity": 3, "barcode": "" },
                { "id": 12, "product_id": 2, "title": "A4", "price": "55.00", "sku": "SERP-A4", "inventory_quantity": 9 },
            ],
            "images": [
                { "id": 21, "product_id": 2, "src": "https://cdn/serpent.png", "alt": "", "width": 800 },
            ],
            "options": [{ "name": "Size", "values": ["A5", "A4"] }],
        }));

        let flat = FlatProduct::project(&product);

        assert_eq!(flat.variant.id, json!(11));
        assert_eq!(flat.variant.price, json!("40.00"));
        assert_eq!(flat.variant.sku, json!("SERP-A5"));
        assert_eq!(flat.variant.barcode, Value::Null);
        assert_eq!(flat.variant.weight, Value::Null);
        assert_eq!(flat.image.src, json!("https://cdn/serpent.png"));
        assert_eq!(flat.image.alt, Value::Null);
        assert_eq!(flat.image.variant_ids, json!([]));
        assert_eq!(flat.template_suffix, None);
        assert_eq!(flat.all_variants.len(), 2);
        assert_eq!(flat.options.len(), 1);
        assert_eq!(flat.stock_level, StockLevel::Low);
    }

    #[test]
    fn test_projection_does_not_modify_input() {
        let product = shopify_product(json!({
            "id": 3,
            "variants": [{ "id": 31, "sku": "" }],
            "images": [{ "id": 41 }],
        }));
        let before = product.clone();

        let _ = FlatProduct::project(&product);

        assert_eq!(product, before);
    }

    #[test]
    fn test_matches_query_on_title_or_sku() {
        let flat = FlatProduct::project(&shopify_product(json!({
            "id": 4,
            "title": "Dragon Back Piece",
            "variants": [{ "sku": "DRG-XL" }],
        })));

        assert!(flat.matches_query("dragon"));
        assert!(flat.matches_query("drg-xl"));
        assert!(flat.matches_query("  "));
        assert!(!flat.matches_query("phoenix"));
    }
}
