//! Local catalog product aggregate.
//!
//! Documents are read from BSON and written to JSON responses. Object ids are
//! rendered as 24-character hex strings and timestamps as RFC 3339.

use bson::oid::ObjectId;
use bson::serde_helpers::serialize_object_id_as_hex_string;
use bson::{Bson, Document};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use tattoo_dashboard_core::{Complexity, InternalId, PainLevel};

/// A root product document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id", serialize_with = "serialize_object_id_as_hex_string")]
    pub id: ObjectId,
    pub internal_id: InternalId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
    /// Stored verbatim; see `ProductStatus::from_stored` for interpretation.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub is_unique: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A purchasable variant of a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variant {
    #[serde(rename = "_id", serialize_with = "serialize_object_id_as_hex_string")]
    pub id: ObjectId,
    #[serde(serialize_with = "serialize_object_id_as_hex_string")]
    pub product_id: ObjectId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    /// Kept as stored. The editor sends the raw input text, so this may be a
    /// numeric string; oversold variants go negative.
    #[serde(default)]
    pub inventory_quantity: Option<Bson>,
    #[serde(default)]
    pub sku: Option<String>,
}

/// A product image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    #[serde(rename = "_id", serialize_with = "serialize_object_id_as_hex_string")]
    pub id: ObjectId,
    #[serde(serialize_with = "serialize_object_id_as_hex_string")]
    pub product_id: ObjectId,
    #[serde(default)]
    pub src: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub position: Option<i32>,
}

/// Design details shown to customers choosing a tattoo.
///
/// Values are stored and read back as the editor sent them: a cleared
/// number input arrives as `""` and out-of-range levels are not rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TattooDetails {
    #[serde(default)]
    pub placement_suggestions: Option<Vec<String>>,
    #[serde(default)]
    pub healing_time: Option<String>,
    #[serde(default)]
    pub pain_level: Option<Bson>,
    #[serde(default)]
    pub complexity: Option<String>,
    #[serde(default)]
    pub style_notes: Option<String>,
}

/// Per-product metadata document (one per product).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(rename = "_id", serialize_with = "serialize_object_id_as_hex_string")]
    pub id: ObjectId,
    #[serde(serialize_with = "serialize_object_id_as_hex_string")]
    pub product_id: ObjectId,
    #[serde(default)]
    pub tattoo_details: Option<TattooDetails>,
    #[serde(default)]
    pub artist_notes: Option<String>,
    #[serde(default)]
    pub care_instructions: Option<String>,
}

/// A sale record. Only its existence matters to the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    #[serde(rename = "_id", serialize_with = "serialize_object_id_as_hex_string")]
    pub id: ObjectId,
    #[serde(serialize_with = "serialize_object_id_as_hex_string")]
    pub product_id: ObjectId,
}

/// A product joined with its child documents.
///
/// `sales` is only present on the list form.
#[derive(Debug, Clone, Serialize)]
pub struct ProductAggregate {
    #[serde(flatten)]
    pub product: Product,
    pub variants: Vec<Variant>,
    pub images: Vec<Image>,
    pub metadata: Vec<Metadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales: Option<Vec<Sale>>,
}

impl ProductAggregate {
    /// Split a joined document into the product and its child arrays.
    ///
    /// # Errors
    ///
    /// Returns `bson::de::Error` if any part does not match its schema.
    pub fn from_document(mut document: Document) -> Result<Self, bson::de::Error> {
        let variants = take_array(&mut document, "variants")?.unwrap_or_default();
        let images = take_array(&mut document, "images")?.unwrap_or_default();
        let metadata = take_array(&mut document, "metadata")?.unwrap_or_default();
        let sales = take_array(&mut document, "sales")?;
        let product = bson::from_document(document)?;

        Ok(Self {
            product,
            variants,
            images,
            metadata,
            sales,
        })
    }

    /// Number of joined sale records (zero when sales were not joined).
    #[must_use]
    pub fn sales_count(&self) -> usize {
        self.sales.as_ref().map_or(0, Vec::len)
    }
}

fn take_array<T: DeserializeOwned>(
    document: &mut Document,
    key: &str,
) -> Result<Option<Vec<T>>, bson::de::Error> {
    match document.remove(key) {
        None | Some(Bson::Null) => Ok(None),
        Some(value) => bson::from_bson(value).map(Some),
    }
}

fn deserialize_optional_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bson::DateTime>::deserialize(deserializer)?.map(bson::DateTime::to_chrono))
}

// =============================================================================
// Write payloads
// =============================================================================

/// Full replacement payload for `PUT /api/products/{id}`.
///
/// Missing fields are written as null; there is no partial merge.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub is_unique: Option<bool>,
    #[serde(default)]
    pub variants: Vec<VariantUpdate>,
    #[serde(default)]
    pub metadata: MetadataUpdate,
}

/// A variant change, addressed by the variant's own id.
#[derive(Debug, Clone, Deserialize)]
pub struct VariantUpdate {
    /// Hex object id of the variant.
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    /// Written verbatim, number or text.
    #[serde(default)]
    pub inventory_quantity: Option<Bson>,
}

/// Replacement values for the product's metadata document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetadataUpdate {
    #[serde(default)]
    pub tattoo_details: Option<TattooDetails>,
    #[serde(default)]
    pub artist_notes: Option<String>,
    #[serde(default)]
    pub care_instructions: Option<String>,
}

/// Body of `PATCH /api/products/{id}/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

// =============================================================================
// Seed payloads
// =============================================================================

/// A product aggregate to insert (used by the CLI seeder).
#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    pub internal_id: InternalId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub is_unique: bool,
    #[serde(default)]
    pub variants: Vec<NewVariant>,
    #[serde(default)]
    pub images: Vec<NewImage>,
    #[serde(default)]
    pub metadata: Option<NewMetadata>,
}

/// A variant to insert.
#[derive(Debug, Clone, Deserialize)]
pub struct NewVariant {
    pub title: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub inventory_quantity: i64,
    #[serde(default)]
    pub sku: Option<String>,
}

/// An image to insert.
#[derive(Debug, Clone, Deserialize)]
pub struct NewImage {
    pub src: String,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub position: Option<i32>,
}

/// Metadata to insert. Unlike edits, seeded values are range-checked.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewMetadata {
    #[serde(default)]
    pub tattoo_details: Option<NewTattooDetails>,
    #[serde(default)]
    pub artist_notes: Option<String>,
    #[serde(default)]
    pub care_instructions: Option<String>,
}

/// Typed tattoo details for seeding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTattooDetails {
    #[serde(default)]
    pub placement_suggestions: Vec<String>,
    #[serde(default)]
    pub healing_time: Option<String>,
    #[serde(default)]
    pub pain_level: Option<PainLevel>,
    #[serde(default)]
    pub complexity: Option<Complexity>,
    #[serde(default)]
    pub style_notes: Option<String>,
}

fn default_status() -> String {
    "draft".to_string()
}
