//! Shopify REST product resources.
//!
//! Only the top-level product fields are typed. Variants, images, and
//! options are kept as raw JSON so the mirror can hand them back untouched.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use tattoo_dashboard_core::ShopifyProductId;

/// A product as returned by `products.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopifyProduct {
    pub id: ShopifyProductId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body_html: Option<String>,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub product_type: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub template_suffix: Option<String>,
    #[serde(default)]
    pub published_scope: Option<String>,
    /// Comma-separated tag list.
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub admin_graphql_api_id: Option<String>,
    #[serde(default)]
    pub variants: Vec<Value>,
    #[serde(default)]
    pub images: Vec<Value>,
    #[serde(default)]
    pub options: Vec<Value>,
}

/// Body of `GET products.json`.
#[derive(Debug, Deserialize)]
pub(crate) struct ProductsEnvelope {
    pub products: Option<Vec<ShopifyProduct>>,
}

/// Body of `PUT products/{id}.json`. The product is kept as raw JSON so it
/// can be relayed without dropping fields.
#[derive(Debug, Deserialize)]
pub(crate) struct ProductEnvelope {
    pub product: Option<Value>,
}

/// Body of `PUT products/{id}.json` for a status change.
#[derive(Debug, Serialize)]
pub(crate) struct StatusChange<'a> {
    pub product: StatusChangeFields<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct StatusChangeFields<'a> {
    pub id: ShopifyProductId,
    pub status: &'a str,
}
