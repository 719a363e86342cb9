//! Status vocabularies.
//!
//! The local catalog and the Shopify mirror use two distinct vocabularies and
//! are kept apart. Status writes are never validated against either: values
//! are stored or forwarded verbatim and only interpreted on read.

use serde::{Deserialize, Serialize};

/// Local catalog product status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    Active,
    Draft,
    Archived,
    Published,
    Unpublished,
}

impl ProductStatus {
    /// Interpret a stored status string, case-insensitively.
    ///
    /// Returns `None` for values outside the known vocabulary.
    #[must_use]
    pub fn from_stored(value: &str) -> Option<Self> {
        value.trim().to_ascii_lowercase().parse().ok()
    }

    /// Whether a product with this status counts as an active design.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Draft => write!(f, "draft"),
            Self::Archived => write!(f, "archived"),
            Self::Published => write!(f, "published"),
            Self::Unpublished => write!(f, "unpublished"),
        }
    }
}

impl std::str::FromStr for ProductStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "draft" => Ok(Self::Draft),
            "archived" => Ok(Self::Archived),
            "published" => Ok(Self::Published),
            "unpublished" => Ok(Self::Unpublished),
            _ => Err(format!("invalid product status: {s}")),
        }
    }
}

/// Shopify product status (`active`, `draft`, `archived`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShopifyStatus {
    Active,
    Draft,
    Archived,
}

impl ShopifyStatus {
    /// Interpret a status string as Shopify would.
    ///
    /// Returns `None` for values Shopify is expected to reject.
    #[must_use]
    pub fn from_received(value: &str) -> Option<Self> {
        value.trim().to_ascii_lowercase().parse().ok()
    }
}

impl std::fmt::Display for ShopifyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Draft => write!(f, "draft"),
            Self::Archived => write!(f, "archived"),
        }
    }
}

impl std::str::FromStr for ShopifyStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "draft" => Ok(Self::Draft),
            "archived" => Ok(Self::Archived),
            _ => Err(format!("invalid shopify status: {s}")),
        }
    }
}
