//! Identifier types.
//!
//! Two families of identifiers exist side by side:
//!
//! - [`InternalId`] is the externally stable product key used by the local
//!   catalog. It is NOT the database-generated document id.
//! - Shopify numeric ids, defined with [`define_id!`], identify records in the
//!   Shopify mirror and never reach the local store.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Macro to define a type-safe numeric ID wrapper.
///
/// Creates a newtype wrapper around `i64` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_i64()`
/// - `From<i64>` and `Into<i64>` implementations
///
/// # Example
///
/// ```rust
/// # use tattoo_dashboard_core::define_id;
/// define_id!(ProductNumber);
/// define_id!(OrderNumber);
///
/// let product = ProductNumber::new(1);
/// let order = OrderNumber::new(1);
///
/// // These are different types, so this won't compile:
/// // let _: ProductNumber = order;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create a new ID from an i64 value.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the underlying i64 value.
            #[must_use]
            pub const fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(ShopifyProductId);

/// Errors that can occur when parsing an [`InternalId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InternalIdError {
    /// The input is empty.
    #[error("internal id cannot be empty")]
    Empty,
}

/// The stable product key shared between the local store and the outside world.
///
/// Any non-empty string is accepted, spaces included: keys are matched
/// exactly as stored, and catalogs filled by other tools use free-form keys.
///
/// ## Examples
///
/// ```
/// use tattoo_dashboard_core::InternalId;
///
/// assert!(InternalId::parse("TAT-0001").is_ok());
/// assert!(InternalId::parse("koi sleeve").is_ok());
/// assert!(InternalId::parse("").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct InternalId(String);

impl InternalId {
    /// Parse an `InternalId` from a string.
    ///
    /// # Errors
    ///
    /// Returns `InternalIdError::Empty` if the input is empty.
    pub fn parse(s: &str) -> Result<Self, InternalIdError> {
        if s.is_empty() {
            return Err(InternalIdError::Empty);
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for InternalId {
    type Err = InternalIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for InternalId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
