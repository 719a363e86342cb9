//! Core types for the tattoo dashboard.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod status;
pub mod stock;
pub mod tattoo;

pub use id::*;
pub use status::{ProductStatus, ShopifyStatus};
pub use stock::StockLevel;
pub use tattoo::{Complexity, PainLevel, PainLevelError};
