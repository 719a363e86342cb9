//! Tattoo Dashboard Core - Shared domain types.
//!
//! This crate provides the types used by every dashboard component:
//! - `admin` - HTTP server for the local catalog and the Shopify mirror
//! - `cli` - Operator commands (indexes, seeding, statistics)
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Identifiers, status values, tattoo metadata enums and stock levels

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
