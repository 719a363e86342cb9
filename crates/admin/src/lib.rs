//! Tattoo Dashboard Admin library.
//!
//! This crate provides the admin API as a library,
//! allowing it to be tested and reused by the CLI.
//!
//! # Security
//!
//! This crate holds HIGH PRIVILEGE access:
//! - Shopify Admin API credentials (product status changes)
//! - Write access to the local `MongoDB` catalog
//!
//! Every `/api/*` route requires the `ADMIN_API_TOKEN` bearer token.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod shopify;
pub mod state;
