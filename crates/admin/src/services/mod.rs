//! Business logic services for admin.
//!
//! # Services
//!
//! - `dashboard` - Catalog statistics for the dashboard overview
//! - `webhook` - Fire the configured external webhook

pub mod dashboard;
pub mod webhook;

pub use dashboard::{DashboardStats, RecentProduct};
pub use webhook::{WebhookError, trigger_webhook};
