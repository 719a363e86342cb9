//! HTTP middleware for admin.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (hub per request, transaction per request)
//! 2. `TraceLayer` (request tracing)
//! 3. API token guard on `/api/*` (see [`auth::RequireApiToken`])

pub mod auth;

pub use auth::{ApiTokenRejection, RequireApiToken};
