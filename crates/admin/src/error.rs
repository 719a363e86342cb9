//! Unified error handling for admin.
//!
//! Every error renders as JSON: `{"error": "..."}`, plus `"details"` for
//! upstream and configuration failures where the underlying message helps
//! the operator. Database failure messages are never exposed.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;
use crate::db::RepositoryError;
use crate::shopify::ShopifyError;

/// Application-level error type for the admin API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("{context}: {source}")]
    Database {
        /// Client-facing description of the failed operation.
        context: &'static str,
        #[source]
        source: RepositoryError,
    },

    /// Shopify API operation failed.
    #[error("{context}: {source}")]
    Shopify {
        /// Client-facing description of the failed operation.
        context: &'static str,
        #[source]
        source: ShopifyError,
    },

    /// A setting needed by this request is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Adapter for `map_err` on repository calls.
    ///
    /// `NotFound` becomes a 404 and `InvalidInput` a 400; everything else is
    /// a 500 reported as `context`.
    pub fn database(context: &'static str) -> impl FnOnce(RepositoryError) -> Self {
        move |source| match source {
            RepositoryError::NotFound => Self::NotFound("Product not found".to_string()),
            RepositoryError::InvalidInput(message) => Self::BadRequest(message),
            source => Self::Database { context, source },
        }
    }

    /// Adapter for `map_err` on Shopify calls.
    ///
    /// Missing configuration keeps its own variant; upstream 404s become 404.
    pub fn shopify(context: &'static str) -> impl FnOnce(ShopifyError) -> Self {
        move |source| match source {
            ShopifyError::Config(err) => Self::Config(err),
            ShopifyError::NotFound(what) => Self::NotFound(what),
            source => Self::Shopify { context, source },
        }
    }

    const fn status(&self) -> StatusCode {
        match self {
            Self::Database { .. } | Self::Shopify { .. } | Self::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            Self::Database { context, .. } => ErrorBody::new(*context),
            Self::Shopify { context, source } => {
                ErrorBody::new(*context).with_details(source.to_string())
            }
            Self::Config(err) => {
                ErrorBody::new("Server configuration error").with_details(err.to_string())
            }
            Self::NotFound(message) | Self::Unauthorized(message) | Self::BadRequest(message) => {
                ErrorBody::new(message.clone())
            }
        }
    }
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    fn with_details(mut self, details: String) -> Self {
        self.details = Some(details);
        self
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Log server errors with Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Admin request error"
            );
        }

        (status, Json(self.body())).into_response()
    }
}
