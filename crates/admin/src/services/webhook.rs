//! External webhook trigger.
//!
//! The configured `WEBHOOK_URL` is called with a plain GET; its response body
//! is handed back verbatim. The URL embeds an API key, so it is never logged.

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::instrument;

/// Errors that can occur when calling the webhook.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Request failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Call the webhook and return its response body.
///
/// The upstream status is not inspected: whatever the webhook answers is
/// returned as data.
///
/// # Errors
///
/// Returns `WebhookError::Http` on transport failure or if the body cannot
/// be read.
#[instrument(skip_all)]
pub async fn trigger_webhook(http: &reqwest::Client, url: &SecretString) -> Result<String, WebhookError> {
    let response = http
        .get(url.expose_secret())
        .send()
        .await
        .map_err(reqwest::Error::without_url)?;
    let status = response.status();
    let body = response.text().await.map_err(reqwest::Error::without_url)?;

    tracing::info!(status = status.as_u16(), bytes = body.len(), "Webhook triggered");
    Ok(body)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{Router, routing::get};

    use super::*;

    #[tokio::test]
    async fn test_trigger_returns_body() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = Router::new().route("/", get(|| async { "queued" }));
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let url = SecretString::from(format!("http://{addr}/?api_key=test"));
        let body = trigger_webhook(&reqwest::Client::new(), &url).await.unwrap();

        assert_eq!(body, "queued");
    }

    #[tokio::test]
    async fn test_trigger_error_hides_url() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = SecretString::from(format!("http://{addr}/?api_key=supersecret"));
        let err = trigger_webhook(&reqwest::Client::new(), &url).await.unwrap_err();

        assert!(!err.to_string().contains("supersecret"));
    }
}
