//! Webhook trigger handler.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Serialize;

use crate::{error::AppError, services::trigger_webhook, state::AppState};

/// Build the webhook router.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/trigger-webhook",
        post(trigger).fallback(method_not_allowed),
    )
}

/// Outcome of a webhook call.
#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Call the configured webhook and relay its response body.
pub async fn trigger(State(state): State<AppState>) -> Response {
    let url = match state.config().webhook_url() {
        Ok(url) => url,
        Err(e) => return AppError::Config(e).into_response(),
    };

    match trigger_webhook(state.http(), url).await {
        Ok(data) => Json(WebhookResponse {
            success: true,
            data: Some(data),
            error: None,
        })
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Webhook trigger failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(WebhookResponse {
                    success: false,
                    data: None,
                    error: Some(e.to_string()),
                }),
            )
                .into_response()
        }
    }
}

async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(serde_json::json!({ "message": "Method not allowed" })),
    )
}
