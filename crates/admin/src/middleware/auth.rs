//! API token authentication.
//!
//! Every `/api/*` request must carry `Authorization: Bearer <ADMIN_API_TOKEN>`.
//! There is no session: the token is checked on each request.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use secrecy::ExposeSecret;
use sha2::{Digest, Sha256};

use crate::error::ErrorBody;
use crate::state::AppState;

/// Extractor that requires a valid API bearer token.
///
/// Usually applied to a whole router with
/// `axum::middleware::from_extractor_with_state`.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(_auth: RequireApiToken) -> impl IntoResponse {
///     "ok"
/// }
/// ```
pub struct RequireApiToken;

/// Error returned when the API token is missing or wrong.
#[derive(Debug, PartialEq, Eq)]
pub enum ApiTokenRejection {
    /// No `Authorization: Bearer` header.
    Missing,
    /// Token does not match.
    Invalid,
}

impl IntoResponse for ApiTokenRejection {
    fn into_response(self) -> Response {
        let message = match self {
            Self::Missing => "Missing bearer token",
            Self::Invalid => "Invalid bearer token",
        };
        (
            StatusCode::UNAUTHORIZED,
            [(header::WWW_AUTHENTICATE, "Bearer")],
            Json(ErrorBody {
                error: message.to_string(),
                details: None,
            }),
        )
            .into_response()
    }
}

/// Extract the token from an `Authorization` header value.
fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Compare fixed-length digests so the comparison does not depend on where
/// the first differing byte is.
fn token_matches(provided: &str, expected: &str) -> bool {
    Sha256::digest(provided.as_bytes()) == Sha256::digest(expected.as_bytes())
}

impl FromRequestParts<AppState> for RequireApiToken {
    type Rejection = ApiTokenRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(bearer_token)
            .ok_or(ApiTokenRejection::Missing)?;

        if !token_matches(token, state.config().api_token.expose_secret()) {
            tracing::warn!(path = %parts.uri.path(), "Rejected request with invalid API token");
            return Err(ApiTokenRejection::Invalid);
        }

        Ok(Self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(bearer_token("bearer  abc "), Some("abc"));
        assert_eq!(bearer_token("Basic abc"), None);
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("Bearer"), None);
    }

    #[test]
    fn test_token_matches() {
        assert!(token_matches("same-token", "same-token"));
        assert!(!token_matches("same-token", "same-token2"));
        assert!(!token_matches("", "same-token"));
    }

    #[test]
    fn test_rejection_is_unauthorized() {
        let response = ApiTokenRejection::Missing.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }
}
