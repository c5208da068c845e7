//! Proxy error type and its HTTP mapping.
//!
//! Every failure a handler can hit is a [`ProxyError`]. The variant decides
//! the status code; the body is always `{"error": "<message>"}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::images::allowlist::BlockedRedirect;

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("Missing parameter q")]
    MissingQuery,

    #[error("Missing parameter url")]
    MissingImageUrl,

    #[error("Invalid image url: {0}")]
    InvalidImageUrl(String),

    #[error("Host not allowed: {0}")]
    HostNotAllowed(String),

    #[error("Upstream timed out after {0} ms")]
    Timeout(u64),

    #[error("Upstream request failed: {0}")]
    Upstream(#[source] reqwest::Error),

    #[error("Image exceeds {limit} bytes")]
    ImageTooLarge { limit: usize },

    #[error("Invalid upstream url: {0}")]
    Url(#[from] url::ParseError),

    #[error("Failed to encode variables: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ProxyError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::MissingQuery
            | ProxyError::MissingImageUrl
            | ProxyError::InvalidImageUrl(_) => StatusCode::BAD_REQUEST,
            ProxyError::HostNotAllowed(_) => StatusCode::FORBIDDEN,
            ProxyError::ImageTooLarge { .. } => StatusCode::BAD_GATEWAY,
            // Transport failures surface as 500, matching the Express proxy the
            // frontend was written against.
            ProxyError::Timeout(_)
            | ProxyError::Upstream(_)
            | ProxyError::Url(_)
            | ProxyError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<reqwest::Error> for ProxyError {
    /// A redirect stopped by the image allow-list is reported like a direct
    /// request for that host.
    fn from(e: reqwest::Error) -> Self {
        let mut source = std::error::Error::source(&e);
        while let Some(err) = source {
            if let Some(blocked) = err.downcast_ref::<BlockedRedirect>() {
                return ProxyError::HostNotAllowed(blocked.host.clone());
            }
            source = std::error::Error::source(err);
        }
        ProxyError::Upstream(e)
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ProxyError::MissingQuery.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ProxyError::HostNotAllowed("evil.example".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(ProxyError::Timeout(12_000).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            ProxyError::ImageTooLarge { limit: 1 }.status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[tokio::test]
    async fn test_body_is_json_error() {
        let response = ProxyError::MissingQuery.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value, json!({ "error": "Missing parameter q" }));
    }
}
