//! Server error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Server error.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// No page matches the requested path.
    #[error("Page not found: {0}")]
    PageNotFound(String),
    /// The requesting principal is not in any allowed group.
    #[error("Access denied: {0}")]
    Forbidden(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::PageNotFound(_) => StatusCode::NOT_FOUND,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
