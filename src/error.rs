//! Error types for the cache layer
//!
//! Provides unified error handling using thiserror. `CacheError` is `Clone`
//! so a single fetch outcome can be handed to every caller that joined it.

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
#[derive(Error, Debug, Clone)]
pub enum CacheError {
    /// Key not found (or expired) in cache
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalidation pattern is not a valid regular expression
    #[error("Invalid invalidation pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// The fetcher behind a cache miss failed; nothing was cached
    #[error("Fetch failed for {key}: {reason:#}")]
    Fetch {
        key: String,
        reason: Arc<anyhow::Error>,
    },

    /// The task driving a fetch panicked or was cancelled
    #[error("Fetch task for {key} did not complete: {message}")]
    TaskFailed { key: String, message: String },
}

impl CacheError {
    pub fn fetch(key: impl Into<String>, reason: anyhow::Error) -> Self {
        CacheError::Fetch {
            key: key.into(),
            reason: Arc::new(reason),
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidRequest(_) | CacheError::InvalidPattern(_) => {
                StatusCode::BAD_REQUEST
            }
            CacheError::Fetch { .. } => StatusCode::BAD_GATEWAY,
            CacheError::TaskFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache layer.
pub type Result<T> = std::result::Result<T, CacheError>;
