//! Error types for the card service
//!
//! Provides unified error handling using thiserror.

use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Boxed error produced by a population factory.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

// == Cache Error Enum ==
/// Errors raised by the locked expiring cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The population factory failed; nothing was stored for the key
    #[error("Factory failed for key '{key}': {source}")]
    FactoryFailed {
        key: String,
        #[source]
        source: BoxError,
    },

    /// The per-key lock could not be acquired within the configured bound
    #[error("Timed out after {timeout:?} waiting for lock on key '{key}'")]
    LockTimeout { key: String, timeout: Duration },

    /// An operation was invoked after `close`
    #[error("Cache used after close")]
    UseAfterClose,
}

impl CacheError {
    /// Wraps a factory failure for `key`.
    pub fn factory_failed(key: &str, source: impl Into<BoxError>) -> Self {
        CacheError::FactoryFailed {
            key: key.to_string(),
            source: source.into(),
        }
    }
}

// == API Error Enum ==
/// Error type returned by HTTP handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Requested record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Failure inside the cache
    #[error(transparent)]
    Cache(#[from] CacheError),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Cache(CacheError::FactoryFailed { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Cache(CacheError::LockTimeout { .. }) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Cache(CacheError::UseAfterClose) => StatusCode::SERVICE_UNAVAILABLE,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Aliases ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;

/// Convenience Result type for HTTP handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
