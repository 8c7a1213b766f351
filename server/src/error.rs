//! Error types for the store and the RPC boundary.
//!
//! # Design
//! `StoreError` covers everything below the handlers. `RpcError` is what a
//! procedure returns: validation failures and missing ids are expected
//! outcomes with their own variants, anything from the store is a 500.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failures raised by the SQLite store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database schema version {db_version} is newer than supported {latest_supported}")]
    UnsupportedSchemaVersion { db_version: u32, latest_supported: u32 },

    #[error("blocking task failed: {0}")]
    Join(String),
}

/// Failures returned by RPC procedures.
#[derive(Debug, Error)]
pub enum RpcError {
    /// Malformed input, rejected before reaching the store.
    #[error("{0}")]
    Validation(String),

    #[error("Todo with id {0} not found")]
    NotFound(i64),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl RpcError {
    pub fn status(&self) -> StatusCode {
        match self {
            RpcError::Validation(_) => StatusCode::BAD_REQUEST,
            RpcError::NotFound(_) => StatusCode::NOT_FOUND,
            RpcError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            RpcError::Validation(_) => "BAD_REQUEST",
            RpcError::NotFound(_) => "NOT_FOUND",
            RpcError::Store(_) => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl From<JsonRejection> for RpcError {
    fn from(rejection: JsonRejection) -> Self {
        RpcError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for RpcError {
    fn from(rejection: QueryRejection) -> Self {
        RpcError::Validation(rejection.body_text())
    }
}

#[derive(Serialize)]
struct ErrorEnvelope<'a> {
    error: ErrorBody<'a>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    code: &'a str,
    message: String,
}

impl IntoResponse for RpcError {
    fn into_response(self) -> Response {
        let message = match &self {
            RpcError::Store(err) => {
                error!(error = %err, "store failure");
                "internal storage error".to_string()
            }
            other => other.to_string(),
        };
        let body = ErrorEnvelope {
            error: ErrorBody {
                code: self.code(),
                message,
            },
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_missing_id() {
        let err = RpcError::NotFound(999);
        assert_eq!(err.to_string(), "Todo with id 999 not found");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.code(), "NOT_FOUND");
    }

    #[test]
    fn store_errors_map_to_500() {
        let err = RpcError::from(StoreError::Join("cancelled".to_string()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn validation_maps_to_400() {
        let err = RpcError::Validation("title must not be empty".to_string());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "BAD_REQUEST");
    }
}
