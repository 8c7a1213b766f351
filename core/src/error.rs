//! Error types for the todo RPC client.
//!
//! # Design
//! The server's two domain failures get dedicated variants carrying the
//! server's message, because callers show them to the user. All other non-2xx
//! responses land in `HttpError` with the raw status and body.

use thiserror::Error;

/// Errors returned by `TodoClient` build and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404: the referenced todo does not exist.
    #[error("not found: {message}")]
    NotFound { message: String },

    /// The server returned 400: the input failed validation.
    #[error("invalid request: {message}")]
    Validation { message: String },

    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    #[error("serialization failed: {0}")]
    SerializationError(String),
}
