//! Core error types.

use thiserror::Error;

/// Errors produced while parsing an inbound interaction payload.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The body is not valid UTF-8.
    #[error("payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// The body is not valid JSON or does not match any interaction variant.
    #[error("invalid interaction payload: {0}")]
    Json(#[from] serde_json::Error),

    /// The body parsed as JSON but is not an object.
    #[error("interaction payload is not a JSON object")]
    NotAnObject,
}

/// Result type for parse operations.
pub type ParseResult<T> = Result<T, ParseError>;
