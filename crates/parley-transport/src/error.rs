//! Transport error types.

use thiserror::Error;

/// Errors that can occur in transport operations.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The configured public key is not a valid hex-encoded Ed25519 key.
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    /// Serializing a response envelope failed.
    #[error("failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),

    /// I/O error while binding or serving.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;
