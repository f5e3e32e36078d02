//! Runtime error types.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur during runtime operations.
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Configuration loading or validation failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Transport error.
    #[error(transparent)]
    Transport(#[from] parley_transport::TransportError),

    /// The bot token could not be decoded into an application ID.
    #[error("invalid bot token: {0}")]
    InvalidToken(String),

    /// An HTTP request to the platform failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The platform rejected the bulk command sync.
    #[error("command sync failed ({status}): {message}")]
    SyncFailed {
        /// HTTP status returned by the platform.
        status: u16,
        /// Response body, for diagnostics.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
