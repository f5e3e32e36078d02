//! Error types for the Parley framework.

use parley_core::Reply;
use thiserror::Error;

/// A user-facing failure reported by a command handler.
///
/// Carries the positional arguments substituted into the command's localized
/// error template (`{0}`, `{1}`, …). This is a recovered outcome: the router
/// turns it into an ephemeral reply, it never propagates as a request
/// failure.
#[derive(Debug, Clone, Error)]
#[error("handler reported error: {args:?}")]
pub struct HandlerError {
    /// Template arguments, `{0}` first.
    pub args: Vec<String>,
}

impl HandlerError {
    /// Creates an error with a single template argument.
    pub fn new(arg: impl Into<String>) -> Self {
        Self {
            args: vec![arg.into()],
        }
    }

    /// Creates an error with several template arguments.
    pub fn with_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

/// Result type returned by command handlers.
pub type HandlerResult = Result<Reply, HandlerError>;

/// Errors that can occur while routing an interaction.
#[derive(Debug, Clone, Error)]
pub enum DispatchError {
    /// Dispatch reached a command lookup for a name absent from the
    /// registry. This is a configuration error, fatal for the request.
    #[error("no command registered under '{name}'")]
    UnknownCommand {
        /// The missing command name.
        name: String,
    },
}

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;
