//! The command handler seam.
//!
//! Handlers are registered explicitly alongside a [`CommandSpec`]
//! (no attribute magic): the registry owns `Arc<dyn CommandHandler>` trait
//! objects, and [`handler_fn`] adapts a plain async function so application
//! code rarely implements the trait by hand.
//!
//! ```rust,ignore
//! registry.register(
//!     CommandSpec::slash("ping", "Check liveness"),
//!     handler_fn(|_interaction| async { Ok(Reply::text("pong")) }),
//! );
//! ```
//!
//! [`CommandSpec`]: crate::CommandSpec

use std::future::Future;

use async_trait::async_trait;
use parley_core::CommandInteraction;

use crate::error::HandlerResult;

/// An asynchronous command handler.
///
/// Handlers receive the parsed interaction by value (each request owns its
/// interaction, nothing is shared across requests) and return a
/// [`Reply`](parley_core::Reply) or a user-facing
/// [`HandlerError`](crate::HandlerError).
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Handles one command invocation.
    async fn handle(&self, interaction: CommandInteraction) -> HandlerResult;
}

/// Adapts a plain async function into a [`CommandHandler`].
pub fn handler_fn<F, Fut>(f: F) -> FnHandler<F>
where
    F: Fn(CommandInteraction) -> Fut + Send + Sync,
    Fut: Future<Output = HandlerResult> + Send,
{
    FnHandler(f)
}

/// Wrapper created by [`handler_fn`].
pub struct FnHandler<F>(F);

#[async_trait]
impl<F, Fut> CommandHandler for FnHandler<F>
where
    F: Fn(CommandInteraction) -> Fut + Send + Sync,
    Fut: Future<Output = HandlerResult> + Send,
{
    async fn handle(&self, interaction: CommandInteraction) -> HandlerResult {
        (self.0)(interaction).await
    }
}
