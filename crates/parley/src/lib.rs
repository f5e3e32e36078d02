//! # Parley
//!
//! A type-safe webhook interaction framework for chat-platform bots.
//!
//! ## Overview
//!
//! Parley receives signed interaction events over a single HTTP route,
//! authenticates them, routes them to registered command handlers, and
//! encodes each handler's reply into the wire format the platform expects.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌───────────────┐   ┌──────────────────┐   ┌─────────────┐
//! │ inbound  │──▶│ Ed25519 gate  │──▶│ InteractionRouter│──▶│ registered  │
//! │ request  │   │ (401 on fail) │   │  (type machine)  │   │ handler     │
//! └──────────┘   └───────────────┘   └──────────────────┘   └─────────────┘
//!                                             │
//!                                             ▼
//!                                    JSON / multipart encoder
//! ```
//!
//! - **parley-core**: interaction/response model, flags, locale fallback
//! - **parley-framework**: command registry, handler seam, dispatch machine
//! - **parley-transport**: axum webhook route, signature gate, wire encoding
//! - **parley-runtime**: configuration, logging, command sync, main loop
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use parley::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> RuntimeResult<()> {
//!     let mut runtime = ParleyRuntime::from_default_config()?;
//!     runtime.register(
//!         CommandSpec::slash("ping", "Check liveness"),
//!         handler_fn(|_| async { Ok(Reply::text("pong")) }),
//!     );
//!     runtime.sync_commands().await?;
//!     runtime.run().await
//! }
//! ```

pub use parley_core as core;
pub use parley_framework as framework;
pub use parley_runtime as runtime;
pub use parley_transport as transport;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use parley_core::{
        Attachment, CommandInteraction, CommandText, Interaction, InteractionResponse,
        LocaleBundle, MessageFlags, MessageReply, Reply,
    };
    pub use parley_framework::{
        CommandHandler, CommandOption, CommandRegistry, CommandSpec, HandlerError,
        InteractionRouter, handler_fn, option_type,
    };
    pub use parley_runtime::{ParleyConfig, ParleyRuntime, RuntimeResult};
    pub use parley_transport::{SignatureVerifier, WebhookState, serve};
}
