//! # Parley Framework
//!
//! Command registration and interaction routing.
//!
//! - [`command`] – declarative command descriptors ([`CommandSpec`]) and
//!   their option metadata
//! - [`handler`] – the [`CommandHandler`] seam and the [`handler_fn`]
//!   adapter for plain async functions
//! - [`registry`] – the write-once name → command table
//! - [`router`] – the per-request dispatch state machine
//! - [`template`] – positional `{0}`-placeholder substitution for error
//!   templates
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use parley_framework::{CommandRegistry, CommandSpec, InteractionRouter, handler_fn};
//! use parley_core::{LocaleBundle, Reply};
//! use std::sync::Arc;
//!
//! let mut registry = CommandRegistry::new();
//! registry.register(
//!     CommandSpec::slash("ping", "Check liveness"),
//!     handler_fn(|_interaction| async { Ok(Reply::text("pong")) }),
//! );
//!
//! let router = InteractionRouter::new(Arc::new(registry), Arc::new(LocaleBundle::new()));
//! ```

pub mod command;
pub mod error;
pub mod handler;
pub mod registry;
pub mod router;
pub mod template;

pub use command::{CommandKind, CommandOption, CommandSpec, option_type};
pub use error::{DispatchError, DispatchResult, HandlerError, HandlerResult};
pub use handler::{CommandHandler, handler_fn};
pub use registry::{CommandRegistry, RegisteredCommand};
pub use router::InteractionRouter;
pub use template::format_template;
