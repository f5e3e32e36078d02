//! # Parley Runtime
//!
//! Orchestration layer for the Parley interaction framework.
//!
//! This crate wires configuration, logging, the command registry, and the
//! webhook transport into a runnable bot:
//!
//! ```rust,ignore
//! use parley_framework::{CommandSpec, handler_fn};
//! use parley_core::Reply;
//! use parley_runtime::ParleyRuntime;
//!
//! #[tokio::main]
//! async fn main() -> parley_runtime::RuntimeResult<()> {
//!     let mut runtime = ParleyRuntime::from_default_config()?;
//!     runtime.register(
//!         CommandSpec::slash("ping", "Check liveness"),
//!         handler_fn(|_| async { Ok(Reply::text("pong")) }),
//!     );
//!     runtime.run().await
//! }
//! ```
//!
//! Configuration comes from `parley.toml` plus `PARLEY_`-prefixed
//! environment variables (see [`config`]); the one-shot bulk command sync
//! ([`ParleyRuntime::sync_commands`]) pushes the registry to the platform.

pub mod config;
pub mod error;
pub mod logging;
pub mod runtime;
pub mod sync;

pub use config::{ConfigError, ConfigLoader, ConfigResult, LogFormat, LoggingConfig, ParleyConfig, ServerConfig};
pub use error::{RuntimeError, RuntimeResult};
pub use runtime::ParleyRuntime;
pub use sync::{CommandSyncClient, derive_application_id};
