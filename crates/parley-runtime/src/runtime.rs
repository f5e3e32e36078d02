//! The runtime: composition root and main loop.
//!
//! A [`ParleyRuntime`] collects the pieces built elsewhere (configuration,
//! registry, locale bundle) and runs the webhook server until a shutdown
//! signal arrives. The registry and bundle are moved into `Arc`s when the
//! router is constructed; from that point on they are immutable.

use std::sync::Arc;

use tracing::info;

use parley_core::LocaleBundle;
use parley_framework::{CommandHandler, CommandRegistry, CommandSpec, InteractionRouter};
use parley_transport::{SignatureVerifier, WebhookState, serve};

use crate::config::{ConfigLoader, ParleyConfig};
use crate::error::RuntimeResult;
use crate::logging;
use crate::sync::CommandSyncClient;

/// The Parley runtime.
pub struct ParleyRuntime {
    config: ParleyConfig,
    registry: CommandRegistry,
    locales: LocaleBundle,
    fallback_reply: Option<String>,
}

impl ParleyRuntime {
    /// Creates a runtime over an already-loaded configuration.
    pub fn new(config: ParleyConfig) -> Self {
        Self {
            config,
            registry: CommandRegistry::new(),
            locales: LocaleBundle::new(),
            fallback_reply: None,
        }
    }

    /// Creates a runtime from the default configuration sources
    /// (`parley.toml` + `PARLEY_` environment variables).
    pub fn from_default_config() -> RuntimeResult<Self> {
        let config = ConfigLoader::new().load()?;
        Ok(Self::new(config))
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &ParleyConfig {
        &self.config
    }

    /// Registers a command.
    pub fn register(&mut self, spec: CommandSpec, handler: impl CommandHandler + 'static) {
        self.registry.register(spec, handler);
    }

    /// Supplies the caller-owned locale bundle.
    pub fn locales(&mut self, bundle: LocaleBundle) {
        self.locales = bundle;
    }

    /// Overrides the reply text used for unhandled interaction types.
    pub fn fallback_reply(&mut self, text: impl Into<String>) {
        self.fallback_reply = Some(text.into());
    }

    /// Access to the registry, e.g. for help text generation.
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Pushes the registered command set to the platform (one-shot bulk
    /// sync). Call this before [`ParleyRuntime::run`].
    pub async fn sync_commands(&self) -> RuntimeResult<serde_json::Value> {
        CommandSyncClient::new(&self.config)?
            .put_commands(&self.registry)
            .await
    }

    /// Serves the webhook until Ctrl+C.
    pub async fn run(self) -> RuntimeResult<()> {
        logging::init_from_config(&self.config.logging);
        self.config.validate()?;

        let verifier = SignatureVerifier::from_hex(&self.config.public_key)?;

        let mut router =
            InteractionRouter::new(Arc::new(self.registry), Arc::new(self.locales));
        if let Some(text) = self.fallback_reply {
            router = router.fallback_reply(text);
        }

        let state = Arc::new(WebhookState::new(verifier, router));
        let handle = serve(
            &self.config.server.bind_addr(),
            &self.config.server.path,
            state,
        )
        .await?;

        info!(listener = %handle.name(), "runtime started, waiting for shutdown signal");
        tokio::signal::ctrl_c().await?;

        info!("shutdown signal received");
        handle.shutdown();
        Ok(())
    }
}
