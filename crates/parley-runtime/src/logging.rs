//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! # Configuration-Based Initialization
//!
//! ```rust,ignore
//! use parley_runtime::{config::ConfigLoader, logging};
//!
//! let config = ConfigLoader::new().load()?;
//! logging::init_from_config(&config.logging);
//! ```
//!
//! `RUST_LOG` takes precedence over the configured level when set.

use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{LogFormat, LoggingConfig};

/// Initializes logging from a [`LoggingConfig`].
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_from_config(config: &LoggingConfig) {
    let _ = LoggingBuilder::from_config(config).try_init();
}

/// A builder for configuring logging manually.
#[derive(Default)]
pub struct LoggingBuilder {
    level: Option<String>,
    format: LogFormat,
    directives: Vec<String>,
}

impl LoggingBuilder {
    /// Creates a new logging builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder from a [`LoggingConfig`].
    pub fn from_config(config: &LoggingConfig) -> Self {
        Self {
            level: Some(config.level.clone()),
            format: config.format,
            directives: config.filters.clone(),
        }
    }

    /// Sets the base log level.
    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    /// Sets the output format.
    pub fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Adds a filter directive, e.g. `"parley_transport=debug"`.
    pub fn directive(mut self, directive: impl Into<String>) -> Self {
        self.directives.push(directive.into());
        self
    }

    fn build_filter(&self) -> EnvFilter {
        let base = self.level.clone().unwrap_or_else(|| "info".to_string());

        // RUST_LOG wins over the configured level.
        let mut filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&base));

        for directive in &self.directives {
            if let Ok(d) = directive.parse() {
                filter = filter.add_directive(d);
            }
        }

        filter
    }

    /// Initializes the logging system, ignoring failure.
    pub fn init(self) {
        let _ = self.try_init();
    }

    /// Tries to initialize the logging system.
    pub fn try_init(self) -> Result<(), TryInitError> {
        let filter = self.build_filter();

        match self.format {
            LogFormat::Compact => tracing_subscriber::registry()
                .with(fmt::layer().compact())
                .with(filter)
                .try_init(),
            LogFormat::Full => tracing_subscriber::registry()
                .with(fmt::layer())
                .with(filter)
                .try_init(),
            LogFormat::Pretty => tracing_subscriber::registry()
                .with(fmt::layer().pretty())
                .with(filter)
                .try_init(),
            #[cfg(feature = "json-log")]
            LogFormat::Json => tracing_subscriber::registry()
                .with(fmt::layer().json())
                .with(filter)
                .try_init(),
            #[cfg(not(feature = "json-log"))]
            LogFormat::Json => tracing_subscriber::registry()
                .with(fmt::layer().compact())
                .with(filter)
                .try_init(),
        }
    }
}
