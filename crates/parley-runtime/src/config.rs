//! Configuration loading using figment.
//!
//! Sources, lowest to highest priority:
//!
//! 1. Built-in defaults
//! 2. `parley.toml` in the current directory (or an explicit file)
//! 3. Environment variables with the `PARLEY_` prefix and `__` nesting
//!    (`PARLEY_SERVER__PORT=9000` → `server.port = 9000`)
//! 4. Programmatic overrides via [`ConfigLoader::merge`]
//!
//! # Example
//!
//! ```rust,ignore
//! use parley_runtime::config::ConfigLoader;
//!
//! let config = ConfigLoader::new().load()?;
//! ```

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Default configuration file name.
const CONFIG_FILE: &str = "parley.toml";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested file does not exist.
    #[error("configuration file not found: {0}")]
    FileNotFound(PathBuf),

    /// Extraction into the schema failed.
    #[error("failed to parse configuration: {0}")]
    Parse(String),

    /// A required value is missing or malformed.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ParleyConfig {
    /// Application ID; derived from the token's first segment when absent.
    #[serde(default)]
    pub application_id: Option<String>,

    /// Hex-encoded Ed25519 public key used to verify inbound requests.
    #[serde(default)]
    pub public_key: String,

    /// Bot token for the platform REST API.
    #[serde(default)]
    pub token: String,

    /// Base URL of the platform REST API.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Webhook server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_api_base() -> String {
    "https://discord.com/api/v10".to_string()
}

impl ParleyConfig {
    /// Checks the values the runtime cannot start without.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.public_key.is_empty() {
            return Err(ConfigError::Invalid(
                "public_key must be set to the application's hex-encoded key".into(),
            ));
        }
        Ok(())
    }
}

/// Webhook server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (default: "0.0.0.0").
    pub host: String,

    /// Listen port (default: 8080).
    pub port: u16,

    /// Webhook path (default: "/interactions").
    pub path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            path: "/interactions".to_string(),
        }
    }
}

impl ServerConfig {
    /// Returns the bind address string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Single-line compact output.
    #[default]
    Compact,
    /// Default tracing formatter.
    Full,
    /// Multi-line human-readable output.
    Pretty,
    /// JSON lines (requires the `json-log` feature).
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Base log level (trace, debug, info, warn, error).
    pub level: String,

    /// Output format.
    pub format: LogFormat,

    /// Extra per-module filter directives, e.g. `"parley_transport=debug"`.
    pub filters: Vec<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
            filters: Vec::new(),
        }
    }
}

/// Configuration loader with figment-based multi-source support.
pub struct ConfigLoader {
    figment: Figment,
    config_file: Option<PathBuf>,
    load_env: bool,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Creates a loader with defaults.
    pub fn new() -> Self {
        Self {
            figment: Figment::new(),
            config_file: None,
            load_env: true,
        }
    }

    /// Sets a specific configuration file to load.
    pub fn file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Disables loading environment variables.
    pub fn without_env(mut self) -> Self {
        self.load_env = false;
        self
    }

    /// Merges additional configuration programmatically.
    pub fn merge(mut self, config: ParleyConfig) -> Self {
        self.figment = self.figment.merge(Serialized::defaults(config));
        self
    }

    /// Loads and returns the configuration.
    pub fn load(self) -> ConfigResult<ParleyConfig> {
        let figment = self.build_figment()?;
        let config: ParleyConfig = figment
            .extract()
            .map_err(|e| ConfigError::Parse(e.to_string()))?;

        debug!(level = %config.logging.level, "configuration loaded");
        Ok(config)
    }

    fn build_figment(self) -> ConfigResult<Figment> {
        let mut figment = Figment::from(Serialized::defaults(ParleyConfig::default()));
        figment = figment.merge(self.figment);

        if let Some(path) = self.config_file {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path));
            }
            info!(path = %path.display(), "loading configuration file");
            figment = figment.merge(Toml::file(path));
        } else {
            let default_path = Path::new(CONFIG_FILE);
            if default_path.exists() {
                info!(path = %default_path.display(), "loading configuration file");
                figment = figment.merge(Toml::file(default_path));
            }
        }

        if self.load_env {
            figment = figment.merge(
                Env::prefixed("PARLEY_")
                    .split("__")
                    .map(|key| key.as_str().replace("__", ".").into()),
            );
        }

        Ok(figment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = ConfigLoader::new().without_env().load().unwrap();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.server.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.server.path, "/interactions");
        assert!(config.application_id.is_none());
    }

    #[test]
    fn programmatic_merge_overrides_defaults() {
        let config = ConfigLoader::new()
            .without_env()
            .merge(ParleyConfig {
                public_key: "abcd".into(),
                server: ServerConfig {
                    port: 9000,
                    ..ServerConfig::default()
                },
                ..ParleyConfig::default()
            })
            .load()
            .unwrap();
        assert_eq!(config.public_key, "abcd");
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = ConfigLoader::new()
            .without_env()
            .file("/nonexistent/parley.toml")
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn empty_public_key_fails_validation() {
        let config = ParleyConfig::default();
        assert!(config.validate().is_err());

        let config = ParleyConfig {
            public_key: "abcd".into(),
            ..ParleyConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
