//! One-shot bulk command synchronization.
//!
//! The platform learns about the bot's commands through a single REST call:
//! a `PUT /applications/{application_id}/commands` carrying the registry's
//! enumeration. This is a plain I/O wrapper around
//! [`CommandRegistry::sync_payload`](parley_framework::CommandRegistry::sync_payload);
//! the registry owns the shape of the payload.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};
use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use tracing::info;

use parley_framework::CommandRegistry;

use crate::config::ParleyConfig;
use crate::error::{RuntimeError, RuntimeResult};

/// Client for the platform's command-sync endpoint.
pub struct CommandSyncClient {
    http: reqwest::Client,
    api_base: String,
    application_id: String,
    token: String,
}

impl CommandSyncClient {
    /// Creates a client from the runtime configuration.
    ///
    /// When the configuration omits `application_id`, it is recovered from
    /// the bot token via [`derive_application_id`].
    pub fn new(config: &ParleyConfig) -> RuntimeResult<Self> {
        let application_id = match config.application_id.as_deref() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => derive_application_id(&config.token)?,
        };

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| RuntimeError::Http(e.to_string()))?;

        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            application_id,
            token: config.token.clone(),
        })
    }

    /// Pushes the registry to the platform, replacing the remote command
    /// set wholesale.
    pub async fn put_commands(&self, registry: &CommandRegistry) -> RuntimeResult<Value> {
        let url = format!(
            "{}/applications/{}/commands",
            self.api_base, self.application_id
        );
        let payload = registry.sync_payload();

        info!(url = %url, commands = payload.len(), "syncing command set");

        let response = self
            .http
            .put(&url)
            .header(AUTHORIZATION, format!("Bot {}", self.token))
            .json(&payload)
            .send()
            .await
            .map_err(|e| RuntimeError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RuntimeError::SyncFailed {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| RuntimeError::Http(e.to_string()))
    }
}

/// Recovers the application ID from a bot token.
///
/// The token's first dot-separated segment is the base64-encoded
/// application ID.
pub fn derive_application_id(token: &str) -> RuntimeResult<String> {
    let first = token
        .split('.')
        .next()
        .filter(|segment| !segment.is_empty())
        .ok_or_else(|| RuntimeError::InvalidToken("token is empty".into()))?;

    let decoded = STANDARD_NO_PAD
        .decode(first)
        .or_else(|_| STANDARD.decode(first))
        .map_err(|e| RuntimeError::InvalidToken(e.to_string()))?;

    String::from_utf8(decoded).map_err(|e| RuntimeError::InvalidToken(e.to_string()))
}
