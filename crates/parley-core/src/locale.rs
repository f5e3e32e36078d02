//! Locale resolution over a caller-owned localization bundle.
//!
//! The bundle maps locale tag → command name → translated strings. It is
//! supplied by the application at startup and only ever read by the core;
//! `"en"` is the mandatory baseline locale every bundle must carry.
//!
//! Resolution rule: a regional English tag (`en-US`, `en-GB`, …) normalizes
//! to `en` before lookup; any tag absent from the bundle falls back to `en`.
//! There is no other fallback chain.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Baseline locale that must be present in every bundle.
pub const BASELINE_LOCALE: &str = "en";

/// Translated strings for one command in one locale.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommandText {
    /// Localized command description.
    #[serde(default)]
    pub description: Option<String>,
    /// Localized error template with positional `{0}` placeholders.
    #[serde(default)]
    pub error: Option<String>,
}

/// Caller-owned mapping of translated command text keyed by locale tag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocaleBundle {
    locales: HashMap<String, HashMap<String, CommandText>>,
}

impl LocaleBundle {
    /// Creates an empty bundle. A usable bundle needs at least an `"en"`
    /// entry; see [`LocaleBundle::insert`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the text for one command in one locale.
    pub fn insert(
        &mut self,
        locale: impl Into<String>,
        command: impl Into<String>,
        text: CommandText,
    ) {
        self.locales
            .entry(locale.into())
            .or_default()
            .insert(command.into(), text);
    }

    /// Returns whether the bundle carries the given locale tag.
    pub fn supports(&self, locale: &str) -> bool {
        self.locales.contains_key(locale)
    }

    /// Maps a requested locale tag to a tag present in this bundle.
    ///
    /// `en-*` tags normalize to `en`; unsupported tags fall back to `en`
    /// unconditionally.
    pub fn resolve<'a>(&self, requested: &'a str) -> &'a str {
        let normalized = if requested.starts_with("en-") {
            BASELINE_LOCALE
        } else {
            requested
        };
        if self.supports(normalized) {
            normalized
        } else {
            BASELINE_LOCALE
        }
    }

    /// Looks up the text for a command under the resolved locale.
    pub fn command_text(&self, requested: &str, command: &str) -> Option<&CommandText> {
        let locale = self.resolve(requested);
        self.locales.get(locale)?.get(command)
    }
}
