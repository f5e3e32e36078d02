//! The command registry.
//!
//! A write-once table mapping command name → descriptor + handler. The
//! registry is populated during composition, then moved into an `Arc` and
//! handed to the router; after that point it is only ever read. There is no
//! removal or update operation.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::warn;

use crate::command::{CommandKind, CommandSpec};
use crate::handler::CommandHandler;

/// A registered command: descriptor plus handler.
#[derive(Clone)]
pub struct RegisteredCommand {
    /// The declarative metadata.
    pub spec: CommandSpec,
    /// The executable half.
    pub handler: Arc<dyn CommandHandler>,
}

/// Name → command table, unique keys, O(1) exact lookup.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, RegisteredCommand>,
}

impl CommandRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a command under its descriptor name.
    ///
    /// Registering the same name twice replaces the earlier entry (last
    /// registration wins) and logs a warning naming the command, so silent
    /// collisions cannot go unnoticed.
    pub fn register(&mut self, spec: CommandSpec, handler: impl CommandHandler + 'static) {
        let name = spec.name.clone();
        let entry = RegisteredCommand {
            spec,
            handler: Arc::new(handler),
        };
        if self.commands.insert(name.clone(), entry).is_some() {
            warn!(command = %name, "replacing previously registered command");
        }
    }

    /// Looks up a command by exact name.
    pub fn get(&self, name: &str) -> Option<&RegisteredCommand> {
        self.commands.get(name)
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Iterates over registered commands in name order.
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredCommand> {
        let mut entries: Vec<_> = self.commands.values().collect();
        entries.sort_by(|a, b| a.spec.name.cmp(&b.spec.name));
        entries.into_iter()
    }

    /// Enumerates the registry as the objects the platform's bulk
    /// command-sync PUT expects.
    pub fn sync_payload(&self) -> Vec<Value> {
        self.iter().map(|entry| entry.spec.wire()).collect()
    }

    /// Renders a fenced code block listing each slash command with its
    /// locale-resolved description. Context-menu commands are omitted.
    pub fn help_text(&self, locale: Option<&str>) -> String {
        let mut body = String::new();
        for entry in self.iter() {
            if entry.spec.kind != CommandKind::Slash {
                continue;
            }
            let description = entry.spec.localized_description(locale).unwrap_or_default();
            body.push_str(&entry.spec.name);
            body.push_str(":\n  ");
            body.push_str(description);
            body.push_str("\n\n");
        }
        format!("```\n{body}```")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{CommandOption, option_type};
    use crate::handler::handler_fn;
    use parley_core::Reply;

    fn noop_registry() -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        registry.register(
            CommandSpec::slash("ping", "Check liveness"),
            handler_fn(|_| async { Ok(Reply::text("pong")) }),
        );
        registry
    }

    #[test]
    fn lookup_is_exact() {
        let registry = noop_registry();
        assert!(registry.get("ping").is_some());
        assert!(registry.get("pin").is_none());
        assert!(registry.get("Ping").is_none());
    }

    #[test]
    fn later_registration_wins() {
        let mut registry = noop_registry();
        registry.register(
            CommandSpec::slash("ping", "Replaced"),
            handler_fn(|_| async { Ok(Reply::text("other")) }),
        );
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.get("ping").unwrap().spec.description.as_deref(),
            Some("Replaced")
        );
    }

    #[test]
    fn sync_payload_is_name_ordered() {
        let mut registry = noop_registry();
        registry.register(
            CommandSpec::slash("weather", "Look up the weather").option(
                CommandOption::new("city", option_type::STRING).suggest(["Tokyo"]),
            ),
            handler_fn(|_| async { Ok(Reply::text("sunny")) }),
        );
        registry.register(
            CommandSpec::user("Report").name_localization("fr", "Signaler"),
            handler_fn(|_| async { Ok(Reply::text("reported")) }),
        );

        let payload = registry.sync_payload();
        assert_eq!(payload.len(), 3);
        assert_eq!(payload[0]["name"], "Report");
        assert_eq!(payload[0]["name_localizations"]["fr"], "Signaler");
        assert_eq!(payload[1]["name"], "ping");
        assert_eq!(payload[2]["options"][0]["autocomplete"], true);
    }

    #[test]
    fn help_text_lists_slash_commands_only() {
        let mut registry = noop_registry();
        registry.register(
            CommandSpec::user("Report"),
            handler_fn(|_| async { Ok(Reply::text("reported")) }),
        );
        let help = registry.help_text(None);
        assert!(help.starts_with("```\n"));
        assert!(help.contains("ping:\n  Check liveness"));
        assert!(!help.contains("Report"));
    }

    #[test]
    fn help_text_resolves_localized_description() {
        let mut registry = CommandRegistry::new();
        registry.register(
            CommandSpec::slash("ping", "Check liveness")
                .description_localization("ja", "生存確認"),
            handler_fn(|_| async { Ok(Reply::text("pong")) }),
        );
        assert!(registry.help_text(Some("ja")).contains("生存確認"));
        assert!(registry.help_text(Some("de")).contains("Check liveness"));
    }
}
