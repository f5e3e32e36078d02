//! The interaction router.
//!
//! One router instance serves one bot. It owns shared references to the
//! registry and the locale bundle (injected at construction, never global),
//! so several routers can coexist in one process without interference.
//!
//! # Dispatch table
//!
//! | Incoming type | Outgoing |
//! |---|---|
//! | Ping | Pong |
//! | ApplicationCommand | the looked-up handler's reply, re-wrapped |
//! | Autocomplete | choices filtered from the command's declared options |
//! | anything else | the fixed fallback text reply |
//!
//! A missing registry entry on the command or autocomplete path is a
//! [`DispatchError::UnknownCommand`]: a configuration error surfaced to the
//! caller, never silently replaced by the fallback reply.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use parley_core::{
    AutocompleteInteraction, Interaction, InteractionResponse, LocaleBundle, MessageReply,
    Outgoing, Reply,
};

use crate::error::{DispatchError, DispatchResult, HandlerError};
use crate::registry::{CommandRegistry, RegisteredCommand};
use crate::template::format_template;

/// Reply text for interaction types the router does not handle.
const DEFAULT_FALLBACK_REPLY: &str = "hi";

/// The per-request dispatch state machine.
pub struct InteractionRouter {
    registry: Arc<CommandRegistry>,
    locales: Arc<LocaleBundle>,
    fallback_reply: String,
}

impl InteractionRouter {
    /// Creates a router over the given registry and locale bundle.
    pub fn new(registry: Arc<CommandRegistry>, locales: Arc<LocaleBundle>) -> Self {
        Self {
            registry,
            locales,
            fallback_reply: DEFAULT_FALLBACK_REPLY.to_string(),
        }
    }

    /// Overrides the reply text used for unhandled interaction types.
    pub fn fallback_reply(mut self, text: impl Into<String>) -> Self {
        self.fallback_reply = text.into();
        self
    }

    /// Routes one interaction to its response.
    ///
    /// Exactly one outgoing response is produced per call; there is no retry
    /// and no queuing.
    pub async fn dispatch(&self, interaction: Interaction) -> DispatchResult<Outgoing> {
        match interaction {
            Interaction::Ping(_) => {
                debug!("answering ping");
                Ok(Outgoing::from(InteractionResponse::pong()))
            }
            Interaction::Command(cmd) => {
                let name = cmd.data.name.clone();
                let locale = cmd.common.locale.clone();
                let entry = self.lookup(&name)?;
                debug!(command = %name, "dispatching application command");
                match entry.handler.handle(cmd).await {
                    Ok(reply) => Ok(reply.into_outgoing()),
                    Err(err) => Ok(self.error_reply(&entry, locale.as_deref(), &err)),
                }
            }
            Interaction::Autocomplete(ac) => {
                let entry = self.lookup(&ac.data.name)?;
                let choices = autocomplete_choices(&entry, &ac);
                debug!(
                    command = %ac.data.name,
                    choices = choices.len(),
                    "answering autocomplete query"
                );
                Ok(Outgoing::from(InteractionResponse::autocomplete(choices)))
            }
            other => {
                debug!(kind = %other.kind_name(), "unhandled interaction type, sending fallback");
                Ok(Reply::text(self.fallback_reply.clone()).into_outgoing())
            }
        }
    }

    fn lookup(&self, name: &str) -> DispatchResult<RegisteredCommand> {
        self.registry
            .get(name)
            .cloned()
            .ok_or_else(|| DispatchError::UnknownCommand {
                name: name.to_string(),
            })
    }

    /// Builds the ephemeral error reply for a handler-reported failure.
    ///
    /// Template resolution order: locale bundle entry for the command, then
    /// the command's own fallback template, then the bare first argument.
    fn error_reply(
        &self,
        entry: &RegisteredCommand,
        locale: Option<&str>,
        err: &HandlerError,
    ) -> Outgoing {
        let requested = locale.unwrap_or(parley_core::locale::BASELINE_LOCALE);
        let template = self
            .locales
            .command_text(requested, &entry.spec.name)
            .and_then(|text| text.error.clone())
            .or_else(|| entry.spec.error_template.clone());
        let content = match template {
            Some(t) => format_template(&t, &err.args),
            None => {
                warn!(command = %entry.spec.name, "no error template, replying with raw argument");
                err.args.first().cloned().unwrap_or_default()
            }
        };
        Reply::Message(MessageReply::content(content).ephemeral()).into_outgoing()
    }
}

/// Filters the command's declared options to those present in the query by
/// (name, type), then projects their suggestion lists.
fn autocomplete_choices(
    entry: &RegisteredCommand,
    query: &AutocompleteInteraction,
) -> Vec<Value> {
    entry
        .spec
        .options
        .iter()
        .filter(|declared| {
            query
                .data
                .options
                .iter()
                .any(|asked| asked.name == declared.name && asked.kind == declared.kind)
        })
        .flat_map(|declared| declared.suggestions.iter().cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{CommandOption, CommandSpec, option_type};
    use crate::handler::handler_fn;
    use parley_core::{CommandText, ResponseType, parse_interaction};
    use serde_json::json;

    fn interaction(kind: u8, data: Value, locale: Option<&str>) -> Interaction {
        let mut body = json!({
            "id": "1",
            "application_id": "2",
            "token": "tok",
            "type": kind,
            "data": data,
        });
        if let Some(locale) = locale {
            body["locale"] = json!(locale);
        }
        parse_interaction(&body.to_string()).unwrap()
    }

    fn router() -> InteractionRouter {
        let mut registry = CommandRegistry::new();
        registry.register(
            CommandSpec::slash("ping", "Check liveness"),
            handler_fn(|_| async { Ok(Reply::text("pong")) }),
        );
        registry.register(
            CommandSpec::slash("weather", "Look up the weather").option(
                CommandOption::new("city", option_type::STRING).suggest(["Tokyo", "Kyoto"]),
            ),
            handler_fn(|_| async { Err(HandlerError::new("no such city")) }),
        );

        let mut locales = LocaleBundle::new();
        locales.insert(
            "en",
            "weather",
            CommandText {
                description: None,
                error: Some("weather failed: {0}".into()),
            },
        );
        locales.insert(
            "fr",
            "weather",
            CommandText {
                description: None,
                error: Some("échec météo: {0}".into()),
            },
        );

        InteractionRouter::new(Arc::new(registry), Arc::new(locales))
    }

    #[tokio::test]
    async fn ping_yields_pong() {
        let out = router()
            .dispatch(interaction(1, Value::Null, None))
            .await
            .unwrap();
        assert_eq!(out.response.kind, ResponseType::Pong);
        assert!(out.response.data.is_none());
    }

    #[tokio::test]
    async fn command_invokes_registered_handler() {
        let out = router()
            .dispatch(interaction(2, json!({"name": "ping", "type": 1}), None))
            .await
            .unwrap();
        let data = out.response.data.unwrap();
        assert_eq!(data.content.as_deref(), Some("pong"));
        assert!(data.flags.is_none());
    }

    #[tokio::test]
    async fn unknown_command_is_a_dispatch_error() {
        let err = router()
            .dispatch(interaction(2, json!({"name": "missing", "type": 1}), None))
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::UnknownCommand { name } if name == "missing"));
    }

    #[tokio::test]
    async fn handler_error_becomes_localized_ephemeral_reply() {
        let out = router()
            .dispatch(interaction(
                2,
                json!({"name": "weather", "type": 1}),
                Some("fr"),
            ))
            .await
            .unwrap();
        let data = out.response.data.unwrap();
        assert_eq!(data.content.as_deref(), Some("échec météo: no such city"));
        assert_eq!(data.flags.unwrap().bits(), 64);
    }

    #[tokio::test]
    async fn handler_error_locale_falls_back_to_en() {
        let out = router()
            .dispatch(interaction(
                2,
                json!({"name": "weather", "type": 1}),
                Some("de"),
            ))
            .await
            .unwrap();
        let data = out.response.data.unwrap();
        assert_eq!(data.content.as_deref(), Some("weather failed: no such city"));
    }

    #[tokio::test]
    async fn autocomplete_filters_on_name_and_type() {
        let out = router()
            .dispatch(interaction(
                4,
                json!({
                    "name": "weather",
                    "type": 1,
                    "options": [{"name": "city", "type": 3, "focused": true}],
                }),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(out.response.kind, ResponseType::AutocompleteResult);
        let choices = out.response.data.unwrap().choices.unwrap();
        assert_eq!(choices, vec![json!("Tokyo"), json!("Kyoto")]);
    }

    #[tokio::test]
    async fn autocomplete_type_mismatch_yields_no_choices() {
        let out = router()
            .dispatch(interaction(
                4,
                json!({
                    "name": "weather",
                    "type": 1,
                    "options": [{"name": "city", "type": 4}],
                }),
                None,
            ))
            .await
            .unwrap();
        let choices = out.response.data.unwrap().choices.unwrap();
        assert!(choices.is_empty());
    }

    #[tokio::test]
    async fn component_and_modal_get_fallback_reply() {
        let r = router();
        for kind in [3u8, 5] {
            let out = r
                .dispatch(interaction(kind, json!({"custom_id": "x"}), None))
                .await
                .unwrap();
            let data = out.response.data.unwrap();
            assert_eq!(data.content.as_deref(), Some("hi"));
        }
    }

    #[tokio::test]
    async fn unknown_type_gets_configured_fallback() {
        let r = router().fallback_reply("hello there");
        let out = r
            .dispatch(interaction(42, Value::Null, None))
            .await
            .unwrap();
        let data = out.response.data.unwrap();
        assert_eq!(data.content.as_deref(), Some("hello there"));
    }
}
