//! Inbound interaction events.
//!
//! An interaction is a single event delivered by the chat platform to the
//! webhook endpoint: a liveness ping, a command invocation, an autocomplete
//! keystroke, a component click, or a modal submission. The wire format is a
//! JSON object discriminated by an integer `type` field:
//!
//! | `type` | Variant |
//! |---|---|
//! | 1 | [`Interaction::Ping`] |
//! | 2 | [`Interaction::Command`] |
//! | 3 | [`Interaction::Component`] |
//! | 4 | [`Interaction::Autocomplete`] |
//! | 5 | [`Interaction::ModalSubmit`] |
//! | other | [`Interaction::Unknown`] |
//!
//! # Parsing
//!
//! [`parse_interaction`] pre-parses the body into a [`serde_json::Value`],
//! inspects the discriminant, and deserializes the most specific variant.
//! Fields common to every variant live in [`InteractionCommon`] and are
//! embedded via `#[serde(flatten)]`, so all fields are deserialized in a
//! single pass.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ParseError, ParseResult};

/// Fields shared by every interaction variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionCommon {
    /// Interaction ID.
    pub id: String,
    /// Application the interaction was sent to.
    pub application_id: String,
    /// Continuation token for follow-up calls.
    pub token: String,
    /// Locale of the invoking user, when the platform supplies one.
    #[serde(default)]
    pub locale: Option<String>,
    /// Preferred locale of the guild the interaction came from.
    #[serde(default)]
    pub guild_locale: Option<String>,
    /// Channel the interaction was triggered in.
    #[serde(default)]
    pub channel_id: Option<String>,
    /// Guild the interaction was triggered in.
    #[serde(default)]
    pub guild_id: Option<String>,
}

/// A liveness ping from the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PingInteraction {
    #[serde(flatten)]
    pub common: InteractionCommon,
}

/// Payload of a command invocation or autocomplete query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandInvocation {
    /// Name of the invoked command.
    pub name: String,
    /// Command kind discriminant (1 = slash, 2 = user, 3 = message).
    #[serde(rename = "type")]
    pub kind: u8,
    /// Options supplied by the user, in declaration order.
    #[serde(default)]
    pub options: Vec<InvokedOption>,
    /// Target of a context-menu invocation.
    #[serde(default)]
    pub target_id: Option<String>,
}

/// A single option as supplied in an invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvokedOption {
    /// Option name.
    pub name: String,
    /// Option type discriminant.
    #[serde(rename = "type")]
    pub kind: u8,
    /// Supplied value, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Whether this is the option the user is currently typing.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub focused: bool,
}

/// A command invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandInteraction {
    #[serde(flatten)]
    pub common: InteractionCommon,
    pub data: CommandInvocation,
}

/// An autocomplete query. Carries the same data shape as a command
/// invocation, with `focused` set on the option being typed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutocompleteInteraction {
    #[serde(flatten)]
    pub common: InteractionCommon,
    pub data: CommandInvocation,
}

/// A message-component click. Parley does not route these; the router
/// answers with its fallback reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentInteraction {
    #[serde(flatten)]
    pub common: InteractionCommon,
    #[serde(default)]
    pub data: Value,
}

/// A modal submission. Treated like a component click.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModalInteraction {
    #[serde(flatten)]
    pub common: InteractionCommon,
    #[serde(default)]
    pub data: Value,
}

/// An interaction whose `type` discriminant is not recognized.
#[derive(Debug, Clone)]
pub struct UnknownInteraction {
    /// The raw discriminant value.
    pub kind: u64,
    /// The full payload, untouched.
    pub raw: Value,
}

/// An inbound interaction, parsed to its most specific variant.
#[derive(Debug, Clone)]
pub enum Interaction {
    Ping(PingInteraction),
    Command(CommandInteraction),
    Component(ComponentInteraction),
    Autocomplete(AutocompleteInteraction),
    ModalSubmit(ModalInteraction),
    Unknown(UnknownInteraction),
}

impl Interaction {
    /// Locale of the invoking user, when present.
    pub fn locale(&self) -> Option<&str> {
        match self {
            Self::Ping(i) => i.common.locale.as_deref(),
            Self::Command(i) => i.common.locale.as_deref(),
            Self::Component(i) => i.common.locale.as_deref(),
            Self::Autocomplete(i) => i.common.locale.as_deref(),
            Self::ModalSubmit(i) => i.common.locale.as_deref(),
            Self::Unknown(_) => None,
        }
    }

    /// Short name of the variant, for logging.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Ping(_) => "ping",
            Self::Command(_) => "application_command",
            Self::Component(_) => "message_component",
            Self::Autocomplete(_) => "autocomplete",
            Self::ModalSubmit(_) => "modal_submit",
            Self::Unknown(_) => "unknown",
        }
    }
}

/// Parses a raw request body into the most specific [`Interaction`].
///
/// The body must already have passed signature verification; this function
/// performs no authentication.
pub fn parse_interaction(raw: &str) -> ParseResult<Interaction> {
    let v: Value = serde_json::from_str(raw)?;
    if !v.is_object() {
        return Err(ParseError::NotAnObject);
    }
    let kind = v.get("type").and_then(Value::as_u64).unwrap_or(0);

    match kind {
        1 => Ok(Interaction::Ping(serde_json::from_value(v)?)),
        2 => Ok(Interaction::Command(serde_json::from_value(v)?)),
        3 => Ok(Interaction::Component(serde_json::from_value(v)?)),
        4 => Ok(Interaction::Autocomplete(serde_json::from_value(v)?)),
        5 => Ok(Interaction::ModalSubmit(serde_json::from_value(v)?)),
        other => Ok(Interaction::Unknown(UnknownInteraction {
            kind: other,
            raw: v,
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn common_fields() -> Value {
        json!({
            "id": "123",
            "application_id": "456",
            "token": "tok",
        })
    }

    #[test]
    fn parses_ping() {
        let mut body = common_fields();
        body["type"] = json!(1);
        let parsed = parse_interaction(&body.to_string()).unwrap();
        assert!(matches!(parsed, Interaction::Ping(_)));
    }

    #[test]
    fn parses_command_with_options() {
        let mut body = common_fields();
        body["type"] = json!(2);
        body["locale"] = json!("en-US");
        body["data"] = json!({
            "name": "weather",
            "type": 1,
            "options": [{"name": "city", "type": 3, "value": "Tokyo"}],
        });
        let parsed = parse_interaction(&body.to_string()).unwrap();
        let Interaction::Command(cmd) = parsed else {
            panic!("expected command interaction");
        };
        assert_eq!(cmd.data.name, "weather");
        assert_eq!(cmd.data.options.len(), 1);
        assert_eq!(cmd.data.options[0].kind, 3);
        assert_eq!(cmd.common.locale.as_deref(), Some("en-US"));
    }

    #[test]
    fn parses_autocomplete_focused_flag() {
        let mut body = common_fields();
        body["type"] = json!(4);
        body["data"] = json!({
            "name": "weather",
            "type": 1,
            "options": [{"name": "city", "type": 3, "focused": true}],
        });
        let parsed = parse_interaction(&body.to_string()).unwrap();
        let Interaction::Autocomplete(ac) = parsed else {
            panic!("expected autocomplete interaction");
        };
        assert!(ac.data.options[0].focused);
    }

    #[test]
    fn unrecognized_type_falls_back_to_unknown() {
        let mut body = common_fields();
        body["type"] = json!(99);
        let parsed = parse_interaction(&body.to_string()).unwrap();
        let Interaction::Unknown(u) = parsed else {
            panic!("expected unknown interaction");
        };
        assert_eq!(u.kind, 99);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(parse_interaction("{not json").is_err());
        assert!(parse_interaction("[1, 2, 3]").is_err());
    }

    #[test]
    fn missing_data_on_command_is_an_error() {
        let mut body = common_fields();
        body["type"] = json!(2);
        assert!(parse_interaction(&body.to_string()).is_err());
    }
}
