//! Declarative command descriptors.
//!
//! A [`CommandSpec`] is the metadata half of a command: its name, kind,
//! localized text, and option declarations. The executable half is the
//! handler passed alongside it to
//! [`CommandRegistry::register`](crate::CommandRegistry::register).
//!
//! The kind determines which metadata is carried on the wire when the
//! registry is enumerated for the platform's bulk sync call: slash commands
//! carry a description (plus localizations) and options, context-menu
//! commands carry name localizations only.

use std::collections::HashMap;

use serde_json::{Map, Value, json};

/// Option type discriminants as the platform defines them.
pub mod option_type {
    /// A nested sub-command.
    pub const SUB_COMMAND: u8 = 1;
    /// A string option.
    pub const STRING: u8 = 3;
    /// An integer option.
    pub const INTEGER: u8 = 4;
    /// A boolean option.
    pub const BOOLEAN: u8 = 5;
    /// A user reference.
    pub const USER: u8 = 6;
    /// A channel reference.
    pub const CHANNEL: u8 = 7;
    /// A floating-point option.
    pub const NUMBER: u8 = 10;
}

/// Command kind discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// A chat-input (slash) command.
    Slash = 1,
    /// A user context-menu command.
    User = 2,
    /// A message context-menu command.
    Message = 3,
}

/// A declared command option.
///
/// Autocomplete suggestions are attached at declaration time: the values in
/// `suggestions` are the choice payloads returned verbatim when the user is
/// typing this option. No user code runs on the autocomplete path.
#[derive(Debug, Clone)]
pub struct CommandOption {
    /// Option name, the key matched against invocation options.
    pub name: String,
    /// Option type discriminant (see [`option_type`]).
    pub kind: u8,
    /// Option description shown in the command picker.
    pub description: Option<String>,
    /// Whether the user must supply this option.
    pub required: bool,
    /// Autocomplete choice payloads (strings or numbers).
    pub suggestions: Vec<Value>,
}

impl CommandOption {
    /// Declares an option with the given name and type.
    pub fn new(name: impl Into<String>, kind: u8) -> Self {
        Self {
            name: name.into(),
            kind,
            description: None,
            required: false,
            suggestions: Vec::new(),
        }
    }

    /// Sets the option description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Marks the option as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Attaches autocomplete suggestions.
    pub fn suggest<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.suggestions.extend(values.into_iter().map(Into::into));
        self
    }

    /// Projects the option into its bulk-sync wire shape.
    pub(crate) fn wire(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("type".into(), json!(self.kind));
        obj.insert("name".into(), json!(self.name));
        if let Some(description) = &self.description {
            obj.insert("description".into(), json!(description));
        }
        if self.required {
            obj.insert("required".into(), json!(true));
        }
        if !self.suggestions.is_empty() {
            obj.insert("autocomplete".into(), json!(true));
        }
        Value::Object(obj)
    }
}

/// Declarative metadata for one command.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    /// Command name, the registry key.
    pub name: String,
    /// Command kind.
    pub kind: CommandKind,
    /// Base description (slash commands only).
    pub description: Option<String>,
    /// Locale tag → localized description.
    pub description_localizations: HashMap<String, String>,
    /// Locale tag → localized name (context-menu commands).
    pub name_localizations: HashMap<String, String>,
    /// Declared options, in order.
    pub options: Vec<CommandOption>,
    /// Fallback error template when the locale bundle carries none.
    pub error_template: Option<String>,
}

impl CommandSpec {
    fn new(name: impl Into<String>, kind: CommandKind) -> Self {
        Self {
            name: name.into(),
            kind,
            description: None,
            description_localizations: HashMap::new(),
            name_localizations: HashMap::new(),
            options: Vec::new(),
            error_template: None,
        }
    }

    /// Declares a slash command. A description is mandatory for this kind.
    pub fn slash(name: impl Into<String>, description: impl Into<String>) -> Self {
        let mut spec = Self::new(name, CommandKind::Slash);
        spec.description = Some(description.into());
        spec
    }

    /// Declares a user context-menu command.
    pub fn user(name: impl Into<String>) -> Self {
        Self::new(name, CommandKind::User)
    }

    /// Declares a message context-menu command.
    pub fn message(name: impl Into<String>) -> Self {
        Self::new(name, CommandKind::Message)
    }

    /// Adds a localized description.
    pub fn description_localization(
        mut self,
        locale: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        self.description_localizations
            .insert(locale.into(), text.into());
        self
    }

    /// Adds a localized name.
    pub fn name_localization(
        mut self,
        locale: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        self.name_localizations.insert(locale.into(), text.into());
        self
    }

    /// Declares an option.
    pub fn option(mut self, option: CommandOption) -> Self {
        self.options.push(option);
        self
    }

    /// Sets the fallback error template.
    pub fn error_template(mut self, template: impl Into<String>) -> Self {
        self.error_template = Some(template.into());
        self
    }

    /// Resolves the description for a locale: localization first, base
    /// description as fallback.
    pub fn localized_description(&self, locale: Option<&str>) -> Option<&str> {
        locale
            .and_then(|l| self.description_localizations.get(l))
            .or(self.description.as_ref())
            .map(String::as_str)
    }

    /// Projects the command into its bulk-sync wire shape.
    pub(crate) fn wire(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("name".into(), json!(self.name));
        obj.insert("type".into(), json!(self.kind as u8));
        match self.kind {
            CommandKind::Slash => {
                if let Some(description) = &self.description {
                    obj.insert("description".into(), json!(description));
                }
                if !self.description_localizations.is_empty() {
                    obj.insert(
                        "description_localizations".into(),
                        json!(self.description_localizations),
                    );
                }
                if !self.options.is_empty() {
                    obj.insert(
                        "options".into(),
                        Value::Array(self.options.iter().map(CommandOption::wire).collect()),
                    );
                }
            }
            CommandKind::User | CommandKind::Message => {
                if !self.name_localizations.is_empty() {
                    obj.insert("name_localizations".into(), json!(self.name_localizations));
                }
            }
        }
        Value::Object(obj)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slash_wire_shape_carries_description_and_options() {
        let spec = CommandSpec::slash("weather", "Look up the weather")
            .description_localization("ja", "天気を調べる")
            .option(
                CommandOption::new("city", option_type::STRING)
                    .description("City name")
                    .required()
                    .suggest(["Tokyo", "Kyoto"]),
            );
        let wire = spec.wire();
        assert_eq!(wire["name"], "weather");
        assert_eq!(wire["type"], 1);
        assert_eq!(wire["description"], "Look up the weather");
        assert_eq!(wire["description_localizations"]["ja"], "天気を調べる");
        assert_eq!(wire["options"][0]["name"], "city");
        assert_eq!(wire["options"][0]["type"], 3);
        assert_eq!(wire["options"][0]["required"], true);
        assert_eq!(wire["options"][0]["autocomplete"], true);
    }

    #[test]
    fn context_menu_wire_shape_carries_name_localizations() {
        let spec = CommandSpec::user("Report").name_localization("fr", "Signaler");
        let wire = spec.wire();
        assert_eq!(wire["type"], 2);
        assert_eq!(wire["name_localizations"]["fr"], "Signaler");
        assert!(wire.get("description").is_none());
    }

    #[test]
    fn localized_description_falls_back_to_base() {
        let spec = CommandSpec::slash("ping", "Check liveness")
            .description_localization("ja", "生存確認");
        assert_eq!(spec.localized_description(Some("ja")), Some("生存確認"));
        assert_eq!(
            spec.localized_description(Some("fr")),
            Some("Check liveness")
        );
        assert_eq!(spec.localized_description(None), Some("Check liveness"));
    }
}
