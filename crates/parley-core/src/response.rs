//! Outbound response model.
//!
//! Handlers produce a [`Reply`], a tagged sum of plain text and structured
//! messages, which converges on a single [`InteractionResponse`] wire shape.
//! The envelope serializes as `{"type": <int>, "data": {...}}`; a Pong
//! carries no data body at all.
//!
//! Attachments are carried out-of-band in [`Outgoing::files`]: only their
//! metadata appears inside the JSON payload, the binary blobs become
//! `files[<id>]` parts of the multipart encoding at the transport layer.

use bitflags::bitflags;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

bitflags! {
    /// Message flag bitmask attached to structured replies.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
    #[serde(transparent)]
    pub struct MessageFlags: u32 {
        /// Reply is stripped of link embeds.
        const SUPPRESS_EMBEDS = 1 << 2;
        /// Reply is visible only to the invoking user.
        const EPHEMERAL = 1 << 6;
    }
}

/// Wire discriminant of an interaction response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseType {
    /// Answer to a liveness ping.
    Pong = 1,
    /// A message shown in the channel the interaction came from.
    ChannelMessageWithSource = 4,
    /// Suggested choices for an autocomplete query.
    AutocompleteResult = 8,
}

impl Serialize for ResponseType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

impl<'de> Deserialize<'de> for ResponseType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match u8::deserialize(deserializer)? {
            1 => Ok(Self::Pong),
            4 => Ok(Self::ChannelMessageWithSource),
            8 => Ok(Self::AutocompleteResult),
            other => Err(D::Error::custom(format!(
                "unknown response type discriminant: {other}"
            ))),
        }
    }
}

/// Attachment metadata as it appears inside the JSON payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentMeta {
    /// Attachment ID, also the multipart field name (`files[<id>]`).
    pub id: String,
    /// File name presented to the user.
    pub filename: String,
    /// Optional alt text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A binary attachment produced by a handler.
#[derive(Debug, Clone)]
pub struct Attachment {
    /// Attachment ID, unique within the reply.
    pub id: String,
    /// File name presented to the user.
    pub filename: String,
    /// Optional alt text.
    pub description: Option<String>,
    /// Raw file contents.
    pub data: Vec<u8>,
}

impl Attachment {
    /// Creates an attachment from raw bytes.
    pub fn new(id: impl Into<String>, filename: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            id: id.into(),
            filename: filename.into(),
            description: None,
            data,
        }
    }

    /// Sets the alt text.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Projects the metadata half of the attachment.
    pub fn meta(&self) -> AttachmentMeta {
        AttachmentMeta {
            id: self.id.clone(),
            filename: self.filename.clone(),
            description: self.description.clone(),
        }
    }
}

/// The `data` body of a response envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallbackData {
    /// Message text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Rich embed payloads, passed through unchanged.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Value>,
    /// Composed flag bitmask.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<MessageFlags>,
    /// Attachment metadata; blobs travel in the multipart body.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<AttachmentMeta>,
    /// Autocomplete suggestions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<Value>>,
}

/// The response envelope sent back to the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionResponse {
    /// Response type discriminant.
    #[serde(rename = "type")]
    pub kind: ResponseType,
    /// Response body; absent for Pong.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<CallbackData>,
}

impl InteractionResponse {
    /// Answer to a liveness ping. Carries no data body.
    pub fn pong() -> Self {
        Self {
            kind: ResponseType::Pong,
            data: None,
        }
    }

    /// A channel message response.
    pub fn channel_message(data: CallbackData) -> Self {
        Self {
            kind: ResponseType::ChannelMessageWithSource,
            data: Some(data),
        }
    }

    /// An autocomplete result carrying the given choices.
    pub fn autocomplete(choices: Vec<Value>) -> Self {
        Self {
            kind: ResponseType::AutocompleteResult,
            data: Some(CallbackData {
                choices: Some(choices),
                ..CallbackData::default()
            }),
        }
    }
}

/// A structured reply produced by a command handler.
#[derive(Debug, Clone, Default)]
pub struct MessageReply {
    /// Message text.
    pub content: Option<String>,
    /// Rich embed payloads, passed through unchanged.
    pub embeds: Vec<Value>,
    /// Make the reply visible only to the invoking user.
    pub ephemeral: bool,
    /// Strip link embeds from the reply.
    pub suppress_embeds: bool,
    /// Binary attachments.
    pub attachments: Vec<Attachment>,
}

impl MessageReply {
    /// Creates a reply with the given text.
    pub fn content(text: impl Into<String>) -> Self {
        Self {
            content: Some(text.into()),
            ..Self::default()
        }
    }

    /// Marks the reply ephemeral.
    pub fn ephemeral(mut self) -> Self {
        self.ephemeral = true;
        self
    }

    /// Strips link embeds.
    pub fn suppress_embeds(mut self) -> Self {
        self.suppress_embeds = true;
        self
    }

    /// Adds an embed payload.
    pub fn embed(mut self, embed: Value) -> Self {
        self.embeds.push(embed);
        self
    }

    /// Adds an attachment.
    pub fn attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Composes the flag bitmask for this reply.
    pub fn flags(&self) -> MessageFlags {
        let mut flags = MessageFlags::empty();
        if self.ephemeral {
            flags |= MessageFlags::EPHEMERAL;
        }
        if self.suppress_embeds {
            flags |= MessageFlags::SUPPRESS_EMBEDS;
        }
        flags
    }
}

/// A handler's logical reply.
///
/// The two shapes converge on the same wire envelope: a plain text reply is
/// a channel message carrying only `content`, a structured reply carries the
/// composed flag bitmask alongside its other fields.
#[derive(Debug, Clone)]
pub enum Reply {
    /// Plain text.
    Text(String),
    /// Structured message with flags and attachments.
    Message(MessageReply),
}

impl Reply {
    /// Convenience constructor for a plain text reply.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Converts the reply into the outgoing envelope plus its file blobs.
    pub fn into_outgoing(self) -> Outgoing {
        match self {
            Self::Text(content) => Outgoing::from(InteractionResponse::channel_message(
                CallbackData {
                    content: Some(content),
                    ..CallbackData::default()
                },
            )),
            Self::Message(reply) => {
                let flags = reply.flags();
                let data = CallbackData {
                    content: reply.content,
                    embeds: reply.embeds,
                    flags: Some(flags),
                    attachments: reply.attachments.iter().map(Attachment::meta).collect(),
                    choices: None,
                };
                Outgoing {
                    response: InteractionResponse::channel_message(data),
                    files: reply.attachments,
                }
            }
        }
    }
}

impl From<String> for Reply {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Reply {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<MessageReply> for Reply {
    fn from(reply: MessageReply) -> Self {
        Self::Message(reply)
    }
}

/// A complete outgoing response: the JSON envelope plus any file blobs that
/// must travel as multipart parts.
#[derive(Debug, Clone)]
pub struct Outgoing {
    /// The response envelope.
    pub response: InteractionResponse,
    /// Binary attachments, in `files[<id>]` order.
    pub files: Vec<Attachment>,
}

impl From<InteractionResponse> for Outgoing {
    fn from(response: InteractionResponse) -> Self {
        Self {
            response,
            files: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ephemeral_sets_bit_six() {
        let reply = MessageReply::content("secret").ephemeral();
        assert_eq!(reply.flags().bits(), 64);
    }

    #[test]
    fn both_flags_compose_to_68() {
        let reply = MessageReply::content("quiet").ephemeral().suppress_embeds();
        assert_eq!(reply.flags().bits(), 68);
    }

    #[test]
    fn no_flags_is_zero() {
        assert_eq!(MessageReply::content("plain").flags().bits(), 0);
    }

    #[test]
    fn text_reply_round_trips() {
        let out = Reply::text("hello").into_outgoing();
        let encoded = serde_json::to_string(&out.response).unwrap();
        let decoded: InteractionResponse = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded.kind, ResponseType::ChannelMessageWithSource);
        assert_eq!(decoded.data.unwrap().content.as_deref(), Some("hello"));
    }

    #[test]
    fn text_reply_carries_no_flags() {
        let out = Reply::text("hello").into_outgoing();
        let v = serde_json::to_value(&out.response).unwrap();
        assert_eq!(v, json!({"type": 4, "data": {"content": "hello"}}));
    }

    #[test]
    fn structured_reply_serializes_flags() {
        let out = Reply::Message(MessageReply::content("hi").ephemeral()).into_outgoing();
        let v = serde_json::to_value(&out.response).unwrap();
        assert_eq!(v, json!({"type": 4, "data": {"content": "hi", "flags": 64}}));
    }

    #[test]
    fn pong_has_no_data_body() {
        let v = serde_json::to_value(InteractionResponse::pong()).unwrap();
        assert_eq!(v, json!({"type": 1}));
    }

    #[test]
    fn attachments_split_into_meta_and_blobs() {
        let reply = MessageReply::content("map")
            .attachment(Attachment::new("0", "map.png", vec![1, 2, 3]).description("a map"));
        let out = Reply::Message(reply).into_outgoing();
        assert_eq!(out.files.len(), 1);
        let data = out.response.data.unwrap();
        assert_eq!(data.attachments[0].filename, "map.png");
        assert_eq!(data.attachments[0].description.as_deref(), Some("a map"));
    }

    #[test]
    fn autocomplete_envelope_carries_choices() {
        let v =
            serde_json::to_value(InteractionResponse::autocomplete(vec![json!("Tokyo")])).unwrap();
        assert_eq!(v, json!({"type": 8, "data": {"choices": ["Tokyo"]}}));
    }
}
