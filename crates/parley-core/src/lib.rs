//! # Parley Core
//!
//! Data model for the Parley interaction framework.
//!
//! This crate defines the types shared by every other layer:
//!
//! - [`interaction`] – inbound interaction events and their parser
//! - [`response`] – outbound response envelopes, replies, flags, attachments
//! - [`locale`] – the caller-owned localization bundle and locale fallback
//! - [`error`] – core error types
//!
//! Interactions are parsed once per request, are immutable afterwards, and
//! are discarded as soon as the response has been produced. Nothing in this
//! crate holds cross-request state.

pub mod error;
pub mod interaction;
pub mod locale;
pub mod response;

pub use error::{ParseError, ParseResult};
pub use interaction::{
    AutocompleteInteraction, CommandInteraction, CommandInvocation, ComponentInteraction,
    Interaction, InteractionCommon, InvokedOption, ModalInteraction, PingInteraction,
    UnknownInteraction, parse_interaction,
};
pub use locale::{CommandText, LocaleBundle};
pub use response::{
    Attachment, AttachmentMeta, CallbackData, InteractionResponse, MessageFlags, MessageReply,
    Outgoing, Reply, ResponseType,
};
