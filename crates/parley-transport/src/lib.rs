//! # Parley Transport
//!
//! The HTTP edge of the Parley interaction framework.
//!
//! - [`verify`] – Ed25519 signature verification over the raw request body
//! - [`encode`] – JSON and multipart encodings of outgoing responses
//! - [`server`] – the axum webhook route tying gate, parser, router, and
//!   encoder together
//!
//! The transport owns the HTTP error mapping: authentication failures are
//! an empty 401, malformed payloads a 400, unknown commands a 500. Handler
//! results and the fallback reply always leave as 200.

pub mod encode;
pub mod error;
pub mod server;
pub mod verify;

pub use encode::{EncodedBody, encode_outgoing};
pub use error::{TransportError, TransportResult};
pub use server::{ListenerHandle, SIGNATURE_HEADER, TIMESTAMP_HEADER, WebhookState, serve};
pub use verify::SignatureVerifier;
