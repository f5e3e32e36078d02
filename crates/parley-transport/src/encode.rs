//! Wire encodings for outgoing responses.
//!
//! A response without attachments leaves as a plain JSON body. A response
//! with attachments leaves as `multipart/form-data`: the envelope travels in
//! a `payload_json` part, each attachment in a `files[<id>]` part carrying
//! the blob and filename.

use parley_core::{Attachment, Outgoing};
use uuid::Uuid;

use crate::error::TransportResult;

/// An encoded response body plus its content type.
#[derive(Debug, Clone)]
pub struct EncodedBody {
    /// Value for the `Content-Type` response header.
    pub content_type: String,
    /// The body bytes.
    pub bytes: Vec<u8>,
}

/// Encodes an outgoing response into its wire form.
pub fn encode_outgoing(outgoing: &Outgoing) -> TransportResult<EncodedBody> {
    let payload = serde_json::to_vec(&outgoing.response)?;
    if outgoing.files.is_empty() {
        return Ok(EncodedBody {
            content_type: "application/json".to_string(),
            bytes: payload,
        });
    }
    Ok(encode_multipart(&payload, &outgoing.files))
}

/// Builds the multipart body: one `payload_json` part, one `files[<id>]`
/// part per attachment.
fn encode_multipart(payload: &[u8], files: &[Attachment]) -> EncodedBody {
    let boundary = format!("parley-{}", Uuid::new_v4().simple());
    let mut bytes = Vec::new();

    push_part_header(
        &mut bytes,
        &boundary,
        "form-data; name=\"payload_json\"",
        "application/json",
    );
    bytes.extend_from_slice(payload);
    bytes.extend_from_slice(b"\r\n");

    for file in files {
        let disposition = format!(
            "form-data; name=\"files[{}]\"; filename=\"{}\"",
            file.id, file.filename
        );
        push_part_header(&mut bytes, &boundary, &disposition, "application/octet-stream");
        bytes.extend_from_slice(&file.data);
        bytes.extend_from_slice(b"\r\n");
    }

    bytes.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

    EncodedBody {
        content_type: format!("multipart/form-data; boundary={boundary}"),
        bytes,
    }
}

fn push_part_header(bytes: &mut Vec<u8>, boundary: &str, disposition: &str, content_type: &str) {
    bytes.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    bytes.extend_from_slice(format!("Content-Disposition: {disposition}\r\n").as_bytes());
    bytes.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_core::{InteractionResponse, MessageReply, Reply};

    #[test]
    fn attachment_free_response_is_plain_json() {
        let out = Outgoing::from(InteractionResponse::pong());
        let encoded = encode_outgoing(&out).unwrap();
        assert_eq!(encoded.content_type, "application/json");
        assert_eq!(encoded.bytes, br#"{"type":1}"#);
    }

    #[test]
    fn attachments_produce_multipart() {
        let reply = MessageReply::content("map")
            .attachment(Attachment::new("0", "map.png", vec![0x89, 0x50]));
        let out = Reply::Message(reply).into_outgoing();
        let encoded = encode_outgoing(&out).unwrap();

        assert!(encoded.content_type.starts_with("multipart/form-data; boundary="));
        let body = String::from_utf8_lossy(&encoded.bytes);
        assert!(body.contains("name=\"payload_json\""));
        assert!(body.contains("name=\"files[0]\"; filename=\"map.png\""));
        assert!(body.contains("Content-Type: application/json"));
        assert!(body.contains("Content-Type: application/octet-stream"));
    }

    #[test]
    fn multipart_body_is_terminated_by_closing_boundary() {
        let reply =
            MessageReply::content("x").attachment(Attachment::new("0", "a.txt", b"hi".to_vec()));
        let out = Reply::Message(reply).into_outgoing();
        let encoded = encode_outgoing(&out).unwrap();

        let boundary = encoded
            .content_type
            .rsplit_once("boundary=")
            .unwrap()
            .1
            .to_string();
        let body = String::from_utf8_lossy(&encoded.bytes);
        assert!(body.ends_with(&format!("--{boundary}--\r\n")));
    }

    #[test]
    fn each_attachment_gets_its_own_part() {
        let reply = MessageReply::content("two files")
            .attachment(Attachment::new("0", "a.txt", b"a".to_vec()))
            .attachment(Attachment::new("1", "b.txt", b"b".to_vec()));
        let out = Reply::Message(reply).into_outgoing();
        let encoded = encode_outgoing(&out).unwrap();
        let body = String::from_utf8_lossy(&encoded.bytes);
        assert!(body.contains("name=\"files[0]\""));
        assert!(body.contains("name=\"files[1]\""));
    }
}
