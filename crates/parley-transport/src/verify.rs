//! Request signature verification.
//!
//! The platform signs every webhook delivery with Ed25519 over the exact
//! byte concatenation of the timestamp header and the raw, unparsed request
//! body. Both the signature and the public key travel as fixed-length hex
//! strings.
//!
//! Verification is a pure function over its inputs; the HTTP layer decides
//! what a failure maps to (an empty 401, indistinguishable from a missing
//! header).

use ed25519_dalek::{PUBLIC_KEY_LENGTH, Signature, Verifier, VerifyingKey};

use crate::error::{TransportError, TransportResult};

/// Verifies webhook signatures against one application public key.
#[derive(Debug, Clone)]
pub struct SignatureVerifier {
    key: VerifyingKey,
}

impl SignatureVerifier {
    /// Builds a verifier from a hex-encoded Ed25519 public key.
    pub fn from_hex(public_key: &str) -> TransportResult<Self> {
        let bytes = hex::decode(public_key)
            .map_err(|e| TransportError::InvalidPublicKey(e.to_string()))?;
        let bytes: [u8; PUBLIC_KEY_LENGTH] = bytes.try_into().map_err(|b: Vec<u8>| {
            TransportError::InvalidPublicKey(format!(
                "expected {PUBLIC_KEY_LENGTH} bytes, got {}",
                b.len()
            ))
        })?;
        let key = VerifyingKey::from_bytes(&bytes)
            .map_err(|e| TransportError::InvalidPublicKey(e.to_string()))?;
        Ok(Self { key })
    }

    /// Checks a signature over `timestamp || body`.
    ///
    /// Any malformed signature (bad hex, wrong length) is an ordinary
    /// verification failure, not an error.
    pub fn verify(&self, timestamp: &str, body: &[u8], signature: &str) -> bool {
        let Ok(sig_bytes) = hex::decode(signature) else {
            return false;
        };
        let Ok(signature) = Signature::from_slice(&sig_bytes) else {
            return false;
        };
        let mut message = Vec::with_capacity(timestamp.len() + body.len());
        message.extend_from_slice(timestamp.as_bytes());
        message.extend_from_slice(body);
        self.key.verify(&message, &signature).is_ok()
    }
}
