//! # Payload Integrity Signature
//!
//! SHA-256 over the canonical (key-sorted) JSON text of a plaintext payload,
//! rendered as lowercase hex. Stored beside the sealed payload and recomputed
//! after every open.

use sha2::{Digest, Sha256};
use shared_types::Payload;

/// Compute the integrity signature of a payload.
pub fn payload_signature(payload: &Payload) -> String {
    // serde_json::Map is ordered by key, so this text is canonical.
    let canonical = serde_json::Value::Object(payload.clone()).to_string();
    hex::encode(Sha256::digest(canonical.as_bytes()))
}

/// Check a payload against a previously stored signature.
pub fn verify_payload_signature(payload: &Payload, signature: &str) -> bool {
    payload_signature(payload).eq_ignore_ascii_case(signature)
}
