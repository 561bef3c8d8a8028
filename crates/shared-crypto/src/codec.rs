//! # Field Encryption Codec
//!
//! Seals structured values into an opaque string for storage and opens them
//! back. The text form is `hex(nonce || ciphertext)` where the plaintext is
//! the canonical JSON of the value.
//!
//! A value that cannot be opened is reported as
//! [`CryptoError::DecryptionFailed`]. Callers decide how to surface it; the
//! codec never substitutes an empty value.

use crate::kdf::KeySource;
use crate::symmetric::{self, Nonce, SecretKey, NONCE_LEN};
use crate::CryptoError;
use serde_json::Value;
use shared_types::Payload;
use std::fmt;
use tracing::debug;

/// Poly1305 tag length; the shortest valid ciphertext is an empty plaintext plus tag.
const TAG_LEN: usize = 16;

/// Opaque at-rest representation of an encrypted payload.
#[derive(Clone, PartialEq, Eq)]
pub struct SealedPayload(String);

impl SealedPayload {
    /// Wrap a stored sealed string. No validation happens until it is opened.
    pub fn from_stored(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Stored text form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the stored text form.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for SealedPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SealedPayload({} chars)", self.0.len())
    }
}

/// Process-wide codec holding the single symmetric key.
pub struct FieldCodec {
    key: SecretKey,
}

impl FieldCodec {
    /// Create a codec from an already-resolved key.
    pub fn new(key: SecretKey) -> Self {
        Self { key }
    }

    /// Create a codec from a configured key source.
    pub fn from_source(source: &KeySource) -> Result<Self, CryptoError> {
        let key = source.resolve()?;
        debug!(
            password_derived = source.is_password_derived(),
            "[crypto] Field codec key resolved"
        );
        Ok(Self { key })
    }

    /// Seal any structured value.
    pub fn seal(&self, value: &Value) -> Result<SealedPayload, CryptoError> {
        let plaintext = value.to_string();
        let (ciphertext, nonce) = symmetric::encrypt(&self.key, plaintext.as_bytes())?;

        let mut blob = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        blob.extend_from_slice(nonce.as_bytes());
        blob.extend_from_slice(&ciphertext);
        Ok(SealedPayload(hex::encode(blob)))
    }

    /// Open a sealed value.
    ///
    /// # Errors
    ///
    /// `CryptoError::DecryptionFailed` for malformed hex, truncated input,
    /// a foreign key, tampering, or a plaintext that is not JSON.
    pub fn open(&self, sealed: &SealedPayload) -> Result<Value, CryptoError> {
        let blob = hex::decode(sealed.as_str())
            .map_err(|e| CryptoError::DecryptionFailed(format!("malformed sealed text: {}", e)))?;

        if blob.len() < NONCE_LEN + TAG_LEN {
            return Err(CryptoError::DecryptionFailed(format!(
                "sealed value too short: {} bytes",
                blob.len()
            )));
        }

        let (nonce_bytes, ciphertext) = blob.split_at(NONCE_LEN);
        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(nonce_bytes);

        let plaintext = symmetric::decrypt(&self.key, ciphertext, &Nonce::from_bytes(nonce))?;
        serde_json::from_slice(&plaintext)
            .map_err(|e| CryptoError::DecryptionFailed(format!("plaintext is not JSON: {}", e)))
    }

    /// Seal an entry payload.
    pub fn seal_payload(&self, payload: &Payload) -> Result<SealedPayload, CryptoError> {
        self.seal(&Value::Object(payload.clone()))
    }

    /// Open an entry payload; a sealed non-object is a decryption failure.
    pub fn open_payload(&self, sealed: &SealedPayload) -> Result<Payload, CryptoError> {
        match self.open(sealed)? {
            Value::Object(map) => Ok(map),
            other => Err(CryptoError::DecryptionFailed(format!(
                "sealed value is not an object but {}",
                json_kind(&other)
            ))),
        }
    }
}

impl fmt::Debug for FieldCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldCodec").field("key", &self.key).finish()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
