//! Failures of the field codec and its key material.

use thiserror::Error;

/// Everything the codec, key parser and key derivation can refuse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// The AEAD refused to seal the payload.
    #[error("cannot seal payload: {0}")]
    EncryptionFailed(String),

    /// Sealed bytes could not be opened: foreign key, tampering, truncation
    /// or a payload that is not a JSON object once decrypted.
    #[error("cannot open sealed payload: {0}")]
    DecryptionFailed(String),

    #[error("field key must be {expected} bytes, found {actual}")]
    #[allow(missing_docs)]
    InvalidKeyLength { expected: usize, actual: usize },

    /// `CR_ENCRYPTION_KEY` is not hexadecimal.
    #[error("field key is not hex: {0}")]
    InvalidKeyEncoding(String),

    /// PBKDF2 requested with fewer rounds than the floor.
    #[error("passphrase derivation needs at least {minimum} rounds, got {iterations}")]
    WeakKeyDerivation {
        /// Rounds requested.
        iterations: u32,
        /// Accepted floor.
        minimum: u32,
    },
}
