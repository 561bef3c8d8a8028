//! # Key Derivation
//!
//! The codec key comes from one of two sources:
//!
//! - a 32-byte secret provided as 64 hex characters (production), or
//! - a password + salt pair stretched with PBKDF2-HMAC-SHA256
//!   (non-production only, enforced by the engine configuration).

use crate::symmetric::{SecretKey, KEY_LEN};
use crate::CryptoError;
use sha2::Sha256;
use zeroize::Zeroize;

/// Iteration count used for password-derived keys.
pub const KDF_ITERATIONS: u32 = 100_000;

/// Where the process-wide codec key comes from.
#[derive(Clone)]
pub enum KeySource {
    /// Hex-encoded 32-byte secret.
    Secret(String),
    /// Password stretched with PBKDF2 over the given salt.
    Password {
        /// Master password.
        password: String,
        /// Salt, used as raw UTF-8 bytes.
        salt: String,
    },
}

impl KeySource {
    /// Whether the key is derived from a password rather than provided directly.
    pub fn is_password_derived(&self) -> bool {
        matches!(self, KeySource::Password { .. })
    }

    /// Resolve the source into a key.
    pub fn resolve(&self) -> Result<SecretKey, CryptoError> {
        match self {
            KeySource::Secret(encoded) => SecretKey::from_hex(encoded),
            KeySource::Password { password, salt } => {
                derive_key(password.as_bytes(), salt.as_bytes(), KDF_ITERATIONS)
            }
        }
    }
}

impl std::fmt::Debug for KeySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeySource::Secret(_) => f.write_str("KeySource::Secret(<redacted>)"),
            KeySource::Password { .. } => f.write_str("KeySource::Password(<redacted>)"),
        }
    }
}

impl Drop for KeySource {
    fn drop(&mut self) {
        match self {
            KeySource::Secret(encoded) => encoded.zeroize(),
            KeySource::Password { password, salt } => {
                password.zeroize();
                salt.zeroize();
            }
        }
    }
}

/// Derive a 32-byte key with PBKDF2-HMAC-SHA256.
///
/// # Errors
///
/// Returns `CryptoError::WeakKeyDerivation` when `iterations` is below
/// [`KDF_ITERATIONS`].
pub fn derive_key(
    password: &[u8],
    salt: &[u8],
    iterations: u32,
) -> Result<SecretKey, CryptoError> {
    if iterations < KDF_ITERATIONS {
        return Err(CryptoError::WeakKeyDerivation {
            iterations,
            minimum: KDF_ITERATIONS,
        });
    }

    let mut out = [0u8; KEY_LEN];
    pbkdf2::pbkdf2_hmac::<Sha256>(password, salt, iterations, &mut out);
    let key = SecretKey::from_bytes(out);
    out.zeroize();
    Ok(key)
}
