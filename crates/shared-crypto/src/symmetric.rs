//! # Symmetric Encryption
//!
//! XChaCha20-Poly1305 under the single process-wide field key.
//!
//! The 192-bit nonce is drawn from the OS generator on every call; with
//! that width random nonces do not collide in practice, so no counter
//! state is kept. The Poly1305 tag makes any change to nonce or ciphertext
//! fail decryption.

use crate::CryptoError;
use chacha20poly1305::{
    aead::{Aead, KeyInit},
    XChaCha20Poly1305, XNonce,
};
use rand::{rngs::OsRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Key length in bytes.
pub const KEY_LEN: usize = 32;

/// Nonce length in bytes.
pub const NONCE_LEN: usize = 24;

/// The field key. Wiped on drop; never printed.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey([u8; KEY_LEN]);

impl SecretKey {
    /// Wrap raw key bytes.
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Parse the `CR_ENCRYPTION_KEY` form: 64 hex characters.
    pub fn from_hex(encoded: &str) -> Result<Self, CryptoError> {
        let mut decoded = hex::decode(encoded.trim())
            .map_err(|e| CryptoError::InvalidKeyEncoding(e.to_string()))?;
        let parsed = <[u8; KEY_LEN]>::try_from(decoded.as_slice()).map_err(|_| {
            CryptoError::InvalidKeyLength {
                expected: KEY_LEN,
                actual: decoded.len(),
            }
        });
        decoded.zeroize();
        parsed.map(Self)
    }

    /// Fresh key from the OS generator.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_LEN];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    fn cipher(&self) -> XChaCha20Poly1305 {
        XChaCha20Poly1305::new((&self.0).into())
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

/// Per-message nonce, stored in front of the ciphertext.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Nonce([u8; NONCE_LEN]);

impl Nonce {
    /// Wrap nonce bytes read back from storage.
    pub fn from_bytes(bytes: [u8; NONCE_LEN]) -> Self {
        Self(bytes)
    }

    fn random() -> Self {
        let mut bytes = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Raw nonce bytes.
    pub fn as_bytes(&self) -> &[u8; NONCE_LEN] {
        &self.0
    }

    fn as_xnonce(&self) -> &XNonce {
        XNonce::from_slice(&self.0)
    }
}

/// Encrypt under a fresh nonce. Returns `(ciphertext || tag, nonce)`.
pub fn encrypt(key: &SecretKey, plaintext: &[u8]) -> Result<(Vec<u8>, Nonce), CryptoError> {
    let nonce = Nonce::random();
    let sealed = key
        .cipher()
        .encrypt(nonce.as_xnonce(), plaintext)
        .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;
    Ok((sealed, nonce))
}

/// Decrypt and authenticate.
///
/// # Errors
///
/// `CryptoError::DecryptionFailed` for a foreign key, a modified
/// ciphertext or a mismatched nonce.
pub fn decrypt(key: &SecretKey, ciphertext: &[u8], nonce: &Nonce) -> Result<Vec<u8>, CryptoError> {
    key.cipher()
        .decrypt(nonce.as_xnonce(), ciphertext)
        .map_err(|_| CryptoError::DecryptionFailed("authentication tag mismatch".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const VITALS: &[u8] = b"{\"pressione_arteriosa_mmhg\":\"120/80\",\"spo2\":97}";

    #[test]
    fn test_vitals_survive_encryption() {
        let key = SecretKey::generate();
        let (ciphertext, nonce) = encrypt(&key, VITALS).unwrap();
        assert_ne!(&ciphertext[..VITALS.len()], VITALS);
        assert_eq!(ciphertext.len(), VITALS.len() + 16);
        assert_eq!(decrypt(&key, &ciphertext, &nonce).unwrap(), VITALS);
    }

    #[test]
    fn test_foreign_key_is_rejected() {
        let (ciphertext, nonce) = encrypt(&SecretKey::from_bytes([1; KEY_LEN]), VITALS).unwrap();
        let result = decrypt(&SecretKey::from_bytes([2; KEY_LEN]), &ciphertext, &nonce);
        assert!(matches!(result, Err(CryptoError::DecryptionFailed(_))));
    }

    #[test]
    fn test_any_flipped_bit_is_rejected() {
        let key = SecretKey::generate();
        let (ciphertext, nonce) = encrypt(&key, VITALS).unwrap();

        let mut body = ciphertext.clone();
        let last = body.len() - 1;
        body[last] ^= 0x01;
        assert!(decrypt(&key, &body, &nonce).is_err());

        let mut other = *nonce.as_bytes();
        other[0] ^= 0x80;
        assert!(decrypt(&key, &ciphertext, &Nonce::from_bytes(other)).is_err());
    }

    #[test]
    fn test_each_call_draws_a_new_nonce() {
        let key = SecretKey::generate();
        let (_, first) = encrypt(&key, VITALS).unwrap();
        let (_, second) = encrypt(&key, VITALS).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_key_parsing() {
        let key = SecretKey::from_hex(&"AB".repeat(KEY_LEN)).unwrap();
        assert_eq!(key.as_bytes(), &[0xAB; KEY_LEN]);

        assert!(matches!(
            SecretKey::from_hex("abcd"),
            Err(CryptoError::InvalidKeyLength {
                expected: 32,
                actual: 2
            })
        ));
        assert!(matches!(
            SecretKey::from_hex(&"zz".repeat(KEY_LEN)),
            Err(CryptoError::InvalidKeyEncoding(_))
        ));
    }

    #[test]
    fn test_key_debug_is_redacted() {
        let key = SecretKey::from_bytes([0x11; KEY_LEN]);
        assert_eq!(format!("{:?}", key), "SecretKey(<redacted>)");
    }
}
