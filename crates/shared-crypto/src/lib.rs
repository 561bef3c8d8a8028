//! # Shared Crypto - Field Encryption for Clinical Payloads
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `symmetric` | XChaCha20-Poly1305 | Authenticated encryption |
//! | `kdf` | PBKDF2-HMAC-SHA256 | Non-production key derivation |
//! | `codec` | hex(nonce ‖ ciphertext) over canonical JSON | Sealed payload at rest |
//! | `hashing` | SHA-256 | Payload integrity signature |
//!
//! ## Security Properties
//!
//! - **XChaCha20**: 192-bit random nonce per seal, constant-time ARX design
//! - **PBKDF2**: at least 100 000 iterations, refused below that
//! - **Keys**: zeroized on drop, never formatted by `Debug`
//! - **Failure**: a sealed value that cannot be opened is an error, never an
//!   empty payload

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod errors;
pub mod hashing;
pub mod kdf;
pub mod symmetric;

// Re-exports
pub use codec::{FieldCodec, SealedPayload};
pub use errors::CryptoError;
pub use hashing::{payload_signature, verify_payload_signature};
pub use kdf::{derive_key, KeySource, KDF_ITERATIONS};
pub use symmetric::{decrypt, encrypt, Nonce, SecretKey};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
