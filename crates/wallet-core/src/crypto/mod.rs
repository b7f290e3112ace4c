//! Cryptographic primitives for the wallet file
//!
//! This module provides:
//! - PBKDF2-HMAC-SHA256 key derivation from passwords
//! - Fernet authenticated encryption (AES-128-CBC + HMAC-SHA256)
//! - Secure memory handling with zeroize

mod encryption;
mod key_derivation;
mod primitives;
mod secure_memory;

pub use encryption::{
    decrypt, decrypt_string, encrypt, encrypt_string, FernetToken, FERNET_VERSION,
};
pub use key_derivation::{
    derive_key, generate_salt, KeyDerivationParams, Salt, DEFAULT_ITERATIONS, SALT_LEN,
};
pub use primitives::{crypto_available, ensure_crypto_available};
pub use secure_memory::{DerivedKey, SecretString, KEY_LEN};
