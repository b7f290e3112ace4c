//! # wallet-core
//!
//! Encrypted local wallet for aipseo:
//! - PBKDF2-HMAC-SHA256 key derivation from the wallet password
//! - Fernet tokens (AES-128-CBC + HMAC-SHA256) for the stored credential
//! - JSON wallet file `{"encrypted_data", "salt"}` with atomic replacement
//! - Zeroize-on-drop keys and decrypted credentials

pub mod crypto;
pub mod error;
pub mod storage;

pub use crypto::{
    decrypt_string, derive_key, encrypt_string, generate_salt, DerivedKey, KeyDerivationParams,
    SecretString,
};
pub use error::{Result, WalletError};
pub use storage::{EncryptedWalletRecord, WalletStore};

/// Default wallet file location, relative to the working directory
pub const DEFAULT_WALLET_PATH: &str = ".wallet.json";
