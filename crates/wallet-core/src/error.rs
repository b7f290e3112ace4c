//! Error types for wallet-core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for wallet operations
pub type Result<T> = std::result::Result<T, WalletError>;

/// Wallet error types
#[derive(Error, Debug)]
pub enum WalletError {
    /// The cryptographic primitives were not compiled in.
    #[error("Cryptography support is unavailable: {0}")]
    ConfigurationError(String),

    /// Wrong password, tampered token or corrupted ciphertext. Never says
    /// which check failed.
    #[error("Wrong password or corrupted wallet")]
    DecryptionError,

    #[error("Encryption failed: {0}")]
    EncryptionError(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivationError(String),

    #[error("Wallet file not found at {}", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("Invalid wallet file format at {}: {reason}", .path.display())]
    FileFormat { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl WalletError {
    #[cfg(not(feature = "crypto"))]
    pub(crate) fn crypto_unavailable() -> Self {
        Self::ConfigurationError(
            "wallet-core was built without the `crypto` feature; rebuild with \
             `--features crypto` (enabled by default)"
                .to_string(),
        )
    }
}
