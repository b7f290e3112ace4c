//! Encrypted wallet file
//!
//! A wallet is a small JSON document:
//!
//! ```json
//! {"encrypted_data": "<base64>", "salt": "<base64>"}
//! ```
//!
//! `encrypted_data` is the standard base64 encoding of the (ASCII) Fernet
//! token and `salt` the standard base64 encoding of the 16 salt bytes.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::crypto::{
    decrypt_string, derive_key, encrypt_string, ensure_crypto_available, KeyDerivationParams,
    Salt, SecretString, SALT_LEN,
};
use crate::error::{Result, WalletError};

/// On-disk wallet record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedWalletRecord {
    /// base64(Fernet token)
    pub encrypted_data: String,
    /// base64(salt)
    pub salt: String,
}

impl EncryptedWalletRecord {
    /// Encrypt a credential under a password with a fresh salt
    pub fn seal(credential: &str, password: &str, params: KeyDerivationParams) -> Result<Self> {
        let (key, salt) = derive_key(password, None, Some(params))?;
        let token = encrypt_string(credential, &key)?;

        Ok(Self {
            encrypted_data: STANDARD.encode(token.as_bytes()),
            salt: STANDARD.encode(salt),
        })
    }

    /// Decode the salt field
    pub fn salt_bytes(&self) -> std::result::Result<Salt, String> {
        let bytes = STANDARD
            .decode(self.salt.trim())
            .map_err(|e| format!("salt is not valid base64: {}", e))?;

        bytes.as_slice().try_into().map_err(|_| {
            format!("salt must be {} bytes, got {}", SALT_LEN, bytes.len())
        })
    }

    /// Decode the encrypted_data field into Fernet token text
    pub fn token(&self) -> std::result::Result<String, String> {
        let bytes = STANDARD
            .decode(self.encrypted_data.trim())
            .map_err(|e| format!("encrypted_data is not valid base64: {}", e))?;

        String::from_utf8(bytes).map_err(|_| "encrypted_data does not hold a token".to_string())
    }
}

/// Reads and writes password-protected wallet files
#[derive(Debug, Clone, Default)]
pub struct WalletStore {
    params: KeyDerivationParams,
}

impl WalletStore {
    /// Create a store with the default key derivation parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with custom key derivation parameters
    ///
    /// Wallets written with one set of parameters can only be read back
    /// with the same set.
    pub fn with_params(params: KeyDerivationParams) -> Self {
        Self { params }
    }

    /// Key derivation parameters in use
    pub fn params(&self) -> KeyDerivationParams {
        self.params
    }

    /// Check whether a wallet file is present at `path`
    pub fn exists(path: &Path) -> bool {
        path.is_file()
    }

    /// Encrypt `credential` under `password` and write it to `path`
    ///
    /// A fresh salt is generated on every write. The file is written to a
    /// temporary sibling first and renamed over `path`.
    pub async fn write(&self, path: &Path, credential: &str, password: &str) -> Result<()> {
        ensure_crypto_available()?;

        let record = EncryptedWalletRecord::seal(credential, password, self.params)?;
        let contents = serde_json::to_string(&record)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        // Write atomically using a temp file
        let temp_path = temp_path_for(path);
        tokio::fs::write(&temp_path, &contents).await?;
        restrict_permissions(&temp_path).await?;
        tokio::fs::rename(&temp_path, path).await?;

        debug!("Saved wallet to {:?}", path);
        Ok(())
    }

    /// Read the wallet at `path` and decrypt it with `password`
    pub async fn read(&self, path: &Path, password: &str) -> Result<SecretString> {
        ensure_crypto_available()?;

        let record = Self::load_record(path).await?;

        let format_error = |reason: String| WalletError::FileFormat {
            path: path.to_path_buf(),
            reason,
        };
        let salt = record.salt_bytes().map_err(format_error)?;
        let token = record.token().map_err(format_error)?;

        let (key, _) = derive_key(password, Some(&salt), Some(self.params))?;
        let credential = decrypt_string(&token, &key)?;

        debug!("Decrypted wallet at {:?}", path);
        Ok(SecretString::new(credential))
    }

    /// Parse the wallet record at `path` without decrypting it
    pub async fn load_record(path: &Path) -> Result<EncryptedWalletRecord> {
        let contents = match tokio::fs::read(path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(WalletError::FileNotFound {
                    path: path.to_path_buf(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_slice(&contents).map_err(|e| WalletError::FileFormat {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(unix)]
async fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).await?;
    Ok(())
}

#[cfg(not(unix))]
async fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
