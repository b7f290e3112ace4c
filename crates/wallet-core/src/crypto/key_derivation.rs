//! Password-based key derivation using PBKDF2-HMAC-SHA256

use rand::{rngs::OsRng, RngCore};

use super::primitives::pbkdf2_sha256;
use super::secure_memory::{DerivedKey, KEY_LEN};
use crate::error::{Result, WalletError};

/// Length of a wallet salt in bytes
pub const SALT_LEN: usize = 16;

/// Default PBKDF2 iteration count
pub const DEFAULT_ITERATIONS: u32 = 100_000;

/// Random salt stored next to the ciphertext
pub type Salt = [u8; SALT_LEN];

/// Parameters for PBKDF2 key derivation
///
/// The wallet file does not record these, so whoever writes a wallet and
/// whoever reads it back must use the same values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyDerivationParams {
    /// Iteration count (default: 100 000)
    pub iterations: u32,
}

impl Default for KeyDerivationParams {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

/// Generate a cryptographically secure random salt
pub fn generate_salt() -> Salt {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    salt
}

/// Derive a 256-bit key from a password using PBKDF2-HMAC-SHA256
///
/// # Arguments
/// * `password` - The user's password (must not be empty)
/// * `salt` - Salt to reuse; a fresh one is generated when `None`
/// * `params` - Optional key derivation parameters
///
/// # Returns
/// The derived key together with the salt that produced it
pub fn derive_key(
    password: &str,
    salt: Option<&Salt>,
    params: Option<KeyDerivationParams>,
) -> Result<(DerivedKey, Salt)> {
    let params = params.unwrap_or_default();

    if password.is_empty() {
        return Err(WalletError::KeyDerivationError(
            "password must not be empty".to_string(),
        ));
    }
    if params.iterations == 0 {
        return Err(WalletError::KeyDerivationError(
            "iteration count must be at least 1".to_string(),
        ));
    }

    let salt = salt.copied().unwrap_or_else(generate_salt);

    let mut key_bytes = [0u8; KEY_LEN];
    pbkdf2_sha256(password.as_bytes(), &salt, params.iterations, &mut key_bytes)?;
    let key = DerivedKey::new(key_bytes);
    zeroize::Zeroize::zeroize(&mut key_bytes);

    Ok((key, salt))
}
