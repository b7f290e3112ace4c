//! Secure memory handling with automatic zeroization

use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Length of a derived key in bytes
pub const KEY_LEN: usize = 32;

/// Key derived from a password - automatically zeroed when dropped
///
/// The first half signs Fernet tokens, the second half encrypts them.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Create a new key from raw bytes
    pub fn new(key: [u8; KEY_LEN]) -> Self {
        Self { key }
    }

    /// Get the key bytes (use carefully - avoid copying)
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.key
    }

    /// Create from a slice (must be exactly 32 bytes)
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        if slice.len() != KEY_LEN {
            return None;
        }
        let mut key = [0u8; KEY_LEN];
        key.copy_from_slice(slice);
        Some(Self { key })
    }

    /// URL-safe base64 form, the textual key format Fernet implementations exchange
    pub fn encoded(&self) -> String {
        URL_SAFE.encode(self.key)
    }

    /// Parse the URL-safe base64 form produced by [`DerivedKey::encoded`]
    pub fn from_encoded(encoded: &str) -> Option<Self> {
        let mut bytes = URL_SAFE.decode(encoded.trim()).ok()?;
        let key = Self::from_slice(&bytes);
        bytes.zeroize();
        key
    }

    pub(crate) fn signing_key(&self) -> &[u8] {
        &self.key[..KEY_LEN / 2]
    }

    pub(crate) fn encryption_key(&self) -> &[u8] {
        &self.key[KEY_LEN / 2..]
    }
}

impl Clone for DerivedKey {
    fn clone(&self) -> Self {
        Self { key: self.key }
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Decrypted secret value - automatically zeroed when dropped
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SecretString {
    value: String,
}

impl SecretString {
    /// Create a new secret string
    pub fn new(value: String) -> Self {
        Self { value }
    }

    /// Get the secret value (use carefully)
    pub fn expose(&self) -> &str {
        &self.value
    }

    /// Consume and return the inner value
    pub fn into_inner(mut self) -> String {
        std::mem::take(&mut self.value)
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretString")
            .field("value", &"[REDACTED]")
            .finish()
    }
}
