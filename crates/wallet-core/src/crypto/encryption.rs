//! Fernet authenticated encryption
//!
//! Token layout (before URL-safe base64):
//! - version: 1 byte, always `0x80`
//! - timestamp: 8 bytes, big-endian seconds since the Unix epoch
//! - IV: 16 bytes
//! - ciphertext: AES-128-CBC with PKCS7 padding, multiple of 16 bytes
//! - HMAC: 32 bytes, HMAC-SHA256 over everything before it
//!
//! Tokens produced here are interchangeable with any other Fernet
//! implementation given the same 32-byte key.

use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use rand::{rngs::OsRng, RngCore};
use tracing::debug;

use super::primitives::{aes128_cbc_decrypt, aes128_cbc_encrypt, hmac_sha256, verify_hmac_sha256};
use super::DerivedKey;
use crate::error::{Result, WalletError};

/// Fernet version byte
pub const FERNET_VERSION: u8 = 0x80;

const IV_LEN: usize = 16;
const HMAC_LEN: usize = 32;
const HEADER_LEN: usize = 1 + 8 + IV_LEN;
/// Header, one cipher block, HMAC
const MIN_TOKEN_LEN: usize = HEADER_LEN + 16 + HMAC_LEN;

/// Tokens stamped further than this in the future are rejected when a TTL is enforced
const MAX_CLOCK_SKEW_SECS: u64 = 60;

/// Parsed Fernet token
#[derive(Debug, Clone)]
pub struct FernetToken {
    /// Creation time, seconds since the Unix epoch
    pub timestamp: u64,
    /// Initialization vector for CBC
    pub iv: [u8; IV_LEN],
    /// AES-128-CBC ciphertext
    pub ciphertext: Vec<u8>,
    /// HMAC-SHA256 over version, timestamp, IV and ciphertext
    pub hmac: [u8; HMAC_LEN],
}

impl FernetToken {
    /// Bytes covered by the HMAC
    fn signed_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(HEADER_LEN + self.ciphertext.len());
        bytes.push(FERNET_VERSION);
        bytes.extend_from_slice(&self.timestamp.to_be_bytes());
        bytes.extend_from_slice(&self.iv);
        bytes.extend_from_slice(&self.ciphertext);
        bytes
    }

    /// Raw token bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = self.signed_bytes();
        bytes.extend_from_slice(&self.hmac);
        bytes
    }

    /// Parse raw token bytes. Structural problems are reported as
    /// [`WalletError::DecryptionError`] like every other decryption failure.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < MIN_TOKEN_LEN {
            debug!("Fernet token too short: {} bytes", bytes.len());
            return Err(WalletError::DecryptionError);
        }
        if bytes[0] != FERNET_VERSION {
            debug!("Unexpected Fernet version byte");
            return Err(WalletError::DecryptionError);
        }

        let body_end = bytes.len() - HMAC_LEN;
        let ciphertext = bytes[HEADER_LEN..body_end].to_vec();
        if ciphertext.len() % 16 != 0 {
            debug!("Fernet ciphertext is not block aligned");
            return Err(WalletError::DecryptionError);
        }

        let mut ts = [0u8; 8];
        ts.copy_from_slice(&bytes[1..9]);
        let mut iv = [0u8; IV_LEN];
        iv.copy_from_slice(&bytes[9..HEADER_LEN]);
        let mut hmac = [0u8; HMAC_LEN];
        hmac.copy_from_slice(&bytes[body_end..]);

        Ok(Self {
            timestamp: u64::from_be_bytes(ts),
            iv,
            ciphertext,
            hmac,
        })
    }

    /// Parse the URL-safe base64 text form
    pub fn from_string(s: &str) -> Result<Self> {
        let bytes = URL_SAFE.decode(s.trim()).map_err(|e| {
            debug!("Fernet token is not valid base64: {}", e);
            WalletError::DecryptionError
        })?;
        Self::from_bytes(&bytes)
    }
}

impl std::fmt::Display for FernetToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&URL_SAFE.encode(self.to_bytes()))
    }
}

fn now_secs() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp()).unwrap_or(0)
}

/// Encrypt with an explicit timestamp and IV
pub(crate) fn encrypt_with(
    plaintext: &[u8],
    key: &DerivedKey,
    timestamp: u64,
    iv: [u8; IV_LEN],
) -> Result<FernetToken> {
    let ciphertext = aes128_cbc_encrypt(key.encryption_key(), &iv, plaintext)?;

    let mut token = FernetToken {
        timestamp,
        iv,
        ciphertext,
        hmac: [0u8; HMAC_LEN],
    };
    token.hmac = hmac_sha256(key.signing_key(), &token.signed_bytes())?;

    Ok(token)
}

/// Encrypt plaintext into a Fernet token
///
/// # Arguments
/// * `plaintext` - The data to encrypt
/// * `key` - The 256-bit derived key (signing half + encryption half)
pub fn encrypt(plaintext: &[u8], key: &DerivedKey) -> Result<FernetToken> {
    let mut iv = [0u8; IV_LEN];
    OsRng.fill_bytes(&mut iv);

    encrypt_with(plaintext, key, now_secs(), iv)
}

/// Encrypt a string and return the token text
pub fn encrypt_string(plaintext: &str, key: &DerivedKey) -> Result<String> {
    let token = encrypt(plaintext.as_bytes(), key)?;
    Ok(token.to_string())
}

/// Verify and decrypt a Fernet token
///
/// The HMAC is checked in constant time before any decryption happens.
/// With `ttl` set, tokens older than `ttl` seconds (or stamped too far in
/// the future) are rejected as well.
pub fn decrypt(token: &FernetToken, key: &DerivedKey, ttl: Option<u64>) -> Result<Vec<u8>> {
    if let Some(ttl) = ttl {
        let now = now_secs();
        if token.timestamp.saturating_add(ttl) < now {
            debug!("Fernet token expired");
            return Err(WalletError::DecryptionError);
        }
        if now.saturating_add(MAX_CLOCK_SKEW_SECS) < token.timestamp {
            debug!("Fernet token timestamp is in the future");
            return Err(WalletError::DecryptionError);
        }
    }

    verify_hmac_sha256(key.signing_key(), &token.signed_bytes(), &token.hmac)?;
    aes128_cbc_decrypt(key.encryption_key(), &token.iv, &token.ciphertext)
}

/// Decrypt token text and return the plaintext as a string
pub fn decrypt_string(token: &str, key: &DerivedKey) -> Result<String> {
    let token = FernetToken::from_string(token)?;
    let plaintext = decrypt(&token, key, None)?;
    String::from_utf8(plaintext).map_err(|_| WalletError::DecryptionError)
}

#[cfg(all(test, feature = "crypto"))]
mod tests {
    use super::*;
    use crate::crypto::key_derivation::{derive_key, KeyDerivationParams};

    fn test_key(password: &str) -> DerivedKey {
        derive_key(password, None, Some(KeyDerivationParams { iterations: 1_000 }))
            .unwrap()
            .0
    }

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let key = test_key("test-password");
        let plaintext = b"Hello, World!";

        let token = encrypt(plaintext, &key).unwrap();
        let decrypted = decrypt(&token, &key, None).unwrap();

        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_encrypt_string_decrypt_string_roundtrip() {
        let key = test_key("test-password");
        let long = "x".repeat(1000);

        for plaintext in ["w_abc123", "", "ünïcødé wallet ✓", long.as_str()] {
            let encrypted = encrypt_string(plaintext, &key).unwrap();
            assert_eq!(decrypt_string(&encrypted, &key).unwrap(), plaintext);
        }
    }

    #[test]
    fn test_token_layout() {
        let key = DerivedKey::new([5u8; 32]);
        let token = encrypt_with(b"hello", &key, 499_162_800, [0u8; 16]).unwrap();
        let bytes = token.to_bytes();

        assert_eq!(bytes[0], FERNET_VERSION);
        assert_eq!(&bytes[1..9], &499_162_800u64.to_be_bytes());
        assert_eq!(&bytes[9..25], &[0u8; 16]);
        // one padded block + hmac
        assert_eq!(bytes.len(), HEADER_LEN + 16 + HMAC_LEN);

        let text = token.to_string();
        assert!(text.starts_with("gAAAAA"));
        let parsed = FernetToken::from_string(&text).unwrap();
        assert_eq!(parsed.timestamp, 499_162_800);
        assert_eq!(parsed.hmac, token.hmac);
    }

    #[test]
    fn test_reference_vector() {
        let key = DerivedKey::from_encoded("cw_0x689RpI-jtRR7oE8h_eQsKImvJapLeSbXpwF4e4=").unwrap();
        let iv: [u8; 16] = std::array::from_fn(|i| i as u8);
        let expected = "gAAAAAAdwJ6wAAECAwQFBgcICQoLDA0ODy021cpGVWKZ_eEwCGM4BLLF_5CV9dOPmrhuVUPgJobwOz7JcbmrR64jVmpU4IwqDA==";

        let token = encrypt_with(b"hello", &key, 499_162_800, iv).unwrap();
        assert_eq!(token.to_string(), expected);
        assert_eq!(decrypt_string(expected, &key).unwrap(), "hello");
    }

    #[test]
    fn test_different_ivs_produce_different_tokens() {
        let key = test_key("test-password");

        let token1 = encrypt(b"same plaintext", &key).unwrap();
        let token2 = encrypt(b"same plaintext", &key).unwrap();

        assert_ne!(token1.iv, token2.iv);
        assert_ne!(token1.ciphertext, token2.ciphertext);
    }

    #[test]
    fn test_wrong_key_fails_decryption() {
        let key1 = test_key("password-one");
        let key2 = test_key("password-two");

        let token = encrypt(b"secret data", &key1).unwrap();
        let result = decrypt(&token, &key2, None);

        assert!(matches!(result, Err(WalletError::DecryptionError)));
    }

    #[test]
    fn test_tampering_fails_decryption() {
        let key = test_key("test-password");
        let token = encrypt(b"secret data", &key).unwrap();

        let mut tampered = token.clone();
        tampered.ciphertext[0] ^= 0xFF;
        assert!(matches!(decrypt(&tampered, &key, None), Err(WalletError::DecryptionError)));

        let mut tampered = token.clone();
        tampered.hmac[0] ^= 0xFF;
        assert!(matches!(decrypt(&tampered, &key, None), Err(WalletError::DecryptionError)));

        let mut tampered = token.clone();
        tampered.timestamp += 1;
        assert!(matches!(decrypt(&tampered, &key, None), Err(WalletError::DecryptionError)));

        let mut tampered = token;
        tampered.iv[3] ^= 0x01;
        assert!(matches!(decrypt(&tampered, &key, None), Err(WalletError::DecryptionError)));
    }

    #[test]
    fn test_ttl() {
        let key = DerivedKey::new([1u8; 32]);

        let old = encrypt_with(b"x", &key, now_secs() - 3_600, [2u8; 16]).unwrap();
        assert!(decrypt(&old, &key, None).is_ok());
        assert!(decrypt(&old, &key, Some(7_200)).is_ok());
        assert!(decrypt(&old, &key, Some(60)).is_err());

        let future = encrypt_with(b"x", &key, now_secs() + 3_600, [2u8; 16]).unwrap();
        assert!(decrypt(&future, &key, Some(60)).is_err());
    }

    #[test]
    fn test_malformed_tokens() {
        let key = DerivedKey::new([1u8; 32]);
        let valid = encrypt_with(b"x", &key, 1, [0u8; 16]).unwrap().to_bytes();

        assert!(FernetToken::from_string("not a token").is_err());
        assert!(FernetToken::from_bytes(&valid[..MIN_TOKEN_LEN - 1]).is_err());

        let mut wrong_version = valid.clone();
        wrong_version[0] = 0x81;
        assert!(FernetToken::from_bytes(&wrong_version).is_err());

        let mut unaligned = valid.clone();
        unaligned.insert(HEADER_LEN, 0);
        assert!(FernetToken::from_bytes(&unaligned).is_err());

        assert!(decrypt_string("", &key).is_err());
    }

    #[test]
    fn test_errors_do_not_leak_cause() {
        let key = test_key("right");
        let other = test_key("wrong");
        let text = encrypt_string("w_abc123", &key).unwrap();

        let wrong_key = decrypt_string(&text, &other).unwrap_err().to_string();
        let garbage = decrypt_string("gAAAAA", &key).unwrap_err().to_string();

        assert_eq!(wrong_key, garbage);
        assert!(!wrong_key.contains("w_abc123"));
    }
}
