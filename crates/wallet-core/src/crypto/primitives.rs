//! Thin wrappers over the RustCrypto primitives.
//!
//! Everything here is compiled against the `crypto` feature. Without it the
//! same functions exist but fail with [`WalletError::ConfigurationError`], so
//! a build that lacks the primitives can never fall back to something weaker.

use crate::error::Result;
#[cfg(not(feature = "crypto"))]
use crate::error::WalletError;

#[cfg(feature = "crypto")]
mod imp {
    use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
    use hmac::{Hmac, Mac};
    use sha2::Sha256;

    use crate::error::{Result, WalletError};

    type HmacSha256 = Hmac<Sha256>;
    type Aes128CbcEnc = cbc::Encryptor<aes::Aes128>;
    type Aes128CbcDec = cbc::Decryptor<aes::Aes128>;

    pub fn pbkdf2_sha256(password: &[u8], salt: &[u8], rounds: u32, out: &mut [u8]) -> Result<()> {
        pbkdf2::pbkdf2::<HmacSha256>(password, salt, rounds, out)
            .map_err(|e| WalletError::KeyDerivationError(format!("PBKDF2-HMAC-SHA256 failed: {e}")))
    }

    pub fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<[u8; 32]> {
        let mut mac = HmacSha256::new_from_slice(key)
            .map_err(|e| WalletError::EncryptionError(format!("HMAC key init failed: {e}")))?;
        mac.update(data);

        let mut output = [0u8; 32];
        output.copy_from_slice(&mac.finalize().into_bytes());
        Ok(output)
    }

    /// Constant-time tag check
    pub fn verify_hmac_sha256(key: &[u8], data: &[u8], expected: &[u8]) -> Result<()> {
        let mut mac =
            HmacSha256::new_from_slice(key).map_err(|_| WalletError::DecryptionError)?;
        mac.update(data);
        mac.verify_slice(expected)
            .map_err(|_| WalletError::DecryptionError)
    }

    pub fn aes128_cbc_encrypt(key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
        let cipher = Aes128CbcEnc::new_from_slices(key, iv)
            .map_err(|e| WalletError::EncryptionError(e.to_string()))?;
        Ok(cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
    }

    pub fn aes128_cbc_decrypt(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
        if ciphertext.is_empty() || ciphertext.len() % 16 != 0 {
            return Err(WalletError::DecryptionError);
        }
        let cipher =
            Aes128CbcDec::new_from_slices(key, iv).map_err(|_| WalletError::DecryptionError)?;
        cipher
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| WalletError::DecryptionError)
    }
}

#[cfg(not(feature = "crypto"))]
mod imp {
    use super::{Result, WalletError};

    pub fn pbkdf2_sha256(_: &[u8], _: &[u8], _: u32, _: &mut [u8]) -> Result<()> {
        Err(WalletError::crypto_unavailable())
    }

    pub fn hmac_sha256(_: &[u8], _: &[u8]) -> Result<[u8; 32]> {
        Err(WalletError::crypto_unavailable())
    }

    pub fn verify_hmac_sha256(_: &[u8], _: &[u8], _: &[u8]) -> Result<()> {
        Err(WalletError::crypto_unavailable())
    }

    pub fn aes128_cbc_encrypt(_: &[u8], _: &[u8], _: &[u8]) -> Result<Vec<u8>> {
        Err(WalletError::crypto_unavailable())
    }

    pub fn aes128_cbc_decrypt(_: &[u8], _: &[u8], _: &[u8]) -> Result<Vec<u8>> {
        Err(WalletError::crypto_unavailable())
    }
}

pub(crate) use imp::{
    aes128_cbc_decrypt, aes128_cbc_encrypt, hmac_sha256, pbkdf2_sha256, verify_hmac_sha256,
};

/// Whether the crate was built with its cryptographic primitives
pub const fn crypto_available() -> bool {
    cfg!(feature = "crypto")
}

/// Fail with a configuration error when the primitives are missing
pub fn ensure_crypto_available() -> Result<()> {
    #[cfg(feature = "crypto")]
    {
        Ok(())
    }
    #[cfg(not(feature = "crypto"))]
    {
        Err(WalletError::crypto_unavailable())
    }
}
