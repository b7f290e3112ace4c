//! End-to-end wallet scenarios through the public API.

use tempfile::TempDir;
use wallet_core::{
    crypto::{decrypt_string, derive_key, encrypt_string, generate_salt, DerivedKey},
    KeyDerivationParams, WalletError, WalletStore,
};

fn fast() -> Option<KeyDerivationParams> {
    Some(KeyDerivationParams { iterations: 500 })
}

#[tokio::test]
async fn write_then_read_with_same_password() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fresh.json");

    let store = WalletStore::new();
    store.write(&path, "w_abc123", "hunter2").await.unwrap();

    let credential = store.read(&path, "hunter2").await.unwrap();
    assert_eq!(credential.expose(), "w_abc123");
}

#[tokio::test]
async fn read_with_wrong_password_fails_without_leaking() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fresh.json");

    let store = WalletStore::new();
    store.write(&path, "w_abc123", "hunter2").await.unwrap();
    let before = std::fs::read_to_string(&path).unwrap();

    let err = store.read(&path, "wrong").await.unwrap_err();
    assert!(matches!(err, WalletError::DecryptionError));
    assert!(!format!("{err} {err:?}").contains("w_abc123"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn roundtrip_over_many_credentials_and_passwords() {
    let credentials = ["a", "w_abc123", "w_0123456789abcdef", "spaces and symbols !@#$%^&*()", "名前"];
    let passwords = ["p", "hunter2", "correct horse battery staple", "пароль"];

    for credential in credentials {
        for password in passwords {
            let salt = generate_salt();
            let (key, _) = derive_key(password, Some(&salt), fast()).unwrap();
            let token = encrypt_string(credential, &key).unwrap();

            let (again, _) = derive_key(password, Some(&salt), fast()).unwrap();
            assert_eq!(decrypt_string(&token, &again).unwrap(), credential);

            for other in passwords.iter().filter(|p| **p != password) {
                let (wrong, _) = derive_key(other, Some(&salt), fast()).unwrap();
                assert!(matches!(
                    decrypt_string(&token, &wrong),
                    Err(WalletError::DecryptionError)
                ));
            }
        }
    }
}

/// Wallet written by the Python aipseo CLI (password `hunter2`).
const PYTHON_WALLET: &str = r#"{"encrypted_data": "Z0FBQUFBQm81M2dBRUJFU0V4UVZGaGNZR1JvYkhCMGVINWVpbFhaYVlqREpSMXZTUE5xT2M5Sm9Yd1dTWjFoY3BQREdSeWxDYzNVQjg4QXJXYi1rc2ctaDlkcS0yRmp6OGc9PQ==", "salt": "AAECAwQFBgcICQoLDA0ODw=="}"#;

#[tokio::test]
async fn reads_wallet_written_by_python_cli() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".wallet.json");
    std::fs::write(&path, PYTHON_WALLET).unwrap();

    let credential = WalletStore::new().read(&path, "hunter2").await.unwrap();
    assert_eq!(credential.expose(), "w_abc123");
}

#[test]
fn derived_key_matches_python_cli() {
    let salt: [u8; 16] = std::array::from_fn(|i| i as u8);
    let (key, _) = derive_key("hunter2", Some(&salt), None).unwrap();
    assert_eq!(key.encoded(), "hE1uCS3vlWo9J3PkHXIb8tlaHY9STZcMp2zSBSigNnk=");
}

#[test]
fn decrypts_fernet_reference_token() {
    let key = DerivedKey::from_encoded("cw_0x689RpI-jtRR7oE8h_eQsKImvJapLeSbXpwF4e4=").unwrap();
    let token = "gAAAAAAdwJ6wAAECAwQFBgcICQoLDA0ODy021cpGVWKZ_eEwCGM4BLLF_5CV9dOPmrhuVUPgJobwOz7JcbmrR64jVmpU4IwqDA==";

    assert_eq!(decrypt_string(token, &key).unwrap(), "hello");
}
