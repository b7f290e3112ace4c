//! Wallet file persistence
//!
//! The wallet is one JSON file holding a Fernet token and the salt used to
//! derive its key. Reading never modifies the file; writing replaces it
//! wholesale.

mod encrypted_file;

pub use encrypted_file::{EncryptedWalletRecord, WalletStore};
