//! Random identifiers

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Random ASCII-alphanumeric identifier of `len` characters
pub fn random_id<R: Rng>(rng: &mut R, len: usize) -> String {
    rng.sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Random identifier from the thread-local generator
pub fn generate_id(len: usize) -> String {
    random_id(&mut rand::thread_rng(), len)
}
