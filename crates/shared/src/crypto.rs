//! Cryptographic utilities for secret key generation.

use rand::RngCore;

/// Number of random bytes in a generated secret key.
pub const SECRET_KEY_BYTES: usize = 32;

/// Generates a random secret key encoded as lowercase hex.
///
/// 256 bits from the thread-local CSPRNG, so collisions between keys are
/// not a practical concern.
pub fn generate_secret_key() -> String {
    let mut bytes = [0u8; SECRET_KEY_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_secret_key_length() {
        let key = generate_secret_key();
        assert_eq!(key.len(), SECRET_KEY_BYTES * 2);
    }

    #[test]
    fn test_generate_secret_key_is_hex() {
        let key = generate_secret_key();
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(key, key.to_lowercase());
    }

    #[test]
    fn test_generate_secret_key_unique() {
        let keys: HashSet<String> = (0..100).map(|_| generate_secret_key()).collect();
        assert_eq!(keys.len(), 100);
    }
}
