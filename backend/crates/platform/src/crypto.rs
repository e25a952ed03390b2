//! Cryptographic Utilities

use rand::RngCore;
use sha2::{Digest, Sha256};

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    rand::rng().fill_bytes(&mut bytes);
    bytes
}

/// Compute SHA-256 hash
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Re-hash a digest `rounds` times in sequence
pub fn sha256_chain(digest: [u8; 32], rounds: u32) -> [u8; 32] {
    (0..rounds).fold(digest, |acc, _| sha256(&acc))
}

/// Encode bytes as lowercase hex
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_values() {
        // SHA-256 of empty string
        let hash = sha256(b"");
        assert_eq!(
            to_hex(&hash),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );

        // SHA-256 of "hello"
        let hash = sha256(b"hello");
        assert_eq!(
            to_hex(&hash),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn test_random_bytes() {
        let bytes = random_bytes(32);
        assert_eq!(bytes.len(), 32);
        // Should not be all zeros (statistically)
        assert!(bytes.iter().any(|&b| b != 0));

        assert!(random_bytes(0).is_empty());
    }

    #[test]
    fn test_sha256_chain() {
        let seed = sha256(b"hello");
        assert_eq!(sha256_chain(seed, 0), seed);
        assert_eq!(sha256_chain(seed, 1), sha256(&seed));
        assert_eq!(sha256_chain(seed, 2), sha256(&sha256(&seed)));
    }

    #[test]
    fn test_to_hex_lowercase() {
        assert_eq!(to_hex(&[0xAB, 0x01, 0xff]), "ab01ff");
        assert_eq!(to_hex(&[]), "");
    }
}
