//! Domain Services
//!
//! Pure domain logic for PoW verification.

use crate::domain::value_objects::Difficulty;
use num_bigint::BigUint;
use num_traits::One;
use sha2::{Digest, Sha256};

/// Acceptance threshold for a difficulty: `2^(256 - d)`
///
/// `d = 0` yields `2^256`, which is above every possible digest.
pub fn compute_target(difficulty: Difficulty) -> BigUint {
    BigUint::one() << (256 - usize::from(difficulty.bits()))
}

/// Compute SHA-256 of the challenge immediately followed by the nonce bytes
pub fn compute_pow_hash(challenge: &str, nonce: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(challenge.as_bytes());
    hasher.update(nonce);
    hasher.finalize().into()
}

/// Check a digest, read as a big-endian integer, against a target
pub fn meets_target(hash: &[u8; 32], target: &BigUint) -> bool {
    BigUint::from_bytes_be(hash) < *target
}

/// Verify a PoW solution; the nonce is an arbitrary byte string
pub fn is_valid(challenge: &str, nonce: impl AsRef<[u8]>, difficulty: Difficulty) -> bool {
    let hash = compute_pow_hash(challenge, nonce.as_ref());
    meets_target(&hash, &compute_target(difficulty))
}
