//! Domain Value Objects
//!
//! Immutable value types for the PoW domain.

use crate::error::PowError;
use std::fmt;
use std::str::FromStr;

/// Difficulty level for PoW
///
/// `d` means the accepted hash space is `1/2^d` of the 256-bit output space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Difficulty(u16);

impl Difficulty {
    pub const DEFAULT: Difficulty = Difficulty(10);
    pub const MIN: u16 = 0;
    pub const MAX: u16 = 256;

    pub fn new(bits: u16) -> Option<Self> {
        if (Self::MIN..=Self::MAX).contains(&bits) {
            Some(Self(bits))
        } else {
            None
        }
    }

    pub fn bits(&self) -> u16 {
        self.0
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Difficulty {
    type Err = PowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u16>()
            .ok()
            .and_then(Difficulty::new)
            .ok_or_else(|| PowError::InvalidDifficulty(s.to_string()))
    }
}

/// Challenge string issued to one client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge(String);

impl Challenge {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Challenge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Candidate solution token.
///
/// Kept as the exact bytes received; it is never decoded before hashing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nonce(Vec<u8>);

impl Nonce {
    pub fn new(value: impl Into<Vec<u8>>) -> Self {
        Self(value.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<u32> for Nonce {
    fn from(value: u32) -> Self {
        Self(value.to_string().into_bytes())
    }
}

impl AsRef<[u8]> for Nonce {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// lossy, for logs only
impl fmt::Display for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}
