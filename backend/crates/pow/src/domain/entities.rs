//! Domain Entities
//!
//! Core business entities for the PoW domain.

use crate::domain::value_objects::{Challenge, Difficulty};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A challenge handed to one connection, together with the difficulty it
/// must be solved at. Lives exactly as long as the session.
#[derive(Debug, Clone)]
pub struct IssuedChallenge {
    pub id: Uuid,
    pub challenge: Challenge,
    pub difficulty: Difficulty,
    pub issued_at: DateTime<Utc>,
}

impl IssuedChallenge {
    /// Create a new issued challenge
    pub fn new(challenge: Challenge, difficulty: Difficulty) -> Self {
        Self {
            id: Uuid::new_v4(),
            challenge,
            difficulty,
            issued_at: Utc::now(),
        }
    }

    /// Milliseconds since the challenge was issued
    pub fn age_ms(&self) -> i64 {
        (Utc::now() - self.issued_at).num_milliseconds()
    }
}
