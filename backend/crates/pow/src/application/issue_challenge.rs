//! Issue Challenge Use Case

use crate::application::config::PowConfig;
use crate::domain::entities::IssuedChallenge;
use crate::domain::value_objects::{Challenge, Difficulty};
use chrono::Utc;
use platform::crypto::{random_bytes, sha256, sha256_chain, to_hex};
use std::sync::Arc;

const ENTROPY_BYTES: usize = 16;

/// Issue Challenge Use Case
#[derive(Debug, Clone)]
pub struct IssueChallengeUseCase {
    config: Arc<PowConfig>,
}

impl IssueChallengeUseCase {
    pub fn new(config: Arc<PowConfig>) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> IssuedChallenge {
        let difficulty = self.config.difficulty;
        let issued = IssuedChallenge::new(generate_challenge(difficulty), difficulty);

        tracing::info!(
            challenge_id = %issued.id,
            difficulty = %difficulty,
            "Issued challenge"
        );

        issued
    }
}

/// Derive a fresh challenge from the clock and OS randomness.
///
/// The seed digest is re-hashed once per difficulty bit; the result is the
/// hex encoding of the last digest.
pub fn generate_challenge(difficulty: Difficulty) -> Challenge {
    let nanos = Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_default()
        .to_be_bytes();

    let mut seed = Vec::with_capacity(nanos.len() + ENTROPY_BYTES);
    seed.extend_from_slice(&nanos);
    seed.extend_from_slice(&random_bytes(ENTROPY_BYTES));

    let digest = sha256_chain(sha256(&seed), u32::from(difficulty.bits()));
    Challenge::new(to_hex(&digest))
}
