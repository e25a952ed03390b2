//! Solve Challenge Use Case (client side)

use crate::domain::services::{compute_pow_hash, compute_target, meets_target};
use crate::domain::value_objects::{Challenge, Difficulty, Nonce};
use crate::error::{PowError, PowResult};
use rand::Rng;
use std::time::{Duration, Instant};

/// Attempts between two deadline checks.
const BATCH_SIZE: u64 = 256;

/// Random-order nonce search bounded by a wall-clock limit
#[derive(Debug, Clone, Copy)]
pub struct Solver {
    time_limit: Duration,
}

impl Default for Solver {
    fn default() -> Self {
        Self::new(Duration::from_secs(60))
    }
}

impl Solver {
    pub fn new(time_limit: Duration) -> Self {
        Self { time_limit }
    }

    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }

    /// Search for a nonce whose hash with `challenge` meets the difficulty.
    ///
    /// Candidates are random `u32` values rendered in decimal. Blocks the
    /// calling thread; run it off the async runtime.
    pub fn solve(&self, challenge: &Challenge, difficulty: Difficulty) -> PowResult<Nonce> {
        let target = compute_target(difficulty);
        let mut rng = rand::rng();
        let started = Instant::now();
        let mut attempts: u64 = 0;

        loop {
            for _ in 0..BATCH_SIZE {
                let candidate = Nonce::from(rng.random::<u32>());
                attempts += 1;

                let hash = compute_pow_hash(challenge.as_str(), candidate.as_bytes());
                if meets_target(&hash, &target) {
                    tracing::info!(
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        attempts,
                        nonce = %candidate,
                        hash = %platform::crypto::to_hex(&hash),
                        "Solution found"
                    );
                    return Ok(candidate);
                }
            }

            let elapsed = started.elapsed();
            if elapsed > self.time_limit {
                return Err(PowError::Timeout { elapsed, attempts });
            }
        }
    }
}
