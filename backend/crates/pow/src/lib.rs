//! PoW (Proof of Work) Quote Service
//!
//! Clean Architecture structure:
//! - `domain/` - Value objects, target arithmetic, validation, repository traits
//! - `application/` - Use cases (issue challenge, submit solution, solve) and config
//! - `infra/` - Quote file repository
//! - `presentation/` - Line protocol, server sessions, client session
//!
//! ## Security Model
//! - The server alone picks the challenge and difficulty
//! - A solution is `SHA-256(challenge ∥ nonce) < 2^(256 - difficulty)`
//! - Challenges live for one connection and are never reused
//! - Rejected nonces re-echo the same challenge; there is no attempt cap

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::{ClientConfig, PowConfig};
pub use application::solve_challenge::Solver;
pub use domain::repository::QuoteRepository;
pub use domain::services::{compute_target, is_valid};
pub use domain::value_objects::{Challenge, Difficulty, Nonce};
pub use error::{ErrorKind, PowError, PowResult};
pub use infra::quote_file::FileQuoteRepository;
pub use presentation::client::{ClientSession, ServerReply};
pub use presentation::server::{ServerSession, SessionOutcome, serve, serve_with_shutdown};
