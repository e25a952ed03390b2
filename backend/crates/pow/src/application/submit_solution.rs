//! Submit Solution Use Case

use crate::domain::entities::IssuedChallenge;
use crate::domain::repository::QuoteRepository;
use crate::domain::services::is_valid;
use crate::domain::value_objects::Nonce;
use crate::error::PowResult;
use std::sync::Arc;

/// Result of checking one submitted nonce
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Nonce solves the challenge; carries the protected quote
    Accepted { quote: String },
    /// Nonce does not solve the challenge; the client may try again
    Rejected,
}

/// Submit Solution Use Case
pub struct SubmitSolutionUseCase<Q>
where
    Q: QuoteRepository,
{
    quote_repo: Arc<Q>,
}

impl<Q> SubmitSolutionUseCase<Q>
where
    Q: QuoteRepository,
{
    pub fn new(quote_repo: Arc<Q>) -> Self {
        Self { quote_repo }
    }

    pub async fn execute(
        &self,
        issued: &IssuedChallenge,
        nonce: &Nonce,
    ) -> PowResult<SubmissionOutcome> {
        if !is_valid(issued.challenge.as_str(), nonce, issued.difficulty) {
            tracing::debug!(
                challenge_id = %issued.id,
                nonce = %nonce,
                "Invalid nonce"
            );
            return Ok(SubmissionOutcome::Rejected);
        }

        let quote = self.quote_repo.random_quote().await?;

        tracing::info!(
            challenge_id = %issued.id,
            elapsed_ms = issued.age_ms(),
            "PoW verification successful"
        );

        Ok(SubmissionOutcome::Accepted { quote })
    }
}
