//! Repository Traits
//!
//! Interfaces for the protected payload source. Implementation is in
//! infrastructure layer.

use crate::error::PowResult;

/// Quote repository trait
#[trait_variant::make(QuoteRepository: Send)]
pub trait LocalQuoteRepository {
    /// Pick one quote uniformly at random
    async fn random_quote(&self) -> PowResult<String>;
}
