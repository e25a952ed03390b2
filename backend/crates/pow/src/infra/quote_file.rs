//! File-backed Quote Repository

use crate::domain::repository::QuoteRepository;
use crate::error::{PowError, PowResult};
use rand::seq::IndexedRandom;
use std::path::Path;

/// Quotes loaded once from a line-oriented text file
#[derive(Debug, Clone)]
pub struct FileQuoteRepository {
    quotes: Vec<String>,
}

impl FileQuoteRepository {
    /// Load quotes from `path`, one per non-blank line
    pub async fn load(path: impl AsRef<Path>) -> PowResult<Self> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| PowError::QuotesFile {
                path: path.to_path_buf(),
                source,
            })?;

        let repo = Self::from_text(&text)?;

        tracing::info!(
            path = %path.display(),
            quotes = repo.quotes().len(),
            "Loaded quotes"
        );

        Ok(repo)
    }

    /// Parse quotes from text; lines are trimmed and blank lines skipped
    pub fn from_text(text: &str) -> PowResult<Self> {
        Self::from_quotes(text.lines().map(str::to_string))
    }

    pub fn from_quotes<I>(quotes: I) -> PowResult<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let quotes: Vec<String> = quotes
            .into_iter()
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty())
            .collect();

        if quotes.is_empty() {
            return Err(PowError::NoQuotes);
        }

        Ok(Self { quotes })
    }

    pub fn quotes(&self) -> &[String] {
        &self.quotes
    }
}

impl QuoteRepository for FileQuoteRepository {
    async fn random_quote(&self) -> PowResult<String> {
        self.quotes
            .choose(&mut rand::rng())
            .cloned()
            .ok_or(PowError::NoQuotes)
    }
}
