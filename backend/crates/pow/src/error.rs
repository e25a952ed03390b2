//! PoW Error Types
//!
//! A single error enum for the library, classified into the coarse
//! [`ErrorKind`] buckets the server and client react to.

use std::io;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// PoW-specific result type alias
pub type PowResult<T> = Result<T, PowError>;

/// Coarse classification of a [`PowError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad configuration value or unusable quote source
    Configuration,
    /// Stream read/write failure; ends the current session only
    Transport,
    /// Solver ran out of time (client only)
    Timeout,
    /// Peer sent something that does not follow the line protocol
    Protocol,
    /// Bug or runtime failure
    Internal,
}

/// PoW-specific error variants
#[derive(Debug, Error)]
pub enum PowError {
    /// Difficulty is not an integer in `0..=256`
    #[error("Invalid difficulty: {0}")]
    InvalidDifficulty(String),

    /// Any other unusable configuration value
    #[error("Invalid configuration value for {key}: {value}")]
    InvalidConfig { key: &'static str, value: String },

    /// Quote file could not be read
    #[error("Failed to read quotes file {}: {source}", .path.display())]
    QuotesFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Quote source holds no quotes
    #[error("No quotes available")]
    NoQuotes,

    /// I/O error on the stream
    #[error("Transport error: {0}")]
    Transport(#[from] io::Error),

    /// Peer closed the stream before the expected line arrived
    #[error("Connection closed by peer")]
    ConnectionClosed,

    /// Incoming line exceeded the framing limit
    #[error("Line exceeds {limit} bytes")]
    LineTooLong { limit: usize },

    /// Solver exceeded its time budget
    #[error("Proof of work timed out after {elapsed:?} ({attempts} attempts)")]
    Timeout { elapsed: Duration, attempts: u64 },

    /// Unexpected message from the peer
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PowError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            PowError::InvalidDifficulty(_)
            | PowError::InvalidConfig { .. }
            | PowError::QuotesFile { .. }
            | PowError::NoQuotes => ErrorKind::Configuration,
            PowError::Transport(_) | PowError::ConnectionClosed | PowError::LineTooLong { .. } => {
                ErrorKind::Transport
            }
            PowError::Timeout { .. } => ErrorKind::Timeout,
            PowError::Protocol(_) => ErrorKind::Protocol,
            PowError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self.kind() {
            ErrorKind::Configuration | ErrorKind::Internal => {
                tracing::error!(error = %self, "PoW error");
            }
            ErrorKind::Timeout | ErrorKind::Protocol => {
                tracing::warn!(error = %self, "PoW error");
            }
            ErrorKind::Transport => {
                tracing::debug!(error = %self, "PoW transport error");
            }
        }
    }
}
