//! Client Side Protocol
//!
//! A single round: read the puzzle, solve it, submit, read the reply.

use crate::application::solve_challenge::Solver;
use crate::domain::value_objects::{Challenge, Difficulty, Nonce};
use crate::error::{PowError, PowResult};
use crate::presentation::wire::{CHALLENGE_PREFIX, LineStream, QUOTE_PREFIX, REJECTION_NOTICE};
use tokio::io::{AsyncRead, AsyncWrite};

/// What the server answered to a submitted nonce
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerReply {
    Quote(String),
    Rejected { challenge: String },
}

/// Puzzle as received from the server
#[derive(Debug, Clone)]
pub struct ReceivedChallenge {
    pub challenge: Challenge,
    pub difficulty: Difficulty,
}

/// Client half of the protocol
pub struct ClientSession<S> {
    stream: LineStream<S>,
    solver: Solver,
}

impl<S> ClientSession<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, solver: Solver) -> Self {
        Self {
            stream: LineStream::new(stream),
            solver,
        }
    }

    /// Run one full round and return the server's reply
    pub async fn run(mut self) -> PowResult<ServerReply> {
        let received = self.read_challenge().await?;
        let nonce = self.solve(&received).await?;
        self.submit(&nonce).await?;
        self.read_reply().await
    }

    /// Read the challenge line followed by the difficulty line
    pub async fn read_challenge(&mut self) -> PowResult<ReceivedChallenge> {
        let challenge = Challenge::new(self.stream.expect_line().await?);
        tracing::info!(challenge = %challenge, "Received challenge");

        let raw = self.stream.expect_line().await?;
        let difficulty = raw
            .trim()
            .parse::<Difficulty>()
            .map_err(|_| PowError::Protocol(format!("unusable difficulty {raw:?}")))?;
        tracing::info!(difficulty = %difficulty, "Received difficulty");

        Ok(ReceivedChallenge {
            challenge,
            difficulty,
        })
    }

    /// Solve on the blocking pool so the runtime keeps serving I/O
    pub async fn solve(&self, received: &ReceivedChallenge) -> PowResult<Nonce> {
        let solver = self.solver;
        let challenge = received.challenge.clone();
        let difficulty = received.difficulty;

        tokio::task::spawn_blocking(move || solver.solve(&challenge, difficulty))
            .await
            .map_err(|e| PowError::Internal(format!("solver task failed: {e}")))?
    }

    pub async fn submit(&mut self, nonce: &Nonce) -> PowResult<()> {
        self.stream.write_line_bytes(nonce.as_bytes()).await
    }

    pub async fn read_reply(&mut self) -> PowResult<ServerReply> {
        let line = self.stream.expect_line().await?;

        if let Some(quote) = line.strip_prefix(QUOTE_PREFIX) {
            return Ok(ServerReply::Quote(quote.to_string()));
        }

        if line == REJECTION_NOTICE {
            let echo = self.stream.expect_line().await?;
            let challenge = echo.strip_prefix(CHALLENGE_PREFIX).ok_or_else(|| {
                PowError::Protocol(format!("expected challenge echo, got {echo:?}"))
            })?;
            return Ok(ServerReply::Rejected {
                challenge: challenge.to_string(),
            });
        }

        Err(PowError::Protocol(format!("unexpected reply {line:?}")))
    }
}
