//! Server Side Protocol
//!
//! One [`ServerSession`] per accepted connection, driven by the accept loop
//! in [`serve`] / [`serve_with_shutdown`].

use crate::application::config::PowConfig;
use crate::application::issue_challenge::IssueChallengeUseCase;
use crate::application::submit_solution::{SubmissionOutcome, SubmitSolutionUseCase};
use crate::domain::entities::IssuedChallenge;
use crate::domain::repository::QuoteRepository;
use crate::domain::value_objects::Nonce;
use crate::error::PowResult;
use crate::presentation::wire::{CHALLENGE_PREFIX, LineStream, QUOTE_PREFIX, REJECTION_NOTICE};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpListener;
use tracing::Instrument;

/// Pause after a failed accept before polling the listener again
pub(crate) const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// A valid nonce arrived and the quote was sent
    Accepted { attempts: u32 },
    /// The peer went away (or the read failed) before solving
    Disconnected { attempts: u32 },
}

/// Server half of the protocol for one connection
pub struct ServerSession<S, Q>
where
    Q: QuoteRepository,
{
    stream: LineStream<S>,
    issued: IssuedChallenge,
    submit: SubmitSolutionUseCase<Q>,
}

impl<S, Q> ServerSession<S, Q>
where
    S: AsyncRead + AsyncWrite + Unpin,
    Q: QuoteRepository,
{
    /// Issue a fresh challenge for `stream` using `config`'s difficulty
    pub fn new(stream: S, quotes: Arc<Q>, config: Arc<PowConfig>) -> Self {
        let issued = IssueChallengeUseCase::new(config).execute();
        Self::with_challenge(stream, quotes, issued)
    }

    pub fn with_challenge(stream: S, quotes: Arc<Q>, issued: IssuedChallenge) -> Self {
        Self {
            stream: LineStream::new(stream),
            issued,
            submit: SubmitSolutionUseCase::new(quotes),
        }
    }

    pub fn issued(&self) -> &IssuedChallenge {
        &self.issued
    }

    /// Run the exchange until the client solves the challenge or leaves.
    ///
    /// Write failures are returned; read failures end the session quietly.
    pub async fn run(mut self) -> PowResult<SessionOutcome> {
        let challenge = self.issued.challenge.to_string();
        let difficulty = self.issued.difficulty.to_string();
        self.stream
            .write_lines(&[challenge.as_str(), difficulty.as_str()])
            .await?;

        let mut attempts: u32 = 0;
        loop {
            let line = match self.stream.read_line_bytes().await {
                Ok(Some(line)) => line,
                Ok(None) => return Ok(SessionOutcome::Disconnected { attempts }),
                Err(e) => {
                    tracing::debug!(error = %e, "Read failed, closing session");
                    return Ok(SessionOutcome::Disconnected { attempts });
                }
            };
            attempts = attempts.saturating_add(1);

            match self.submit.execute(&self.issued, &Nonce::new(line)).await? {
                SubmissionOutcome::Accepted { quote } => {
                    let response = format!("{QUOTE_PREFIX}{quote}");
                    self.stream.write_lines(&[response.as_str()]).await?;
                    if let Err(e) = self.stream.shutdown().await {
                        tracing::debug!(error = %e, "Shutdown after quote failed");
                    }
                    return Ok(SessionOutcome::Accepted { attempts });
                }
                SubmissionOutcome::Rejected => {
                    let echo = format!("{CHALLENGE_PREFIX}{challenge}");
                    self.stream
                        .write_lines(&[REJECTION_NOTICE, echo.as_str()])
                        .await?;
                }
            }
        }
    }
}

/// Accept connections forever, one task per connection
pub async fn serve<Q>(
    listener: TcpListener,
    quotes: Arc<Q>,
    config: Arc<PowConfig>,
) -> PowResult<()>
where
    Q: QuoteRepository + Sync + 'static,
{
    serve_with_shutdown(listener, quotes, config, std::future::pending()).await
}

/// Accept connections until `shutdown` resolves.
///
/// Sessions already running keep going on their own tasks.
pub async fn serve_with_shutdown<Q, F>(
    listener: TcpListener,
    quotes: Arc<Q>,
    config: Arc<PowConfig>,
    shutdown: F,
) -> PowResult<()>
where
    Q: QuoteRepository + Sync + 'static,
    F: Future<Output = ()>,
{
    tracing::info!(
        addr = %listener.local_addr()?,
        difficulty = %config.difficulty,
        "Accepting connections"
    );

    tokio::pin!(shutdown);

    loop {
        let (stream, peer) = tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("Shutdown requested, no longer accepting");
                return Ok(());
            }
            accepted = listener.accept() => match accepted {
                Ok(accepted) => accepted,
                Err(e) => {
                    back_off_after_accept_error(&e).await;
                    continue;
                }
            },
        };

        let session = ServerSession::new(stream, quotes.clone(), config.clone());
        let span = tracing::info_span!("session", session_id = %session.issued().id, %peer);

        tokio::spawn(
            async move {
                match session.run().await {
                    Ok(SessionOutcome::Accepted { attempts }) => {
                        tracing::info!(attempts, "Quote delivered");
                    }
                    Ok(SessionOutcome::Disconnected { attempts }) => {
                        tracing::info!(attempts, "Client disconnected");
                    }
                    Err(e) => e.log(),
                }
            }
            .instrument(span),
        );
    }
}

/// Log a failed accept and pause before the listener is polled again
pub(crate) async fn back_off_after_accept_error(error: &std::io::Error) {
    tracing::warn!(error = %error, backoff_ms = ACCEPT_BACKOFF.as_millis() as u64, "Accept failed");
    tokio::time::sleep(ACCEPT_BACKOFF).await;
}
