//! Quote Server Entry Point
//!
//! Loads configuration and quotes, then serves the PoW protocol until Ctrl-C.
//! Uses `anyhow` for startup errors; per-connection errors stay inside
//! `pow::PowError`.

use pow::{FileQuoteRepository, PowConfig};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "server=info,pow=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = PowConfig::from_env()?;

    tracing::info!(
        addr = %config.listen_addr,
        difficulty = %config.difficulty,
        quotes_path = %config.quotes_path.display(),
        "Starting server"
    );

    let quotes = FileQuoteRepository::load(&config.quotes_path).await?;

    let listener = TcpListener::bind(config.listen_addr).await?;
    tracing::info!("Listening on {}", config.listen_addr);

    pow::serve_with_shutdown(listener, Arc::new(quotes), Arc::new(config), async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    })
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}
