//! Quote Client Entry Point
//!
//! Connects once, solves the server's puzzle and prints the reply.

use pow::{ClientConfig, ClientSession, ServerReply, Solver};
use tokio::net::TcpStream;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "client=info,pow=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ClientConfig::from_env();

    let stream = TcpStream::connect(&config.server_addr).await?;
    tracing::info!(addr = %config.server_addr, "Connected");

    let reply = ClientSession::new(stream, Solver::new(config.solve_timeout))
        .run()
        .await?;

    match reply {
        ServerReply::Quote(quote) => {
            tracing::info!(%quote, "Response");
            Ok(())
        }
        ServerReply::Rejected { challenge } => {
            anyhow::bail!("server rejected the solution for challenge {challenge}")
        }
    }
}
