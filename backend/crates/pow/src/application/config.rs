//! Application Configuration
//!
//! Configuration for the PoW server and client. Values come from the process
//! environment; `from_lookup` takes any key lookup so tests can inject values.

use crate::domain::value_objects::Difficulty;
use crate::error::{PowError, PowResult};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const PORT_VAR: &str = "PORT";
pub const DIFFICULTY_VAR: &str = "DIFFICULTY";
pub const QUOTES_PATH_VAR: &str = "QUOTES_PATH";
pub const SERVER_ADDR_VAR: &str = "SERVER_ADDR";
pub const SOLVE_TIMEOUT_VAR: &str = "SOLVE_TIMEOUT_SECS";

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_QUOTES_PATH: &str = "quotes/quotes.txt";
const DEFAULT_SERVER_ADDR: &str = "localhost:8080";
const DEFAULT_SOLVE_TIMEOUT: Duration = Duration::from_secs(60);

/// PoW server configuration
#[derive(Debug, Clone)]
pub struct PowConfig {
    /// Address the listener binds to
    pub listen_addr: SocketAddr,
    /// Difficulty every issued challenge is solved at
    pub difficulty: Difficulty,
    /// Line-oriented quotes file
    pub quotes_path: PathBuf,
}

impl Default for PowConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            difficulty: Difficulty::DEFAULT,
            quotes_path: PathBuf::from(DEFAULT_QUOTES_PATH),
        }
    }
}

impl PowConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> PowResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from a key lookup.
    ///
    /// A bad `DIFFICULTY` is logged and replaced by the default; a bad `PORT`
    /// is an error.
    pub fn from_lookup<F>(lookup: F) -> PowResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let listen_addr = match non_empty(lookup(PORT_VAR)) {
            Some(raw) => {
                let port = raw.parse::<u16>().map_err(|_| PowError::InvalidConfig {
                    key: PORT_VAR,
                    value: raw.clone(),
                })?;
                SocketAddr::from(([0, 0, 0, 0], port))
            }
            None => defaults.listen_addr,
        };

        let difficulty = parse_difficulty(non_empty(lookup(DIFFICULTY_VAR)));

        let quotes_path = non_empty(lookup(QUOTES_PATH_VAR))
            .map(PathBuf::from)
            .unwrap_or(defaults.quotes_path);

        Ok(Self {
            listen_addr,
            difficulty,
            quotes_path,
        })
    }

    /// Same configuration with a different difficulty
    pub fn with_difficulty(self, difficulty: Difficulty) -> Self {
        Self { difficulty, ..self }
    }
}

/// PoW client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// `host:port` of the server
    pub server_addr: String,
    /// Wall-clock budget for the solver
    pub solve_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_addr: DEFAULT_SERVER_ADDR.to_string(),
            solve_timeout: DEFAULT_SOLVE_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let server_addr = non_empty(lookup(SERVER_ADDR_VAR)).unwrap_or(defaults.server_addr);

        let solve_timeout = match non_empty(lookup(SOLVE_TIMEOUT_VAR)) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) => Duration::from_secs(secs),
                Err(e) => {
                    tracing::warn!(
                        value = %raw,
                        error = %e,
                        "Invalid solve timeout, using default"
                    );
                    defaults.solve_timeout
                }
            },
            None => defaults.solve_timeout,
        };

        Self {
            server_addr,
            solve_timeout,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_difficulty(raw: Option<String>) -> Difficulty {
    match raw {
        Some(raw) => raw.parse::<Difficulty>().unwrap_or_else(|e| {
            tracing::warn!(
                error = %e,
                fallback = %Difficulty::DEFAULT,
                "Falling back to default difficulty"
            );
            Difficulty::DEFAULT
        }),
        None => Difficulty::DEFAULT,
    }
}
