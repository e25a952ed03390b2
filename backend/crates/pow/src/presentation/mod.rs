//! Presentation Layer
//!
//! Line protocol over byte streams: framing, server sessions with the accept
//! loop, and the client round.

pub mod client;
pub mod server;
pub mod wire;
