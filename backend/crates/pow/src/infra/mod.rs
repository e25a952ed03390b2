//! Infrastructure Layer
//!
//! Concrete repository implementations.

pub mod quote_file;
