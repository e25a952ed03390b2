//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (IssuedChallenge)
//! - Domain value objects (Difficulty, Challenge, Nonce)
//! - Domain services (target computation, PoW verification)
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;
