//! Elo Engine - Stateless Elo rating calculations
//!
//! This crate computes how far two ratings should move after a match, with
//! constant or rating-tiered K-factors. It holds no player state and performs
//! no I/O beyond optional configuration loading.

pub mod config;
pub mod error;
pub mod rating;
pub mod types;

// Re-export commonly used types and traits
pub use error::{EloError, Result};
pub use types::*;

// Re-export key components
pub use config::{EngineConfig, KPolicy};
pub use rating::{adjust, expected_score, EloEngine, NoOpRatingCalculator, RatingCalculator};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
