//! Elo rating calculations
//!
//! This module provides the expected-score model, the rating adjustment
//! formula, the configured engine, and the calculator interface.

pub mod calculator;
pub mod elo;

// Re-export commonly used types
pub use calculator::{NoOpRatingCalculator, RatingCalculator};
pub use elo::{adjust, expected_score, EloEngine, RATING_SCALE};
