//! Rating calculator trait and implementations
//!
//! This module defines the interface for rating a two-player match and a
//! no-op implementation for callers that need to switch rating off.

use crate::types::{MatchRatingChanges, MatchResult, RatingChange};

/// Trait for calculating rating changes after a two-player match
pub trait RatingCalculator: Send + Sync {
    /// Calculate rating changes for both participants of a match
    ///
    /// Each participant's change is computed from their own point of view.
    fn calculate_rating_changes(&self, result: &MatchResult) -> MatchRatingChanges;

    /// Get current configuration as JSON
    fn config(&self) -> serde_json::Value;
}

/// Rating calculator that leaves every rating untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpRatingCalculator;

impl NoOpRatingCalculator {
    /// Create a new no-op rating calculator
    pub fn new() -> Self {
        Self
    }
}

impl RatingCalculator for NoOpRatingCalculator {
    fn calculate_rating_changes(&self, result: &MatchResult) -> MatchRatingChanges {
        MatchRatingChanges {
            subject: RatingChange::new(result.subject_rating, 0.0),
            opponent: RatingChange::new(result.opponent_rating, 0.0),
        }
    }

    fn config(&self) -> serde_json::Value {
        serde_json::json!({ "type": "no_op" })
    }
}
