//! Common types used throughout the rating engine

use crate::error::{EloError, Result};
use serde::{Deserialize, Serialize};

/// A participant's skill estimate
pub type Rating = f64;

/// Outcome of a match from the subject's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchOutcome {
    Win,
    Draw,
    Loss,
}

impl MatchOutcome {
    /// Score the outcome is worth to the subject
    pub fn score(self) -> f64 {
        match self {
            MatchOutcome::Win => 1.0,
            MatchOutcome::Draw => 0.5,
            MatchOutcome::Loss => 0.0,
        }
    }

    /// The same outcome seen from the opponent's side
    pub fn reversed(self) -> Self {
        match self {
            MatchOutcome::Win => MatchOutcome::Loss,
            MatchOutcome::Draw => MatchOutcome::Draw,
            MatchOutcome::Loss => MatchOutcome::Win,
        }
    }
}

impl std::fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchOutcome::Win => write!(f, "Win"),
            MatchOutcome::Draw => write!(f, "Draw"),
            MatchOutcome::Loss => write!(f, "Loss"),
        }
    }
}

/// A two-player match to be rated
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub subject_rating: Rating,
    pub opponent_rating: Rating,
    /// Subject's realized score in `[0, 1]`; 1 is a win, 0.5 a draw
    pub score: f64,
}

impl MatchResult {
    /// Create a validated match result
    pub fn new(subject_rating: Rating, opponent_rating: Rating, score: f64) -> Result<Self> {
        if !subject_rating.is_finite() || !opponent_rating.is_finite() {
            return Err(EloError::InvalidMatchResult {
                reason: format!(
                    "Ratings must be finite, got {} and {}",
                    subject_rating, opponent_rating
                ),
            }
            .into());
        }

        if !(0.0..=1.0).contains(&score) {
            return Err(EloError::InvalidMatchResult {
                reason: format!("Score must be within [0, 1], got {}", score),
            }
            .into());
        }

        Ok(Self {
            subject_rating,
            opponent_rating,
            score,
        })
    }

    /// Create a match result from a win, draw or loss
    pub fn from_outcome(
        subject_rating: Rating,
        opponent_rating: Rating,
        outcome: MatchOutcome,
    ) -> Result<Self> {
        Self::new(subject_rating, opponent_rating, outcome.score())
    }

    /// The same match seen from the opponent's side
    pub fn reversed(&self) -> Self {
        Self {
            subject_rating: self.opponent_rating,
            opponent_rating: self.subject_rating,
            score: 1.0 - self.score,
        }
    }
}

/// Rating movement for one participant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingChange {
    pub old_rating: Rating,
    /// Whole-number adjustment added to the old rating
    pub delta: f64,
    pub new_rating: Rating,
}

impl RatingChange {
    pub fn new(old_rating: Rating, delta: f64) -> Self {
        Self {
            old_rating,
            delta,
            new_rating: old_rating + delta,
        }
    }

    /// Keep the new rating from dropping below `floor`
    ///
    /// A rating that already sat below the floor is never raised by a loss;
    /// it just stops moving down.
    pub fn clamped_to_floor(self, floor: Rating) -> Self {
        if self.new_rating.is_nan() {
            return self;
        }

        let lower = floor.min(self.old_rating);
        if self.new_rating >= lower {
            return self;
        }

        Self {
            old_rating: self.old_rating,
            delta: lower - self.old_rating,
            new_rating: lower,
        }
    }
}

/// Rating movement for both participants of a match
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchRatingChanges {
    pub subject: RatingChange,
    pub opponent: RatingChange,
}
