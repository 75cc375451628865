//! Elo rating engine
//!
//! Free functions for the logistic expected-score model and the rating
//! adjustment formula, plus [`EloEngine`], which binds them to a validated
//! [`EngineConfig`] so K can be resolved from the configured policy.

use crate::config::{EngineConfig, KPolicy};
use crate::error::Result;
use crate::rating::calculator::RatingCalculator;
use crate::types::{MatchRatingChanges, MatchResult, Rating, RatingChange};
use tracing::{debug, trace};

/// Rating gap at which the stronger side is expected to score 10 times as often
pub const RATING_SCALE: f64 = 400.0;

/// Probability that the subject wins, given `opponent - subject`
///
/// Always in `(0, 1)` for finite input; `expected_score(0.0)` is exactly 0.5
/// and `expected_score(d) + expected_score(-d)` is 1 up to rounding.
/// NaN and infinities follow IEEE-754 arithmetic.
pub fn expected_score(rating_diff: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf(rating_diff / RATING_SCALE))
}

/// Signed rating delta for the subject after one match
///
/// The result is `k * (score - expected)` rounded half away from zero. It is a
/// whole number carried as `f64` so NaN inputs come out as NaN. The floor is
/// not applied here; see [`EloEngine::adjust_with_floor`].
pub fn adjust(subject_rating: Rating, opponent_rating: Rating, score: f64, k: f64) -> f64 {
    let expected = expected_score(opponent_rating - subject_rating);
    (k * (score - expected)).round()
}

/// Elo engine bound to an immutable configuration
///
/// The engine holds no mutable state and is `Send + Sync`, so a single
/// instance can be shared across threads without locking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EloEngine {
    config: EngineConfig,
}

impl EloEngine {
    /// Create a new engine from a validated configuration
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;

        debug!(
            floor = config.floor,
            k_policy = config.k.kind(),
            "Elo engine configured"
        );

        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn floor(&self) -> Rating {
        self.config.floor
    }

    pub fn k_policy(&self) -> &KPolicy {
        &self.config.k
    }

    /// Same as the free [`expected_score`]
    pub fn expected_score(&self, rating_diff: f64) -> f64 {
        expected_score(rating_diff)
    }

    /// K-factor for a participant at `rating`
    pub fn resolve_k(&self, rating: Rating) -> f64 {
        self.config.k.resolve(rating)
    }

    /// Signed rating delta for the subject
    ///
    /// When `k` is `None` it is resolved from the subject's rating.
    pub fn adjust(
        &self,
        subject_rating: Rating,
        opponent_rating: Rating,
        score: f64,
        k: Option<f64>,
    ) -> f64 {
        let k = k.unwrap_or_else(|| self.resolve_k(subject_rating));
        let delta = adjust(subject_rating, opponent_rating, score, k);

        trace!(
            subject_rating,
            opponent_rating,
            score,
            k,
            delta,
            "Computed rating adjustment"
        );

        delta
    }

    /// Like [`EloEngine::adjust`], but never moves the subject below the floor
    pub fn adjust_with_floor(
        &self,
        subject_rating: Rating,
        opponent_rating: Rating,
        score: f64,
        k: Option<f64>,
    ) -> f64 {
        let delta = self.adjust(subject_rating, opponent_rating, score, k);
        self.apply_floor(RatingChange::new(subject_rating, delta)).delta
    }

    /// Clamp a rating change to the configured floor
    pub fn apply_floor(&self, change: RatingChange) -> RatingChange {
        let clamped = change.clamped_to_floor(self.config.floor);

        if clamped != change {
            debug!(
                old_rating = change.old_rating,
                unclamped = change.new_rating,
                floor = self.config.floor,
                "Rating change clamped to floor"
            );
        }

        clamped
    }
}

impl RatingCalculator for EloEngine {
    fn calculate_rating_changes(&self, result: &MatchResult) -> MatchRatingChanges {
        let opponent_view = result.reversed();

        let subject_delta = self.adjust(
            result.subject_rating,
            result.opponent_rating,
            result.score,
            None,
        );
        let opponent_delta = self.adjust(
            opponent_view.subject_rating,
            opponent_view.opponent_rating,
            opponent_view.score,
            None,
        );

        MatchRatingChanges {
            subject: RatingChange::new(result.subject_rating, subject_delta),
            opponent: RatingChange::new(result.opponent_rating, opponent_delta),
        }
    }

    fn config(&self) -> serde_json::Value {
        let mut value = serde_json::to_value(&self.config).unwrap_or(serde_json::Value::Null);
        if let Some(map) = value.as_object_mut() {
            map.insert("type".to_string(), serde_json::json!("elo"));
        }
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MatchOutcome;

    fn tiered_engine() -> EloEngine {
        EloEngine::new(EngineConfig {
            floor: 100.0,
            k: KPolicy::tiered([(0.0, 20.0), (1000.0, 40.0), (2000.0, 60.0)]).unwrap(),
        })
        .unwrap()
    }

    #[test]
    fn test_expected_score_midpoint() {
        assert_eq!(expected_score(0.0), 0.5);
    }

    #[test]
    fn test_expected_score_reference_points() {
        // 400 points up: 10 to 1 odds
        assert!((expected_score(-400.0) - 10.0 / 11.0).abs() < 1e-12);
        assert!((expected_score(400.0) - 1.0 / 11.0).abs() < 1e-12);
        // Roughly 1% at an 800 point deficit
        assert!((expected_score(800.0) - 1.0 / 101.0).abs() < 1e-12);
    }

    #[test]
    fn test_expected_score_non_finite() {
        assert!(expected_score(f64::NAN).is_nan());
        assert_eq!(expected_score(f64::INFINITY), 0.0);
        assert_eq!(expected_score(f64::NEG_INFINITY), 1.0);
    }

    #[test]
    fn test_instance_expected_score_matches_free_function() {
        let engine = EloEngine::default();
        for diff in [-1234.5, -400.0, 0.0, 17.0, 399.9, 2500.0] {
            assert_eq!(
                engine.expected_score(diff).to_bits(),
                expected_score(diff).to_bits()
            );
        }
    }

    #[test]
    fn test_adjust_known_examples() {
        assert_eq!(adjust(1000.0, 1000.0, 1.0, 40.0), 20.0);
        assert_eq!(adjust(1000.0, 1000.0, 0.0, 40.0), -20.0);
        assert_eq!(adjust(1000.0, 1000.0, 0.5, 40.0), 0.0);
        // Favourite winning gains little: 40 * (1 - 10/11) = 3.6
        assert_eq!(adjust(1400.0, 1000.0, 1.0, 40.0), 4.0);
        // Underdog winning gains a lot: 40 * (1 - 1/11) = 36.4
        assert_eq!(adjust(1000.0, 1400.0, 1.0, 40.0), 36.0);
    }

    #[test]
    fn test_adjust_rounds_half_away_from_zero() {
        // Equal ratings: delta is k * (score - 0.5)
        assert_eq!(adjust(1500.0, 1500.0, 1.0, 5.0), 3.0);
        assert_eq!(adjust(1500.0, 1500.0, 0.0, 5.0), -3.0);
    }

    #[test]
    fn test_adjust_propagates_nan() {
        assert!(adjust(f64::NAN, 1000.0, 1.0, 40.0).is_nan());
        assert!(adjust(1000.0, 1000.0, f64::NAN, 40.0).is_nan());
    }

    #[test]
    fn test_default_engine() {
        let engine = EloEngine::default();
        assert_eq!(engine.floor(), 100.0);
        assert_eq!(engine.resolve_k(-500.0), 40.0);
        assert_eq!(engine.resolve_k(1500.0), 40.0);
        assert_eq!(engine.adjust(1000.0, 1000.0, 1.0, None), 20.0);
        assert_eq!(engine, EloEngine::new(EngineConfig::default()).unwrap());
    }

    #[test]
    fn test_engine_rejects_invalid_config() {
        let config = EngineConfig {
            floor: 100.0,
            k: KPolicy::Constant(f64::NAN),
        };
        assert!(EloEngine::new(config).is_err());
    }

    #[test]
    fn test_constant_k_engine() {
        let engine = EloEngine::new(EngineConfig {
            k: KPolicy::Constant(32.0),
            ..EngineConfig::default()
        })
        .unwrap();

        for rating in [-300.0, 0.0, 1000.0, 2800.0] {
            assert_eq!(engine.resolve_k(rating), 32.0);
        }
        assert_eq!(engine.adjust(1000.0, 1000.0, 1.0, None), 16.0);
    }

    #[test]
    fn test_adjust_resolves_k_from_subject_rating() {
        let engine = tiered_engine();

        // Subject at 500 gets K=20 regardless of the opponent's band
        assert_eq!(engine.adjust(500.0, 500.0, 1.0, None), 10.0);
        // Subject at 2000 gets K=60
        assert_eq!(engine.adjust(2000.0, 2000.0, 1.0, None), 30.0);
        // Explicit K wins over the policy
        assert_eq!(engine.adjust(2000.0, 2000.0, 1.0, Some(10.0)), 5.0);
    }

    #[test]
    fn test_adjust_with_floor() {
        let engine = EloEngine::default();

        // Unclamped delta would take 110 down to 90
        assert_eq!(engine.adjust(110.0, 110.0, 0.0, None), -20.0);
        assert_eq!(engine.adjust_with_floor(110.0, 110.0, 0.0, None), -10.0);

        // Wins are never clamped
        assert_eq!(engine.adjust_with_floor(110.0, 110.0, 1.0, None), 20.0);
    }

    #[test]
    fn test_calculate_rating_changes() {
        let engine = tiered_engine();
        let result = MatchResult::from_outcome(900.0, 1100.0, MatchOutcome::Win).unwrap();

        let changes = engine.calculate_rating_changes(&result);

        // Subject resolved at K=20, opponent at K=40
        assert_eq!(
            changes.subject.delta,
            engine.adjust(900.0, 1100.0, 1.0, Some(20.0))
        );
        assert_eq!(
            changes.opponent.delta,
            engine.adjust(1100.0, 900.0, 0.0, Some(40.0))
        );
        assert!(changes.subject.delta > 0.0);
        assert!(changes.opponent.delta < 0.0);
        assert_eq!(changes.subject.new_rating, 900.0 + changes.subject.delta);
    }

    #[test]
    fn test_calculator_config() {
        let engine = tiered_engine();
        let config = RatingCalculator::config(&engine);

        assert_eq!(config["type"], "elo");
        assert_eq!(config["floor"], 100.0);
        assert_eq!(config["k"]["1000"], 40.0);
    }
}
