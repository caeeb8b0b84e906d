//! Standard Elo update for pairwise outcomes.

use crate::error::RankingError;
use serde::Serialize;

/// Points at stake per comparison.
pub const DEFAULT_K_FACTOR: f64 = 32.0;
/// Rating assigned to a generation entering the pool.
pub const DEFAULT_INITIAL_RATING: f64 = 1000.0;
/// Rating gap at which the stronger side is expected to win ten times as often.
const SCALE: f64 = 400.0;

/// Ratings of both sides before and after one vote.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingChange {
    pub winner_before: f64,
    pub winner_after: f64,
    pub loser_before: f64,
    pub loser_after: f64,
}

impl RatingChange {
    /// Points the winner gained (equal to the points the loser lost).
    #[must_use]
    pub fn delta(&self) -> f64 {
        self.winner_after - self.winner_before
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EloCalculator {
    k_factor: f64,
    initial_rating: f64,
}

impl Default for EloCalculator {
    fn default() -> Self {
        Self { k_factor: DEFAULT_K_FACTOR, initial_rating: DEFAULT_INITIAL_RATING }
    }
}

impl EloCalculator {
    /// # Errors
    /// Returns [`RankingError::InvalidRating`] if `k_factor` is not a positive
    /// finite number or `initial_rating` is not finite.
    pub fn new(k_factor: f64, initial_rating: f64) -> Result<Self, RankingError> {
        if !k_factor.is_finite() || k_factor <= 0.0 {
            return Err(RankingError::InvalidRating {
                message: format!("k-factor must be positive and finite, got {k_factor}").into(),
                context: None,
            });
        }
        if !initial_rating.is_finite() {
            return Err(RankingError::InvalidRating {
                message: format!("initial rating must be finite, got {initial_rating}").into(),
                context: None,
            });
        }
        Ok(Self { k_factor, initial_rating })
    }

    #[must_use]
    pub const fn k_factor(&self) -> f64 {
        self.k_factor
    }

    #[must_use]
    pub const fn initial_rating(&self) -> f64 {
        self.initial_rating
    }

    /// Probability that a side rated `rating` beats a side rated `opponent`.
    #[must_use]
    pub fn expected_score(rating: f64, opponent: f64) -> f64 {
        1.0 / (1.0 + 10f64.powf((opponent - rating) / SCALE))
    }

    /// Zero-sum update: the winner gains exactly what the loser gives up.
    #[must_use]
    pub fn update(&self, winner: f64, loser: f64) -> RatingChange {
        let delta = self.k_factor * (1.0 - Self::expected_score(winner, loser));
        RatingChange {
            winner_before: winner,
            winner_after: winner + delta,
            loser_before: loser,
            loser_after: loser - delta,
        }
    }
}
