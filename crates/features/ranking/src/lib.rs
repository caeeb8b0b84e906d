//! Ranking feature slice.
//!
//! Holds the generation pool, records pairwise votes and keeps every
//! generation's Elo rating current. Votes name generations by id only; the
//! store resolves them and rejects dangling references.

mod elo;
mod error;
mod service;
mod snapshot;
pub mod store;

pub use crate::elo::{DEFAULT_INITIAL_RATING, DEFAULT_K_FACTOR, EloCalculator, RatingChange};
pub use crate::error::{RankingError, RankingErrorExt};
pub use crate::service::{
    ImportSummary, RankingService, RankingServiceInner, RatingChanged, Standing, VoteOutcome,
};
pub use crate::snapshot::Snapshot;
pub use crate::store::{GenerationStore, MemoryStore};

/// Initialize the ranking slice over an in-memory store.
///
/// # Errors
/// Returns [`RankingError::InvalidRating`] if the Elo parameters are unusable.
pub fn init(k_factor: f64, initial_rating: f64) -> Result<RankingService, RankingError> {
    let elo = EloCalculator::new(k_factor, initial_rating)?;
    tracing::info!(k_factor, initial_rating, "Ranking slice initialized");

    Ok(RankingService::new(elo))
}
