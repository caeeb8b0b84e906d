//! Generation and vote storage.
//!
//! Votes only name generations by id; every operation that touches a vote
//! resolves those ids here and treats a miss as an integrity error.

use crate::elo::RatingChange;
use crate::error::{RankingError, RankingErrorExt};
use arena_domain::models::{Generation, GenerationId, Vote, VoteId};
use fxhash::{FxHashMap, FxHashSet};
use parking_lot::RwLock;
use std::fmt::Debug;
use tracing::trace;

/// Rating rule handed to the store so it can run inside its critical section.
pub type RateFn<'a> = &'a dyn Fn(f64, f64) -> RatingChange;

/// Storage seam of the ranking slice.
///
/// Implementations must apply each mutating call atomically: a failed call
/// leaves ratings and the vote log exactly as they were.
pub trait GenerationStore: Debug + Send + Sync {
    /// # Errors
    /// Returns [`RankingError::DuplicateGeneration`] if the id is already stored.
    fn insert(&self, generation: Generation) -> Result<(), RankingError>;

    fn get(&self, id: &GenerationId) -> Option<Generation>;

    fn list(&self) -> Vec<Generation>;

    fn len(&self) -> usize;

    /// Recorded votes, in recording order.
    fn votes(&self) -> Vec<Vote>;

    /// Resolves both sides of `vote`, rates them with `rate`, stores the new
    /// ratings and appends the vote.
    ///
    /// # Errors
    /// Returns [`RankingError::DuplicateVote`] for a known vote id,
    /// [`RankingError::UnknownGeneration`] for a dangling reference, and
    /// [`RankingError::Model`] if `rate` produced an unusable rating.
    fn apply_vote(&self, vote: Vote, rate: RateFn<'_>) -> Result<RatingChange, RankingError>;

    /// Appends `vote` to the log without touching any rating.
    ///
    /// # Errors
    /// Returns [`RankingError::DuplicateVote`] for a known vote id and
    /// [`RankingError::UnknownGeneration`] for a dangling reference.
    fn append_vote(&self, vote: Vote) -> Result<(), RankingError>;

    /// Resets every rating to `initial` and re-applies the vote log in order.
    /// Returns the number of votes replayed.
    ///
    /// # Errors
    /// Returns [`RankingError::Model`] if a replayed rating is unusable.
    fn rebuild(&self, initial: f64, rate: RateFn<'_>) -> Result<usize, RankingError>;
}

#[derive(Debug, Default)]
struct State {
    generations: FxHashMap<GenerationId, Generation>,
    votes: Vec<Vote>,
    vote_ids: FxHashSet<VoteId>,
}

impl State {
    fn check_vote(&self, vote: &Vote) -> Result<(), RankingError> {
        if self.vote_ids.contains(vote.id()) {
            return Err(RankingError::DuplicateVote {
                message: vote.id().to_string().into(),
                context: None,
            });
        }
        for id in [vote.winner_id(), vote.loser_id()] {
            if !self.generations.contains_key(id) {
                return Err(RankingError::UnknownGeneration {
                    message: format!("vote `{}` references `{id}`", vote.id()).into(),
                    context: None,
                });
            }
        }
        Ok(())
    }

    /// Rated copies of both sides; nothing is written until both succeed.
    fn rate(
        &self,
        vote: &Vote,
        rate: RateFn<'_>,
    ) -> Result<(Generation, Generation, RatingChange), RankingError> {
        let (Some(winner), Some(loser)) =
            (self.generations.get(vote.winner_id()), self.generations.get(vote.loser_id()))
        else {
            return Err(RankingError::Internal {
                message: "vote references vanished while rating".into(),
                context: None,
            });
        };

        let change = rate(winner.elo_rating(), loser.elo_rating());
        let mut winner = winner.clone();
        let mut loser = loser.clone();
        winner.apply_rating(change.winner_after).context("Rating winner")?;
        loser.apply_rating(change.loser_after).context("Rating loser")?;

        Ok((winner, loser, change))
    }

    fn commit(&mut self, winner: Generation, loser: Generation) {
        self.generations.insert(winner.id().clone(), winner);
        self.generations.insert(loser.id().clone(), loser);
    }

    fn push_vote(&mut self, vote: Vote) {
        self.vote_ids.insert(vote.id().clone());
        self.votes.push(vote);
    }
}

/// In-process store guarded by a single lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl GenerationStore for MemoryStore {
    fn insert(&self, generation: Generation) -> Result<(), RankingError> {
        let mut state = self.state.write();
        if state.generations.contains_key(generation.id()) {
            return Err(RankingError::DuplicateGeneration {
                message: generation.id().to_string().into(),
                context: None,
            });
        }
        trace!(id = %generation.id(), kind = %generation.kind(), "Generation stored");
        state.generations.insert(generation.id().clone(), generation);
        Ok(())
    }

    fn get(&self, id: &GenerationId) -> Option<Generation> {
        self.state.read().generations.get(id).cloned()
    }

    fn list(&self) -> Vec<Generation> {
        self.state.read().generations.values().cloned().collect()
    }

    fn len(&self) -> usize {
        self.state.read().generations.len()
    }

    fn votes(&self) -> Vec<Vote> {
        self.state.read().votes.clone()
    }

    fn apply_vote(&self, vote: Vote, rate: RateFn<'_>) -> Result<RatingChange, RankingError> {
        let mut state = self.state.write();
        state.check_vote(&vote)?;

        let (winner, loser, change) = state.rate(&vote, rate)?;
        state.commit(winner, loser);
        state.push_vote(vote);

        Ok(change)
    }

    fn append_vote(&self, vote: Vote) -> Result<(), RankingError> {
        let mut state = self.state.write();
        state.check_vote(&vote)?;
        trace!(vote = %vote.id(), "Vote appended");
        state.push_vote(vote);
        Ok(())
    }

    fn rebuild(&self, initial: f64, rate: RateFn<'_>) -> Result<usize, RankingError> {
        let mut state = self.state.write();

        // Work on a copy so a failure mid-replay leaves the live state intact.
        let mut generations = state.generations.clone();
        for generation in generations.values_mut() {
            generation.apply_rating(initial).context("Resetting rating")?;
        }

        let mut scratch = State { generations, ..State::default() };
        for vote in &state.votes {
            let (winner, loser, _) = scratch.rate(vote, rate)?;
            scratch.commit(winner, loser);
        }

        state.generations = scratch.generations;
        Ok(state.votes.len())
    }
}
