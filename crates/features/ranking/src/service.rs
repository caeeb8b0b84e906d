use crate::elo::{EloCalculator, RatingChange};
use crate::error::{RankingError, RankingErrorExt};
use crate::snapshot::Snapshot;
use crate::store::{GenerationStore, MemoryStore};
use arena_domain::models::{Generation, GenerationId, GenerationKind, Vote, VoteId};
use arena_kernel::safe_nanoid;
use chrono::Utc;
use fxhash::FxHashMap;
use serde::Serialize;
use std::cmp::Ordering;
use std::ops::Deref;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info, trace};

/// Buffer of the rating-change channel; slow subscribers lag past this.
const EVENT_CAPACITY: usize = 128;

/// A recorded vote together with the rating movement it caused.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoteOutcome {
    pub vote: Vote,
    pub change: RatingChange,
}

/// Event broadcast to subscribers after each applied vote.
pub type RatingChanged = Arc<VoteOutcome>;

/// One row of the leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Standing {
    /// 1-based position.
    pub rank: usize,
    pub generation: Generation,
    pub wins: usize,
    pub losses: usize,
}

/// Counts reported by [`RankingService::import`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub generations: usize,
    pub votes: usize,
}

#[derive(Debug)]
pub struct RankingServiceInner {
    store: Arc<dyn GenerationStore>,
    elo: EloCalculator,
    events: broadcast::Sender<RatingChanged>,
}

/// Thread-safe handle over the generation pool and its ratings.
#[derive(Debug, Clone)]
pub struct RankingService {
    inner: Arc<RankingServiceInner>,
}

impl Deref for RankingService {
    type Target = RankingServiceInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Default for RankingService {
    fn default() -> Self {
        Self::new(EloCalculator::default())
    }
}

impl RankingService {
    /// Creates a service over a fresh [`MemoryStore`].
    #[must_use]
    pub fn new(elo: EloCalculator) -> Self {
        Self::with_store(Arc::new(MemoryStore::new()), elo)
    }

    #[must_use]
    pub fn with_store(store: Arc<dyn GenerationStore>, elo: EloCalculator) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self { inner: Arc::new(RankingServiceInner { store, elo, events }) }
    }

    #[must_use]
    pub fn elo(&self) -> &EloCalculator {
        &self.inner.elo
    }

    /// Enters a new generation into the pool at the initial rating.
    ///
    /// # Errors
    /// Returns [`RankingError::Model`] if `content` does not fit `kind`.
    pub fn submit(
        &self,
        kind: GenerationKind,
        content: impl Into<String>,
    ) -> Result<Generation, RankingError> {
        let id = GenerationId::new(safe_nanoid!())?;
        let generation =
            Generation::new(id, kind, content, self.elo.initial_rating(), Utc::now())
                .context("Submitting generation")?;

        self.store.insert(generation.clone())?;
        info!(id = %generation.id(), kind = %kind, "Generation submitted");
        Ok(generation)
    }

    /// Adds an existing generation, keeping its id, rating and timestamp.
    ///
    /// # Errors
    /// Returns [`RankingError::DuplicateGeneration`] if the id is already taken.
    pub fn insert(&self, generation: Generation) -> Result<(), RankingError> {
        self.store.insert(generation)
    }

    #[must_use]
    pub fn generation(&self, id: &GenerationId) -> Option<Generation> {
        self.store.get(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Records that `winner_id` beat `loser_id` and updates both ratings.
    ///
    /// # Errors
    /// Returns [`RankingError::Model`] for a self-vote and
    /// [`RankingError::UnknownGeneration`] if either id is not in the pool.
    /// On error nothing is recorded.
    pub fn record_vote(
        &self,
        winner_id: &GenerationId,
        loser_id: &GenerationId,
    ) -> Result<VoteOutcome, RankingError> {
        let vote = Vote::new(
            VoteId::new(safe_nanoid!())?,
            winner_id.clone(),
            loser_id.clone(),
            Utc::now(),
        )
        .context("Recording vote")?;

        self.apply(vote)
    }

    /// Applies an already-built vote (e.g. one received from another node).
    ///
    /// # Errors
    /// See [`GenerationStore::apply_vote`].
    pub fn apply(&self, vote: Vote) -> Result<VoteOutcome, RankingError> {
        let elo = self.elo;
        let change = self.store.apply_vote(vote.clone(), &|w, l| elo.update(w, l))?;

        debug!(
            vote = %vote.id(),
            winner = %vote.winner_id(),
            loser = %vote.loser_id(),
            delta = change.delta(),
            "Vote recorded"
        );

        let outcome = VoteOutcome { vote, change };
        self.publish(&outcome);
        Ok(outcome)
    }

    /// Applies `votes` one by one, oldest `created_at` first.
    /// Votes applied before a failing one stay applied.
    ///
    /// # Errors
    /// Returns the first failure, with the offending vote id as context.
    pub fn replay(&self, votes: impl IntoIterator<Item = Vote>) -> Result<usize, RankingError> {
        let mut votes: Vec<Vote> = votes.into_iter().collect();
        votes.sort_by_key(Vote::created_at);

        let count = votes.len();
        for vote in votes {
            let id = vote.id().clone();
            self.apply(vote).context(format!("Replaying vote {id}"))?;
        }
        Ok(count)
    }

    /// Restores a snapshot: generations keep their stored ratings and the
    /// votes join the log, oldest `created_at` first, without being re-rated.
    /// The stored ratings already reflect those votes; call
    /// [`RankingService::recompute`] to derive them from the log instead.
    ///
    /// # Errors
    /// Returns the first duplicate or dangling reference found. Generations and
    /// votes accepted before the failure stay recorded.
    pub fn import(&self, snapshot: Snapshot) -> Result<ImportSummary, RankingError> {
        let Snapshot { generations, mut votes } = snapshot;
        let total = generations.len();

        for generation in generations {
            self.store.insert(generation).context("Importing generation")?;
        }

        votes.sort_by_key(Vote::created_at);
        let logged = votes.len();
        for vote in votes {
            let id = vote.id().clone();
            self.store.append_vote(vote).context(format!("Importing vote {id}"))?;
        }

        info!(generations = total, votes = logged, "Snapshot imported");
        Ok(ImportSummary { generations: total, votes: logged })
    }

    /// Resets every rating to the initial value and replays the whole vote log.
    ///
    /// # Errors
    /// See [`GenerationStore::rebuild`].
    pub fn recompute(&self) -> Result<usize, RankingError> {
        let elo = self.elo;
        let replayed = self.store.rebuild(elo.initial_rating(), &|w, l| elo.update(w, l))?;
        info!(votes = replayed, "Ratings recomputed from vote log");
        Ok(replayed)
    }

    /// Recorded votes, in recording order.
    #[must_use]
    pub fn votes(&self) -> Vec<Vote> {
        self.store.votes()
    }

    /// Generations by rating (highest first), older first on ties, then by id.
    #[must_use]
    pub fn leaderboard(&self, kind: Option<GenerationKind>, limit: Option<usize>) -> Vec<Standing> {
        let mut record: FxHashMap<GenerationId, (usize, usize)> = FxHashMap::default();
        for vote in self.store.votes() {
            record.entry(vote.winner_id().clone()).or_default().0 += 1;
            record.entry(vote.loser_id().clone()).or_default().1 += 1;
        }

        let mut pool: Vec<Generation> = self
            .store
            .list()
            .into_iter()
            .filter(|g| kind.is_none_or(|kind| g.kind() == kind))
            .collect();
        pool.sort_by(standing_order);

        pool.into_iter()
            .take(limit.unwrap_or(usize::MAX))
            .enumerate()
            .map(|(index, generation)| {
                let (wins, losses) = record.get(generation.id()).copied().unwrap_or_default();
                Standing { rank: index + 1, generation, wins, losses }
            })
            .collect()
    }

    /// Receives every successfully applied vote.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<RatingChanged> {
        self.events.subscribe()
    }

    fn publish(&self, outcome: &VoteOutcome) {
        match self.events.send(Arc::new(outcome.clone())) {
            Ok(count) => trace!(vote = %outcome.vote.id(), count, "Vote outcome dispatched"),
            Err(_) => trace!(vote = %outcome.vote.id(), "Vote outcome dropped: no active subscribers"),
        }
    }
}

fn standing_order(a: &Generation, b: &Generation) -> Ordering {
    b.elo_rating()
        .total_cmp(&a.elo_rating())
        .then_with(|| a.created_at().cmp(&b.created_at()))
        .then_with(|| a.id().cmp(b.id()))
}
