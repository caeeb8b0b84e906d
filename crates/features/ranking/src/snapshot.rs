use crate::error::{RankingError, RankingErrorExt};
use arena_domain::models::{Generation, Vote};
use serde::Deserialize;
use std::io::Read;

/// Portable dump of a ranking pool.
///
/// ```json
/// { "generations": [ { "id": "g1", "content": "a fox", "type": "text",
///                      "elo_rating": 1000.0, "created_at": "2025-07-15T10:00:00Z" } ],
///   "votes": [] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub generations: Vec<Generation>,
    pub votes: Vec<Vote>,
}

impl Snapshot {
    /// # Errors
    /// Returns [`RankingError::Snapshot`] for malformed JSON or any record that
    /// breaks its data contract.
    pub fn from_json(json: &str) -> Result<Self, RankingError> {
        serde_json::from_str(json).context("Parsing snapshot")
    }

    /// # Errors
    /// See [`Snapshot::from_json`]; I/O failures are reported the same way.
    pub fn from_reader(reader: impl Read) -> Result<Self, RankingError> {
        serde_json::from_reader(reader).context("Reading snapshot")
    }
}
