use arena_domain::ModelError;
use std::borrow::Cow;

/// A specialized [`RankingError`] enum of this crate.
#[arena_derive::arena_error]
pub enum RankingError {
    /// A record broke its data contract.
    #[error("Ranking model error{}: {source}", format_context(.context))]
    Model { source: ModelError, context: Option<Cow<'static, str>> },

    #[error("Duplicate generation{}: {message}", format_context(.context))]
    DuplicateGeneration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A vote references a generation the store does not hold.
    #[error("Unknown generation{}: {message}", format_context(.context))]
    UnknownGeneration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Duplicate vote{}: {message}", format_context(.context))]
    DuplicateVote { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Rating parameters or results that are not usable numbers.
    #[error("Invalid rating{}: {message}", format_context(.context))]
    InvalidRating { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Snapshot error{}: {source}", format_context(.context))]
    Snapshot { source: serde_json::Error, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal ranking error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
