use arena_kernel::config::ConfigError;
use arena_ranking::RankingError;
use std::borrow::Cow;

#[arena_derive::arena_error]
pub enum BootstrapError {
    /// The bootstrap configuration could not be loaded or was rejected.
    #[error("Bootstrap config error{}: {source}", format_context(.context))]
    Config { source: ConfigError, context: Option<Cow<'static, str>> },

    #[error("Bootstrap ranking error{}: {source}", format_context(.context))]
    Ranking { source: RankingError, context: Option<Cow<'static, str>> },
}
