//! # CLI Argument Definitions

use arena::domain::models::GenerationKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "arena")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Operator tool for the generation arena")]
pub(crate) struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    pub(crate) verbose: bool,

    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Print the effective bootstrap configuration as JSON
    Config {
        /// Configuration file; built-in defaults when omitted. `ARENA__*` variables override either
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Import a snapshot and print its leaderboard as JSON
    Leaderboard {
        /// Snapshot file with `generations` and `votes`
        #[arg(short, long)]
        data: PathBuf,

        /// Only rank generations of this type (`image` or `text`)
        #[arg(short, long)]
        kind: Option<GenerationKind>,

        /// Maximum number of rows
        #[arg(short, long)]
        limit: Option<usize>,

        /// Configuration file; built-in defaults when omitted. `ARENA__*` variables override either
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}
