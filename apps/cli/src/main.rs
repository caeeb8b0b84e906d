mod args;
mod handlers;

use crate::args::{Cli, Commands};
use crate::handlers::{config, leaderboard};
use anyhow::Result;
use arena_logger::Logger;
use clap::Parser;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _logger = Logger::builder().name(env!("CARGO_PKG_NAME")).verbose(cli.verbose).init()?;

    match cli.command {
        Commands::Config { config: path } => config::show_config(path.as_deref())?,
        Commands::Leaderboard { data, kind, limit, config: path } => {
            leaderboard::show_leaderboard(&data, kind, limit, path.as_deref())?;
        },
    }

    Ok(())
}
