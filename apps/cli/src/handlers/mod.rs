pub(crate) mod config;
pub(crate) mod leaderboard;

use anyhow::{Context, Result};
use arena::ArenaState;
use arena::kernel::config::load_app_config_or_default;
use std::io::{self, Write};
use std::path::Path;

/// Bootstraps from `path`, or from the built-in defaults without one.
/// `ARENA__` environment overrides apply either way.
pub(crate) fn load_state(path: Option<&Path>) -> Result<ArenaState> {
    let source = path.map_or_else(|| "defaults".to_owned(), |path| path.display().to_string());
    let config = load_app_config_or_default(path)
        .with_context(|| format!("Failed to bootstrap from {source}"))?;
    let state = arena::bootstrap(config)
        .with_context(|| format!("Failed to bootstrap from {source}"))?;
    Ok(state)
}

/// Writes `value` to stdout as pretty JSON.
pub(crate) fn emit(value: &impl serde::Serialize) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    let mut out = io::stdout().lock();
    writeln!(out, "{json}").context("Failed to write to stdout")?;
    Ok(())
}
