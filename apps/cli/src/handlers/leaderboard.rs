use super::{emit, load_state};
use anyhow::{Context, Result};
use arena::domain::models::GenerationKind;
use arena::ranking::Snapshot;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

pub(crate) fn show_leaderboard(
    data: &Path,
    kind: Option<GenerationKind>,
    limit: Option<usize>,
    config: Option<&Path>,
) -> Result<()> {
    let state = load_state(config)?;

    let file =
        File::open(data).with_context(|| format!("Failed to open snapshot {}", data.display()))?;
    let snapshot = Snapshot::from_reader(BufReader::new(file))
        .with_context(|| format!("Malformed snapshot {}", data.display()))?;
    let summary = state.ranking().import(snapshot).context("Failed to import snapshot")?;

    let standings = state.ranking().leaderboard(kind, limit);
    info!(
        generations = summary.generations,
        votes = summary.votes,
        rows = standings.len(),
        "Leaderboard computed"
    );

    emit(&standings)
}
