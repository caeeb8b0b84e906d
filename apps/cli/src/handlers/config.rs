use super::{emit, load_state};
use anyhow::Result;
use std::path::Path;

pub(crate) fn show_config(path: Option<&Path>) -> Result<()> {
    let state = load_state(path)?;
    emit(state.config())
}
