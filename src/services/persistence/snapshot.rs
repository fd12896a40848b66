use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{self, Error as SerdeError};

use super::state::PersistedState;

/// Read the local JSON cache. A missing file is an empty state.
pub fn load_snapshot(path: &Path) -> Result<PersistedState> {
    if !path.exists() {
        return Ok(PersistedState::default());
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read roster cache from {}", path.display()))?;
    let snapshot = serde_json::from_str(&data).map_err(|err| map_deser_error(err, path))?;
    Ok(snapshot)
}

pub fn save_snapshot(path: &Path, snapshot: &PersistedState) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create dir {}", parent.display()))?;
    }

    let data = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, data)
        .with_context(|| format!("failed to write roster cache to {}", path.display()))?;
    Ok(())
}

fn map_deser_error(err: SerdeError, path: &Path) -> anyhow::Error {
    anyhow::Error::new(err).context(format!(
        "failed to deserialize roster cache from {}",
        path.display()
    ))
}
