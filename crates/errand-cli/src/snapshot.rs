//! JSON snapshot file: the whole board, read and written in one go.

use std::path::Path;

use anyhow::{Context, Result};
use errand_engine::{Board, Errand};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub errands: Vec<Errand>,
}

/// Read the board from `path`. A missing file is an empty board.
pub fn load(path: &Path, default_priority: i64) -> Result<Board> {
    let snapshot = if path.exists() {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str::<Snapshot>(&content)
            .with_context(|| format!("invalid errand snapshot {}", path.display()))?
    } else {
        debug!(path = %path.display(), "no snapshot yet, starting empty");
        Snapshot::default()
    };
    debug!(errands = snapshot.errands.len(), "snapshot loaded");
    let board = Board::from_errands(snapshot.errands)
        .with_context(|| format!("invalid errand snapshot {}", path.display()))?;
    Ok(board.with_default_priority(default_priority))
}

/// Write the board to `path`, creating parent directories as needed.
pub fn save(path: &Path, board: Board) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let snapshot = Snapshot {
        errands: board.into_errands(),
    };
    let content = serde_json::to_string_pretty(&snapshot)?;
    std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
    debug!(path = %path.display(), errands = snapshot.errands.len(), "snapshot saved");
    Ok(())
}
