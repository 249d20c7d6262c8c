use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::core::errors::{AppError, AppResult};
use crate::notebook::formatter::{to_pretty_string, AsciiMode};

const BACKUP_EXTENSION: &str = "ipynb.backup";

pub fn load_notebook(path: &Path) -> AppResult<Value> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| AppError::Io(format!("cannot read {}: {e}", path.display())))?;
    serde_json::from_str(&text)
        .map_err(|e| AppError::InvalidJson(format!("{}: {e}", path.display())))
}

/// Replaces the final extension: `nb.ipynb` and `nb.json` both map to
/// `nb.ipynb.backup`.
pub fn backup_path(path: &Path) -> PathBuf {
    path.with_extension(BACKUP_EXTENSION)
}

/// Re-reads `path` from disk and writes it next to the original.
///
/// The source is parsed again rather than taken from memory so the backup
/// never reflects in-memory edits.
pub fn write_backup(path: &Path) -> AppResult<PathBuf> {
    let original = load_notebook(path)?;
    let target = backup_path(path);
    let text = to_pretty_string(&original, AsciiMode::Escape)?;
    write_text(&target, &text)?;
    Ok(target)
}

pub fn write_notebook(path: &Path, notebook: &Value) -> AppResult<()> {
    let text = to_pretty_string(notebook, AsciiMode::Preserve)?;
    write_text(path, &text)
}

fn write_text(path: &Path, text: &str) -> AppResult<()> {
    std::fs::write(path, text)
        .map_err(|e| AppError::Io(format!("cannot write {}: {e}", path.display())))
}
