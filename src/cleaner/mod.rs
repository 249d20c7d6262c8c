//! Notebook cleaning: apply [`rules::RULES`] in memory, then persist a
//! backup and the cleaned document.

pub mod rules;

use serde_json::Value;
use tracing::info;

use crate::core::errors::{AppError, AppResult};
use crate::core::types::{CleanOptions, CleanReport};
use crate::notebook::io;

pub fn clean_document(notebook: &mut Value) -> CleanReport {
    let mut report = CleanReport::default();
    for rule in rules::RULES {
        rules::apply_rule(rule, notebook, &mut report);
    }
    report
}

pub fn clean_notebook(options: &CleanOptions) -> AppResult<CleanReport> {
    let path = options.notebook_path.as_path();
    if !path.exists() {
        return Err(AppError::NotFound(path.display().to_string()));
    }

    let mut notebook = io::load_notebook(path)?;
    let mut report = clean_document(&mut notebook);
    report.dry_run = options.dry_run;

    if options.dry_run {
        info!("Dry run: {} left untouched", path.display());
        return Ok(report);
    }

    info!("Creating backup at: {}", io::backup_path(path).display());
    let backup = io::write_backup(path)?;
    report.backup_path = Some(backup);

    info!("Writing cleaned notebook to: {}", path.display());
    io::write_notebook(path, &notebook)?;

    Ok(report)
}
