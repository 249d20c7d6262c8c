use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::errors::{AppError, AppResult};

/// Configuration for a single cleaning run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanOptions {
    pub notebook_path: PathBuf,
    pub dry_run: bool,
}

impl CleanOptions {
    pub fn new(notebook_path: impl Into<PathBuf>) -> AppResult<Self> {
        let notebook_path = notebook_path.into();
        if notebook_path.as_os_str().is_empty() {
            return Err(AppError::InvalidInput(
                "notebook path cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            notebook_path,
            dry_run: false,
        })
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// What happened to the global `metadata.colab` entry.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ColabAction {
    #[default]
    Absent,
    Reduced,
    Removed,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CleanReport {
    /// Keys deleted from the notebook-level `metadata`.
    pub global_keys_removed: Vec<String>,
    pub colab_action: ColabAction,
    /// Global metadata keys that were seen and logged but left in place.
    pub flagged_keys: Vec<String>,
    pub cell_metadata_keys_removed: usize,
    pub widget_views_removed: usize,
    pub outputs_dropped: usize,
    pub backup_path: Option<PathBuf>,
    pub dry_run: bool,
}

impl CleanReport {
    /// True when no rule changed the document.
    pub fn is_noop(&self) -> bool {
        self.global_keys_removed.is_empty()
            && self.colab_action == ColabAction::Absent
            && self.cell_metadata_keys_removed == 0
            && self.widget_views_removed == 0
            && self.outputs_dropped == 0
    }

    pub fn summary(&self) -> String {
        format!(
            "global keys removed: {:?}, colab: {:?}, cell metadata keys removed: {}, widget views removed: {}, outputs dropped: {}",
            self.global_keys_removed,
            self.colab_action,
            self.cell_metadata_keys_removed,
            self.widget_views_removed,
            self.outputs_dropped,
        )
    }
}
