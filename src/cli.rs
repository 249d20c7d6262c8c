use std::path::PathBuf;

use clap::Parser;

use crate::core::errors::AppResult;
use crate::core::types::CleanOptions;

/// Strip widget state and Colab metadata from a Jupyter notebook so it
/// renders on GitHub. A backup is written to `<notebook>.ipynb.backup`.
#[derive(Debug, Parser)]
#[command(name = "notebook-cleaner", version)]
pub struct Args {
    /// Notebook to clean in place
    #[arg(env = "NOTEBOOK_CLEANER_PATH")]
    pub notebook: PathBuf,

    /// Report what would be removed without writing any file
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn into_options(self) -> AppResult<CleanOptions> {
        Ok(CleanOptions::new(self.notebook)?.dry_run(self.dry_run))
    }
}
