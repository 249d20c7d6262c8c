use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error, info};

use notebook_cleaner_lib::{clean_notebook, cli::Args, core::errors::AppResult, logging};

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("[{}] {err}", err.code());
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> AppResult<()> {
    let options = args.into_options()?;
    let report = clean_notebook(&options)?;

    if report.is_noop() {
        info!("Nothing to remove");
    } else {
        info!("{}", report.summary());
    }
    if let Ok(json) = serde_json::to_string(&report) {
        debug!("report: {json}");
    }

    if !report.dry_run {
        info!("Notebook cleaning completed!");
    }
    Ok(())
}
