use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Log directives, e.g. `debug` or `notebook_cleaner_lib::cleaner=trace`.
pub const LOG_ENV: &str = "NOTEBOOK_CLEANER_LOG";

pub fn filter_from(raw: Option<&str>, verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        Some(directives) => EnvFilter::builder()
            .with_default_directive(LevelFilter::INFO.into())
            .parse_lossy(directives.to_ascii_lowercase()),
        None => EnvFilter::new("info"),
    }
}

pub fn init(verbose: bool) {
    let raw = std::env::var(LOG_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(filter_from(raw.as_deref(), verbose))
        .with_target(false)
        .init();
}
