//! Tracing setup. Logs go to stderr so they never mix with summaries.

use tracing_subscriber::EnvFilter;

use crate::consts::LOG_ENV;

pub(crate) const DEFAULT_FILTER: &str = "warn";

/// Build the filter from [`LOG_ENV`], falling back to `warn`, or to `debug`
/// for this crate when `verbose` is set.
pub fn filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new(format!("{DEFAULT_FILTER},precis=debug"))
        } else {
            EnvFilter::new(DEFAULT_FILTER)
        }
    })
}

pub fn init_tracing(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .init();
}
