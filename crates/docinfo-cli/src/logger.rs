//! Logging setup for the docinfo CLI.
//!
//! Logs are written to stderr so the JSON printed on stdout stays parseable.
//!
//! The filter is chosen in this order:
//! 1. `--verbose`: DEBUG for the docinfo crates
//! 2. `--quiet`: ERROR only
//! 3. `RUST_LOG`, when set
//! 4. INFO for the docinfo crates

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter directives for `--verbose`.
pub const VERBOSE_FILTER: &str = "docinfo=debug,docinfo_cli=debug";
/// Filter directives for `--quiet`.
pub const QUIET_FILTER: &str = "docinfo=error,docinfo_cli=error";
/// Filter directives when neither flag nor `RUST_LOG` is given.
pub const DEFAULT_FILTER: &str = "docinfo=info,docinfo_cli=info";

/// Initialize the global tracing subscriber.
///
/// Call once, before anything logs. `verbose` wins over `quiet`.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(filter_for(verbose, quiet), no_color);
}

/// Initialize the global subscriber with an explicit filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}
