use std::str::FromStr;

use tracing_subscriber::filter::{filter_fn, LevelFilter};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry;

/// Installs a stderr `fmt` subscriber at `level` if none is set yet.
///
/// Unknown level names fall back to `info`. Calling this more than once is
/// harmless; only the first call takes effect.
pub fn init_logging(level: &str) {
    let level = LevelFilter::from_str(level).unwrap_or(LevelFilter::INFO);
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(level)
        .with_filter(filter_fn(|m| {
            // Skip the HTTP server's own records.
            !m.target().starts_with("tiny_http")
        }));
    let _ = registry().with(layer).try_init();
}
