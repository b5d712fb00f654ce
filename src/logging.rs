//! Tracing subscriber setup
//!
//! Events go to stderr, filtered by `RUST_LOG` when set. Without it the level
//! is `warn`, `info` with `--verbose` and `error` with `--quiet`.
//! `--log-file` adds a second, uncoloured layer writing the same events.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{self, Result};

fn default_directive(verbose: bool, quiet: bool) -> &'static str {
    if verbose {
        "info"
    } else if quiet {
        "error"
    } else {
        "warn"
    }
}

/// Install the global subscriber
pub fn init(verbose: bool, quiet: bool, log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    let file_layer = match log_file {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                error::fs::io_error(format!("cannot open log file {}: {e}", path.display()))
            })?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false),
            )
        }
        None => None,
    };

    // A second init (tests) leaves the first subscriber in place.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init();
    Ok(())
}
