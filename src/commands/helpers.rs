//! Command helper utilities

use std::path::PathBuf;

use crate::error::{self, Result};
use crate::progress::{BarProgress, ProgressReporter, SilentProgress};
use crate::report::{RunReport, display};

/// Resolve the current directory
pub fn current_dir() -> Result<PathBuf> {
    std::env::current_dir()
        .map_err(|e| error::fs::io_error(format!("Failed to get current directory: {e}")))
}

/// Progress bar for interactive runs, nothing for quiet or JSON runs
pub fn progress_for(silent: bool) -> Box<dyn ProgressReporter> {
    if silent {
        Box::new(SilentProgress::default())
    } else {
        Box::new(BarProgress::new())
    }
}

/// Print a finished run as JSON, a styled summary, or not at all
pub fn print_report(report: &RunReport, json: bool, quiet: bool) -> Result<()> {
    if json {
        println!("{}", report.to_json()?);
    } else if !quiet {
        display::display_report(report);
    }
    Ok(())
}
