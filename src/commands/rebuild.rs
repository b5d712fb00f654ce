//! Rebuild command implementation

use crate::cli::RebuildArgs;
use crate::config::RebuildConfig;
use crate::error::Result;
use crate::operations::{RebuildOperation, RebuildOptions};

use super::helpers;

pub fn run(config: &RebuildConfig, quiet: bool, args: RebuildArgs) -> Result<()> {
    let options = RebuildOptions {
        extraction_dir: args.extracted,
        script: args.script,
        output_root: args.output,
    };

    let mut progress = helpers::progress_for(quiet || args.json);
    let report = RebuildOperation::new(config).execute(&options, progress.as_mut())?;

    helpers::print_report(&report, args.json, quiet)
}
