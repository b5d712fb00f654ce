//! Unpack command implementation

use std::path::PathBuf;

use console::Style;
use inquire::Text;

use crate::cli::UnpackArgs;
use crate::config::RebuildConfig;
use crate::error::{self, Result};
use crate::operations::{RebuildOperation, RebuildOptions, UnpackOperation};

use super::helpers;

pub fn run(config: &RebuildConfig, quiet: bool, args: UnpackArgs) -> Result<()> {
    let installer = match args.installer {
        Some(path) => path,
        None => prompt_installer()?,
    };

    let work_dir = helpers::current_dir()?;
    let unpack = UnpackOperation::locate(args.innounp.as_deref(), &work_dir)?;

    let chatty = !quiet && !args.json;
    if chatty {
        println!(
            "{} {}",
            Style::new().bold().cyan().apply_to("Extracting"),
            installer.display()
        );
    }
    let staging = unpack.execute(&installer, &work_dir)?;
    if chatty {
        println!(
            "{} {}",
            Style::new().bold().green().apply_to("Extracted to"),
            staging.extracted.display()
        );
    }

    let options = RebuildOptions {
        extraction_dir: staging.extracted,
        script: None,
        output_root: Some(staging.dir),
    };
    let mut progress = helpers::progress_for(!chatty);
    let report = RebuildOperation::new(config).execute(&options, progress.as_mut())?;

    helpers::print_report(&report, args.json, quiet)
}

fn prompt_installer() -> Result<PathBuf> {
    let answer = Text::new("Path to the Inno Setup installer:")
        .with_help_message("Drag the .exe onto this window or type its path")
        .prompt()?;
    let path = clean_path_input(&answer);
    if path.as_os_str().is_empty() {
        return Err(error::fs::installer_not_found(&path));
    }
    Ok(path)
}

/// Strip whitespace and the quotes terminals add around dropped paths
fn clean_path_input(input: &str) -> PathBuf {
    PathBuf::from(input.trim().trim_matches(['"', '\'']))
}
