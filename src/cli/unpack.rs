use clap::Parser;
use std::path::PathBuf;

/// Arguments for the unpack command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Unpack and rebuild:\n    innorebuild unpack tool-setup.exe\n\n\
                  Prompt for the installer:\n    innorebuild unpack\n\n\
                  Use a specific innounp:\n    innorebuild unpack tool-setup.exe --innounp C:\\tools\\innounp.exe")]
pub struct UnpackArgs {
    /// Inno Setup installer (if omitted, prompts for a path)
    pub installer: Option<PathBuf>,

    /// innounp executable (defaults to ./bin/innounp.exe, then PATH)
    #[arg(long, env = "INNOUNP")]
    pub innounp: Option<PathBuf>,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,
}
