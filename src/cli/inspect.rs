use clap::Parser;
use std::path::PathBuf;

/// Arguments for the inspect command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  List variants and their labels:\n    innorebuild inspect ./setup_extracted/install_script.iss\n\n\
                  As JSON:\n    innorebuild inspect ./install_script.iss --json")]
pub struct InspectArgs {
    /// Install script to inspect
    pub script: PathBuf,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}
