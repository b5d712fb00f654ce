use clap::Parser;
use std::path::PathBuf;

/// Arguments for the rebuild command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Rebuild next to the extraction:\n    innorebuild rebuild ./setup_extracted\n\n\
                  Rebuild into another directory:\n    innorebuild rebuild ./setup_extracted --output ./out\n\n\
                  Use a script stored elsewhere:\n    innorebuild rebuild ./setup_extracted --script ./setup.iss\n\n\
                  Machine-readable result:\n    innorebuild rebuild ./setup_extracted --json")]
pub struct RebuildArgs {
    /// Directory innounp extracted the installer into
    pub extracted: PathBuf,

    /// Install script to read (defaults to <EXTRACTED>/install_script.iss)
    #[arg(long, short = 's')]
    pub script: Option<PathBuf>,

    /// Output root for the Output_<arch> trees (defaults to the parent of <EXTRACTED>)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,
}
