//! innorebuild - per-architecture rebuild of Inno Setup extractions
//!
//! Reads the install script innounp extracts from an Inno Setup installer,
//! classifies its components by CPU architecture and rebuilds one output
//! tree per architecture with the shared files copied into each.

use clap::Parser;
use std::path::Path;

mod bucket;
mod classify;
mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod operations;
mod progress;
mod rebuild;
mod report;
mod script;

use cli::{Cli, Commands};
use config::RebuildConfig;
use error::Result;

/// Configuration from `--config`, else `./innorebuild.yaml`, else defaults
fn load_config(explicit: Option<&Path>) -> Result<RebuildConfig> {
    let cwd = commands::helpers::current_dir()?;
    RebuildConfig::load(explicit, &cwd)
}

fn run(cli: Cli) -> Result<()> {
    logging::init(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    let Cli {
        quiet,
        config,
        command,
        ..
    } = cli;

    match command {
        Commands::Rebuild(args) => {
            commands::rebuild::run(&load_config(config.as_deref())?, quiet, args)
        }
        Commands::Unpack(args) => {
            commands::unpack::run(&load_config(config.as_deref())?, quiet, args)
        }
        Commands::Inspect(args) => {
            commands::inspect::run(&load_config(config.as_deref())?, quiet, args)
        }
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
