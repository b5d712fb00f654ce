//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - rebuild: Rebuild command arguments
//! - unpack: Unpack command arguments
//! - inspect: Inspect command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod completions;
pub mod inspect;
pub mod rebuild;
pub mod unpack;

pub use completions::CompletionsArgs;
pub use inspect::InspectArgs;
pub use rebuild::RebuildArgs;
pub use unpack::UnpackArgs;

/// innorebuild - per-architecture rebuild of Inno Setup extractions
///
/// Splits what innounp extracted from an installer into one directory tree per
/// detected architecture.
#[derive(Parser, Debug)]
#[command(
    name = "innorebuild",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Rebuild Inno Setup extractions into per-architecture trees",
    long_about = "innorebuild reads the install_script.iss that innounp extracts from an \
                  Inno Setup installer, works out which files belong to which variant \
                  (x64, ARM64, ...) and rebuilds one Output_<arch> directory per variant \
                  with the common files copied into each.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  innorebuild unpack tool-setup.exe            \x1b[90m# Extract and rebuild an installer\x1b[0m\n   \
                  innorebuild rebuild ./tool-setup_extracted   \x1b[90m# Rebuild an existing extraction\x1b[0m\n   \
                  innorebuild inspect ./install_script.iss     \x1b[90m# List variants of a script\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Suppress progress and summary output
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Configuration file (defaults to ./innorebuild.yaml when present)
    #[arg(long, short = 'c', global = true, env = "INNOREBUILD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Also write log events to this file
    #[arg(long, global = true, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rebuild per-architecture trees from an existing extraction
    Rebuild(RebuildArgs),

    /// Extract an installer with innounp, then rebuild it
    Unpack(UnpackArgs),

    /// Show the variants a script declares without copying anything
    Inspect(InspectArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
