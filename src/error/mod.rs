//! Error types and handling for innorebuild
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Only conditions that make the whole run meaningless live here. Problems
//! with individual declarations or copies are recovered and collected as
//! [`crate::report::Issue`]s instead.
//!
//! This module is organized into sub-modules by error domain:
//! - [`script`]: Install script errors
//! - [`fs`]: File system and extraction tree errors
//! - [`config`]: Configuration errors
//! - [`unpack`]: External unpacker errors

pub mod config;
pub mod fs;
pub mod script;
pub mod unpack;


use miette::Diagnostic;
use thiserror::Error;

/// Main error type for innorebuild operations
#[derive(Error, Diagnostic, Debug)]
pub enum RebuildError {
    // Script errors
    #[error("Install script not found: {path}")]
    #[diagnostic(
        code(innorebuild::script::not_found),
        help("innounp writes install_script.iss into the extraction root; pass --script to use another file")
    )]
    ScriptNotFound { path: String },

    #[error("Failed to read install script: {path}: {reason}")]
    #[diagnostic(code(innorebuild::script::read_failed))]
    ScriptReadFailed { path: String, reason: String },

    // Extraction tree errors
    #[error("Extraction directory not found: {path}")]
    #[diagnostic(
        code(innorebuild::fs::extraction_not_found),
        help("Point rebuild at the directory innounp extracted into")
    )]
    ExtractionNotFound { path: String },

    #[error("Extraction directory contains no files: {path}")]
    #[diagnostic(code(innorebuild::fs::extraction_empty))]
    ExtractionEmpty { path: String },

    #[error("Failed to walk extraction directory: {path}: {reason}")]
    #[diagnostic(code(innorebuild::fs::walk_failed))]
    ExtractionWalkFailed { path: String, reason: String },

    #[error("Failed to create directory: {path}: {reason}")]
    #[diagnostic(code(innorebuild::fs::create_dir_failed))]
    CreateDirFailed { path: String, reason: String },

    #[error("Installer file not found: {path}")]
    #[diagnostic(code(innorebuild::fs::installer_not_found))]
    InstallerNotFound { path: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(innorebuild::fs::io_error))]
    IoError { message: String },

    // Configuration errors
    #[error("Failed to read configuration file: {path}: {reason}")]
    #[diagnostic(code(innorebuild::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(innorebuild::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(
        code(innorebuild::config::invalid),
        help("Every architecture rule needs a label and at least one pattern")
    )]
    ConfigInvalid { message: String },

    // Unpacker errors
    #[error("Unpacker executable not found: {path}")]
    #[diagnostic(
        code(innorebuild::unpack::not_found),
        help("Place innounp.exe in ./bin, put innounp on PATH, or pass --innounp")
    )]
    UnpackerNotFound { path: String },

    #[error("Unpacker failed: {reason}")]
    #[diagnostic(code(innorebuild::unpack::failed))]
    UnpackFailed { reason: String },

    #[error("Unsupported shell: {shell}")]
    #[diagnostic(
        code(innorebuild::cli::unsupported_shell),
        help("Supported shells: bash, elvish, fish, powershell, zsh")
    )]
    UnsupportedShell { shell: String },
}

impl From<std::io::Error> for RebuildError {
    fn from(err: std::io::Error) -> Self {
        RebuildError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for RebuildError {
    fn from(err: serde_yaml::Error) -> Self {
        RebuildError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for RebuildError {
    fn from(err: serde_json::Error) -> Self {
        RebuildError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<inquire::InquireError> for RebuildError {
    fn from(err: inquire::InquireError) -> Self {
        RebuildError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, RebuildError>;
