//! Run results handed back to the command layer
//!
//! Nothing is printed while the pipeline runs; every recovered problem is
//! collected as an [`Issue`] and surfaced once with the final summary.

pub mod display;

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::classify::ArchitectureLabel;
use crate::script::{ComponentOrigin, SetupInfo};

/// A non-fatal problem found during a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Issue {
    /// Script line not understood or component reference unresolved
    ParseWarning { line: usize, message: String },
    /// Declared file absent from the extraction
    MissingFile { line: usize, source: String },
    /// A copy into an output tree failed
    CopyFailure {
        source: PathBuf,
        target: PathBuf,
        reason: String,
    },
    /// An output tree root could not be created; none of its files were copied
    TreeFailure { path: PathBuf, reason: String },
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::ParseWarning { line, message } => write!(f, "line {line}: {message}"),
            Issue::MissingFile { line, source } => {
                write!(f, "line {line}: declared file not extracted: {source}")
            }
            Issue::CopyFailure {
                source,
                target,
                reason,
            } => write!(
                f,
                "copy failed: {} -> {}: {reason}",
                source.display(),
                target.display()
            ),
            Issue::TreeFailure { path, reason } => {
                write!(f, "cannot create output tree {}: {reason}", path.display())
            }
        }
    }
}

/// A component and the label it was classified as
#[derive(Debug, Clone, Serialize)]
pub struct VariantSummary {
    pub index: usize,
    pub name: String,
    pub description: String,
    pub origin: ComponentOrigin,
    pub label: ArchitectureLabel,
}

/// One rebuilt output tree
#[derive(Debug, Clone, Serialize)]
pub struct TreeSummary {
    pub label: ArchitectureLabel,
    pub path: PathBuf,
    /// Architecture-specific files placed in this tree
    pub arch_files: usize,
    /// Files successfully copied, common ones included
    pub files_copied: usize,
}

/// Structured result of a rebuild
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub setup: SetupInfo,
    pub variants: Vec<VariantSummary>,
    pub trees: Vec<TreeSummary>,
    pub raw_extraction: PathBuf,
    pub multi_arch: bool,
    pub common_files: usize,
    pub issues: Vec<Issue>,
}

impl RunReport {
    /// Copies and whole trees that did not make it to disk
    pub fn failures(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| matches!(i, Issue::CopyFailure { .. } | Issue::TreeFailure { .. }))
            .count()
    }

    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
