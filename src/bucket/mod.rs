//! Assignment of extracted files to architecture buckets
//!
//! Every file on disk ends up either in the common set or in one or more
//! architecture buckets:
//! - declared and gated: the bucket of each distinct label of its components
//! - declared and ungated: common
//! - never declared (script, `embedded\` metadata, ...): common
//!
//! Declarations whose source never made it to disk are dropped with an
//! [`Issue::MissingFile`]. Declarations whose destination would leave the
//! output tree are dropped with an [`Issue::ParseWarning`].

pub mod tree;

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, warn};

use crate::classify::ArchitectureLabel;
use crate::report::Issue;
use crate::script::{FileDeclaration, Gate, ScriptModel};

pub use tree::{ExtractedTree, Placeholders};

/// One file to be copied into an output tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placement {
    /// Path as the installer knows it (`{app}\bin\a,1.dll`)
    pub installer_path: String,
    /// File in the raw extraction
    pub source: PathBuf,
    /// Destination relative to the output tree root
    pub target: PathBuf,
}

/// Result of bucketing
#[derive(Debug, Clone, Default)]
pub struct Buckets {
    pub arch: BTreeMap<ArchitectureLabel, Vec<Placement>>,
    pub common: Vec<Placement>,
    /// More than one architecture tree will be built
    pub multi_arch: bool,
    pub issues: Vec<Issue>,
}

impl Buckets {
    /// Total copies the rebuild will perform
    pub fn total_copies(&self) -> usize {
        self.arch
            .values()
            .map(|files| files.len() + self.common.len())
            .sum()
    }
}

fn declared_target(
    declaration: &FileDeclaration,
    placeholders: &Placeholders,
) -> Option<PathBuf> {
    let name = match &declaration.dest_name {
        Some(name) => name.clone(),
        None => {
            let file_name = declaration
                .source
                .rsplit(['\\', '/'])
                .next()
                .unwrap_or(&declaration.source);
            tree::strip_variant_suffix(file_name)
        }
    };
    let dir = placeholders.to_relative(&declaration.dest_dir)?;
    Some(dir.join(tree::dest_name_path(&name)?))
}

fn labels_for(
    gate_indices: &BTreeSet<usize>,
    labels: &[ArchitectureLabel],
) -> BTreeSet<ArchitectureLabel> {
    gate_indices
        .iter()
        .filter_map(|i| i.checked_sub(1).and_then(|i| labels.get(i)))
        .cloned()
        .collect()
}

/// Partition the extraction into architecture buckets and common files
///
/// `labels` is index-aligned with `model.components`.
pub fn bucket(
    model: &ScriptModel,
    extracted: &ExtractedTree,
    labels: &[ArchitectureLabel],
    placeholders: &Placeholders,
) -> Buckets {
    let mut arch: BTreeMap<ArchitectureLabel, Vec<Placement>> = labels
        .iter()
        .map(|label| (label.clone(), Vec::new()))
        .collect();
    let mut common = Vec::new();
    let mut issues = Vec::new();
    let mut claimed = vec![false; extracted.files.len()];
    let mut any_gated = false;

    for declaration in &model.files {
        let Some(pos) = extracted.find(&declaration.source) else {
            warn!(
                line = declaration.line,
                source = %declaration.source,
                "declared file missing from extraction"
            );
            issues.push(Issue::MissingFile {
                line: declaration.line,
                source: declaration.source.clone(),
            });
            continue;
        };
        claimed[pos] = true;

        let Some(target) = declared_target(declaration, placeholders) else {
            warn!(
                line = declaration.line,
                source = %declaration.source,
                "destination leaves the output tree"
            );
            issues.push(Issue::ParseWarning {
                line: declaration.line,
                message: format!(
                    "destination of '{}' leaves the output tree, file skipped",
                    declaration.source
                ),
            });
            continue;
        };

        let placement = Placement {
            installer_path: declaration.source.clone(),
            source: extracted.files[pos].absolute.clone(),
            target,
        };

        let targets = match &declaration.gate {
            Gate::Common => BTreeSet::new(),
            Gate::Components(indices) => labels_for(indices, labels),
        };

        if targets.is_empty() {
            debug!(file = %placement.installer_path, "common");
            common.push(placement);
            continue;
        }

        any_gated = true;
        for label in targets {
            debug!(file = %placement.installer_path, %label, "bucketed");
            arch.entry(label).or_default().push(placement.clone());
        }
    }

    for (file, _) in extracted
        .files
        .iter()
        .zip(&claimed)
        .filter(|(_, claimed)| !**claimed)
    {
        let installer_path = file.relative.to_string_lossy().into_owned();
        // walked paths never carry parent segments
        let target = placeholders
            .to_relative(&installer_path)
            .unwrap_or_else(|| file.relative.clone());
        common.push(Placement {
            target,
            installer_path,
            source: file.absolute.clone(),
        });
    }

    if !any_gated {
        debug!("no architecture-specific files; building a single tree");
        arch = BTreeMap::from([(ArchitectureLabel::other(), Vec::new())]);
    }

    Buckets {
        multi_arch: arch.len() > 1,
        arch,
        common,
        issues,
    }
}
