//! Rebuild operation
//!
//! The rebuild process:
//! 1. Resolve the extraction root and its install script
//! 2. Parse the script into components and file declarations
//! 3. Classify every component to an architecture label
//! 4. Walk the extraction and bucket every file
//! 5. Build one output tree per label
//!
//! Steps 1–4 can fail fatally; nothing is written before step 5.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::bucket::{self, ExtractedTree, Placeholders};
use crate::config::RebuildConfig;
use crate::error::{self, Result};
use crate::progress::ProgressReporter;
use crate::rebuild::TreeRebuilder;
use crate::report::{RunReport, TreeSummary, VariantSummary};
use crate::script::ScriptModel;

/// Inputs of a rebuild
#[derive(Debug, Clone)]
pub struct RebuildOptions {
    /// Directory innounp extracted into
    pub extraction_dir: PathBuf,
    /// Script to read instead of `<extraction>/<script_name>`
    pub script: Option<PathBuf>,
    /// Where output trees go; defaults to the extraction's parent
    pub output_root: Option<PathBuf>,
}

/// Rebuild orchestrator
pub struct RebuildOperation<'a> {
    config: &'a RebuildConfig,
}

fn default_output_root(extraction: &Path) -> PathBuf {
    extraction
        .parent()
        .map_or_else(|| extraction.to_path_buf(), Path::to_path_buf)
}

impl<'a> RebuildOperation<'a> {
    pub fn new(config: &'a RebuildConfig) -> Self {
        Self { config }
    }

    /// Run the whole pipeline
    pub fn execute(
        &self,
        options: &RebuildOptions,
        progress: &mut dyn ProgressReporter,
    ) -> Result<RunReport> {
        if !options.extraction_dir.is_dir() {
            return Err(error::fs::extraction_not_found(&options.extraction_dir));
        }
        let extraction = dunce::canonicalize(&options.extraction_dir)?;

        let script_path = options
            .script
            .clone()
            .unwrap_or_else(|| extraction.join(&self.config.script_name));
        info!(script = %script_path.display(), "parsing install script");
        let model = ScriptModel::load(&script_path, self.config.script_options())?;

        info!(root = %extraction.display(), "walking extraction");
        let tree = ExtractedTree::walk(&extraction)?;

        let labels = self.config.classifier().classify_all(&model.components);
        for (component, label) in model.components.iter().zip(&labels) {
            info!(variant = component.index, name = %component.name, %label, "classified");
        }

        let placeholders = Placeholders::new(&self.config.app_placeholder);
        let buckets = bucket::bucket(&model, &tree, &labels, &placeholders);
        info!(
            trees = buckets.arch.len(),
            common = buckets.common.len(),
            multi_arch = buckets.multi_arch,
            "bucketed extraction"
        );

        let output_root = options
            .output_root
            .clone()
            .unwrap_or_else(|| default_output_root(&extraction));
        let outcome = TreeRebuilder::new(&output_root, &self.config.output_prefix)
            .rebuild(&buckets, progress);

        let variants = model
            .components
            .iter()
            .zip(labels)
            .map(|(component, label)| VariantSummary {
                index: component.index,
                name: component.name.clone(),
                description: component.description.clone(),
                origin: component.origin,
                label,
            })
            .collect();

        let trees = outcome
            .trees
            .into_iter()
            .map(|tree| TreeSummary {
                label: tree.label,
                path: tree.path,
                arch_files: tree.arch_files,
                files_copied: tree.files_copied,
            })
            .collect();

        let mut issues = model.warnings.clone();
        issues.extend(buckets.issues.iter().cloned());
        issues.extend(outcome.failures);

        Ok(RunReport {
            setup: model.setup,
            variants,
            trees,
            raw_extraction: extraction,
            multi_arch: buckets.multi_arch,
            common_files: buckets.common.len(),
            issues,
        })
    }
}
