//! Materialization of per-architecture output trees
//!
//! For every bucket a fresh `<root>/<prefix><label>` directory receives the
//! common files followed by the bucket's own files, so an architecture
//! specific file replaces a common one with the same target. Copying is
//! additive and best effort: a failed copy or tree root is recorded and the
//! rest go on.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::bucket::{Buckets, Placement};
use crate::classify::ArchitectureLabel;
use crate::progress::ProgressReporter;
use crate::report::Issue;

/// One rebuilt architecture tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTree {
    pub label: ArchitectureLabel,
    pub path: PathBuf,
    pub arch_files: usize,
    pub files_copied: usize,
}

/// Result of a rebuild
#[derive(Debug, Clone, Default)]
pub struct RebuildOutcome {
    pub trees: Vec<OutputTree>,
    pub failures: Vec<Issue>,
}

/// Builds output trees under a root directory
pub struct TreeRebuilder<'a> {
    output_root: &'a Path,
    prefix: &'a str,
}

fn copy_one(source: &Path, target: &Path) -> std::io::Result<()> {
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::copy(source, target).map(|_| ())
}

impl<'a> TreeRebuilder<'a> {
    pub fn new(output_root: &'a Path, prefix: &'a str) -> Self {
        Self {
            output_root,
            prefix,
        }
    }

    /// Directory a label's tree is written to
    pub fn tree_path(&self, label: &ArchitectureLabel) -> PathBuf {
        self.output_root
            .join(format!("{}{}", self.prefix, label.as_str()))
    }

    /// Build every tree of `buckets`
    pub fn rebuild(
        &self,
        buckets: &Buckets,
        progress: &mut dyn ProgressReporter,
    ) -> RebuildOutcome {
        let mut outcome = RebuildOutcome::default();
        progress.start(buckets.total_copies() as u64);

        for (label, files) in &buckets.arch {
            let root = self.tree_path(label);
            progress.begin_tree(label.as_str());
            if let Err(e) = std::fs::create_dir_all(&root) {
                warn!(%label, path = %root.display(), error = %e, "cannot create output tree");
                outcome.failures.push(Issue::TreeFailure {
                    path: root,
                    reason: e.to_string(),
                });
                for placement in buckets.common.iter().chain(files) {
                    progress.file_done(&placement.installer_path);
                }
                continue;
            }
            info!(%label, path = %root.display(), "building output tree");

            let mut copied = 0;
            for placement in buckets.common.iter().chain(files) {
                if self.place(&root, placement, &mut outcome.failures) {
                    copied += 1;
                }
                progress.file_done(&placement.installer_path);
            }

            outcome.trees.push(OutputTree {
                label: label.clone(),
                path: root,
                arch_files: files.len(),
                files_copied: copied,
            });
        }

        progress.finish();
        outcome
    }

    fn place(&self, root: &Path, placement: &Placement, failures: &mut Vec<Issue>) -> bool {
        let target = root.join(&placement.target);
        match copy_one(&placement.source, &target) {
            Ok(()) => {
                debug!(
                    source = %placement.source.display(),
                    target = %target.display(),
                    "copied"
                );
                true
            }
            Err(e) => {
                warn!(
                    source = %placement.source.display(),
                    target = %target.display(),
                    error = %e,
                    "copy failed"
                );
                failures.push(Issue::CopyFailure {
                    source: placement.source.clone(),
                    target,
                    reason: e.to_string(),
                });
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::SilentProgress;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn placement(source: &Path, target: &str) -> Placement {
        Placement {
            installer_path: target.to_string(),
            source: source.to_path_buf(),
            target: PathBuf::from(target),
        }
    }

    fn fixture(temp: &TempDir) -> Buckets {
        let src = temp.path().join("src");
        std::fs::create_dir_all(&src).unwrap();
        std::fs::write(src.join("a.dll"), "x64 payload").unwrap();
        std::fs::write(src.join("readme.txt"), "readme").unwrap();

        Buckets {
            arch: BTreeMap::from([
                (
                    ArchitectureLabel::new("x64"),
                    vec![placement(&src.join("a.dll"), "bin/a.dll")],
                ),
                (ArchitectureLabel::new("ARM64"), Vec::new()),
            ]),
            common: vec![placement(&src.join("readme.txt"), "readme.txt")],
            multi_arch: true,
            issues: Vec::new(),
        }
    }

    fn snapshot(root: &Path) -> Vec<(PathBuf, Vec<u8>)> {
        let mut out: Vec<(PathBuf, Vec<u8>)> = walkdir::WalkDir::new(root)
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_file())
            .map(|e| {
                (
                    e.path().strip_prefix(root).unwrap().to_path_buf(),
                    std::fs::read(e.path()).unwrap(),
                )
            })
            .collect();
        out.sort();
        out
    }

    #[test]
    fn test_rebuild_layout() {
        let temp = TempDir::new().unwrap();
        let buckets = fixture(&temp);
        let out = temp.path().join("out");

        let outcome = TreeRebuilder::new(&out, "Output_")
            .rebuild(&buckets, &mut SilentProgress::default());

        assert!(outcome.failures.is_empty());
        assert_eq!(outcome.trees.len(), 2);
        assert!(out.join("Output_x64/bin/a.dll").is_file());
        assert!(out.join("Output_x64/readme.txt").is_file());
        assert!(out.join("Output_ARM64/readme.txt").is_file());
        assert!(!out.join("Output_ARM64/bin").exists());
    }

    #[test]
    fn test_arch_file_wins_over_common_target() {
        let temp = TempDir::new().unwrap();
        let mut buckets = fixture(&temp);
        let common_src = temp.path().join("src/common.dll");
        std::fs::write(&common_src, "common").unwrap();
        buckets.common.push(placement(&common_src, "bin/a.dll"));

        let out = temp.path().join("out");
        TreeRebuilder::new(&out, "Output_")
            .rebuild(&buckets, &mut SilentProgress::default());

        assert_eq!(
            std::fs::read_to_string(out.join("Output_x64/bin/a.dll")).unwrap(),
            "x64 payload"
        );
        assert_eq!(
            std::fs::read_to_string(out.join("Output_ARM64/bin/a.dll")).unwrap(),
            "common"
        );
    }

    #[test]
    fn test_copy_failure_does_not_abort() {
        let temp = TempDir::new().unwrap();
        let mut buckets = fixture(&temp);
        buckets
            .common
            .insert(0, placement(&temp.path().join("src/vanished.bin"), "gone.bin"));

        let out = temp.path().join("out");
        let outcome = TreeRebuilder::new(&out, "Output_")
            .rebuild(&buckets, &mut SilentProgress::default());

        assert_eq!(outcome.failures.len(), 2);
        assert!(out.join("Output_x64/bin/a.dll").is_file());
        assert!(out.join("Output_ARM64/readme.txt").is_file());
        let x64 = outcome
            .trees
            .iter()
            .find(|t| t.label.as_str() == "x64")
            .unwrap();
        assert_eq!(x64.files_copied, 2);
    }

    #[test]
    fn test_blocked_tree_root_is_recorded_and_others_built() {
        let temp = TempDir::new().unwrap();
        let buckets = fixture(&temp);
        let out = temp.path().join("out");
        std::fs::create_dir_all(&out).unwrap();
        std::fs::write(out.join("Output_x64"), "not a directory").unwrap();

        let mut progress = SilentProgress::default();
        let outcome = TreeRebuilder::new(&out, "Output_").rebuild(&buckets, &mut progress);

        assert_eq!(outcome.trees.len(), 1);
        assert_eq!(outcome.trees[0].label.as_str(), "ARM64");
        assert!(out.join("Output_ARM64/readme.txt").is_file());
        assert_eq!(outcome.failures.len(), 1);
        assert!(matches!(
            &outcome.failures[0],
            Issue::TreeFailure { path, .. } if path == &out.join("Output_x64")
        ));
        assert_eq!(progress.files, buckets.total_copies() as u64);
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let buckets = fixture(&temp);
        let first = temp.path().join("first");
        let second = temp.path().join("second");

        for root in [&first, &second] {
            TreeRebuilder::new(root, "Output_")
                .rebuild(&buckets, &mut SilentProgress::default());
        }
        // and once more over an existing tree
        TreeRebuilder::new(&second, "Output_")
            .rebuild(&buckets, &mut SilentProgress::default());

        assert_eq!(snapshot(&first), snapshot(&second));
    }

    #[test]
    fn test_progress_counts_every_copy() {
        let temp = TempDir::new().unwrap();
        let buckets = fixture(&temp);
        let mut progress = SilentProgress::default();
        TreeRebuilder::new(&temp.path().join("out"), "Output_")
            .rebuild(&buckets, &mut progress);
        assert_eq!(progress.files, buckets.total_copies() as u64);
    }

    #[test]
    fn test_custom_prefix() {
        let rebuilder = TreeRebuilder::new(Path::new("/r"), "Build-");
        assert_eq!(
            rebuilder.tree_path(&ArchitectureLabel::new("ARM64")),
            PathBuf::from("/r/Build-ARM64")
        );
    }
}
