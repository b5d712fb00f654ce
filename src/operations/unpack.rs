//! Unpack operation: staging an installer and running innounp
//!
//! The installer stays where it is. A `tmp_<stem>_<timestamp>` staging
//! directory is created under the working directory and innounp extracts
//! into its `<stem>_extracted` subdirectory. The staging directory then
//! serves as the output root of the rebuild.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

use crate::error::{self, Result};

/// Directories of one staged unpack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Staging {
    pub dir: PathBuf,
    pub extracted: PathBuf,
}

impl Staging {
    /// Compute staging paths for `installer` under `work_dir`
    pub fn for_installer(installer: &Path, work_dir: &Path, timestamp: &str) -> Self {
        let stem = installer
            .file_stem()
            .map_or_else(|| "installer".into(), |s| s.to_string_lossy());
        let dir = work_dir.join(format!("tmp_{stem}_{timestamp}"));
        let extracted = dir.join(format!("{stem}_extracted"));
        Self { dir, extracted }
    }
}

fn find_on_path(names: &[&str]) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path)
        .flat_map(|dir| names.iter().map(move |name| dir.join(name)))
        .find(|candidate| candidate.is_file())
}

/// Unpack orchestrator
pub struct UnpackOperation {
    unpacker: PathBuf,
}

impl UnpackOperation {
    /// Locate innounp
    ///
    /// Tries `explicit`, then `<work_dir>/bin/innounp.exe`, then `PATH`.
    pub fn locate(explicit: Option<&Path>, work_dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            if path.is_file() {
                return Ok(Self {
                    unpacker: path.to_path_buf(),
                });
            }
            return Err(error::unpack::not_found(path));
        }

        let bundled = work_dir.join("bin").join("innounp.exe");
        if bundled.is_file() {
            return Ok(Self { unpacker: bundled });
        }

        find_on_path(&["innounp", "innounp.exe"])
            .map(|unpacker| Self { unpacker })
            .ok_or_else(|| error::unpack::not_found(&bundled))
    }

    /// Stage `installer` under `work_dir` and extract it
    pub fn execute(&self, installer: &Path, work_dir: &Path) -> Result<Staging> {
        if !installer.is_file() {
            return Err(error::fs::installer_not_found(installer));
        }
        let installer = dunce::canonicalize(installer)?;

        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
        let staging = Staging::for_installer(&installer, work_dir, &timestamp);
        std::fs::create_dir_all(&staging.extracted)
            .map_err(|e| error::fs::create_dir_failed(&staging.extracted, &e))?;
        info!(dir = %staging.dir.display(), "staging directory created");

        info!(unpacker = %self.unpacker.display(), installer = %installer.display(), "extracting");
        let output = Command::new(&self.unpacker)
            .arg("-x")
            .arg(&installer)
            .current_dir(&staging.extracted)
            .output()
            .map_err(|e| {
                error::unpack::failed(format!("cannot run {}: {e}", self.unpacker.display()))
            })?;
        debug!(stdout = %String::from_utf8_lossy(&output.stdout), "unpacker output");

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(error::unpack::failed(format!(
                "{} exited with {}: {}",
                self.unpacker.display(),
                output.status,
                stderr.trim()
            )));
        }

        info!("extraction finished");
        Ok(staging)
    }
}
