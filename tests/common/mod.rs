//! Common test utilities for innorebuild integration tests

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// A scratch directory holding one innounp-style extraction
#[allow(dead_code)]
pub struct TestExtraction {
    /// Temporary directory; outputs land here by default
    pub temp: TempDir,
    /// Extraction root (`<temp>/setup_extracted`)
    pub root: PathBuf,
}

#[allow(dead_code)]
impl TestExtraction {
    /// Create an empty extraction root
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().join("setup_extracted");
        std::fs::create_dir_all(&root).expect("Failed to create extraction root");
        Self { temp, root }
    }

    /// Write `install_script.iss` into the extraction root
    pub fn script(self, text: &str) -> Self {
        self.file("install_script.iss", text)
    }

    /// Write a file relative to the extraction root
    pub fn file(self, relative: &str, content: &str) -> Self {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, content).expect("Failed to write file");
        self
    }

    /// Path of an output tree next to the extraction
    pub fn output(&self, label: &str) -> PathBuf {
        self.temp.path().join(format!("Output_{label}"))
    }

    /// Names of all `Output_*` directories next to the extraction
    pub fn outputs(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.temp.path())
            .expect("Failed to read temp directory")
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .filter(|name| name.starts_with("Output_"))
            .collect();
        names.sort();
        names
    }

    /// Command running in the temp directory with a clean environment
    pub fn cmd(&self) -> Command {
        innorebuild_cmd(self.temp.path())
    }
}

/// innorebuild command isolated from the caller's configuration
// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn innorebuild_cmd(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("innorebuild").expect("innorebuild binary");
    cmd.current_dir(cwd)
        .env_remove("INNOREBUILD_CONFIG")
        .env_remove("INNOUNP")
        .env_remove("RUST_LOG");
    cmd
}

/// Two-variant script: an x64-only DLL, a shared readme and an ARM64 file
/// that was never extracted
#[allow(dead_code)]
pub const TWO_ARCH_SCRIPT: &str = r#"[Setup]
AppName=Demo Tool
AppVersion=2.1
AppPublisher=Demo Corp

[Components]
Name: "x64"; Description: "Setup (x64)"
Name: "arm64"; Description: "Setup (ARM64)"

[Files]
Source: "{app}\a.dll"; DestDir: "{app}"; Components: x64
Source: "{app}\readme.txt"; DestDir: "{app}"
Source: "{app}\b.dll"; DestDir: "{app}"; Components: arm64
"#;
