//! Configuration file handling for innorebuild
//!
//! `innorebuild.yaml` is optional. Every field has a default, so an empty
//! file and a missing file behave the same:
//!
//! ```yaml
//! script_name: install_script.iss
//! output_prefix: Output_
//! app_placeholder: "{app}"
//! check_variants: true
//! architectures:
//!   - label: ARM64EC
//!     patterns: [arm64ec]
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classify::{ArchitectureRule, Classifier};
use crate::error::{self, Result};
use crate::script::ScriptOptions;

/// File looked up in the current directory when `--config` is not given
pub const CONFIG_FILE_NAME: &str = "innorebuild.yaml";

/// Rebuild configuration (innorebuild.yaml)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RebuildConfig {
    /// Script file name inside the extraction root
    pub script_name: String,

    /// Prefix of output tree directory names
    pub output_prefix: String,

    /// Installer placeholder mapped to the output tree root
    pub app_placeholder: String,

    /// Treat `Check:` clauses as variants when no components are declared
    pub check_variants: bool,

    /// Extra classification rules, tried before the built-in ones
    pub architectures: Vec<ArchitectureRule>,
}

impl Default for RebuildConfig {
    fn default() -> Self {
        Self {
            script_name: "install_script.iss".to_string(),
            output_prefix: "Output_".to_string(),
            app_placeholder: "{app}".to_string(),
            check_variants: true,
            architectures: Vec::new(),
        }
    }
}

impl RebuildConfig {
    /// Parse configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit path, else `innorebuild.yaml` in `cwd`, else defaults
    pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        let path: PathBuf = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = cwd.join(CONFIG_FILE_NAME);
                if !candidate.is_file() {
                    debug!("no configuration file, using defaults");
                    return Ok(Self::default());
                }
                candidate
            }
        };

        let yaml = std::fs::read_to_string(&path)
            .map_err(|e| error::config::read_failed(path.display().to_string(), e.to_string()))?;
        debug!(path = %path.display(), "loaded configuration");
        Self::from_yaml(&yaml).map_err(|e| match e {
            crate::error::RebuildError::ConfigParseFailed { reason, .. } => {
                error::config::parse_failed(path.display().to_string(), reason)
            }
            other => other,
        })
    }

    fn validate(&self) -> Result<()> {
        if self.output_prefix.contains(['/', '\\']) {
            return Err(error::config::invalid(format!(
                "output_prefix must not contain path separators: {}",
                self.output_prefix
            )));
        }
        for (i, rule) in self.architectures.iter().enumerate() {
            if rule.label.trim().is_empty() {
                return Err(error::config::invalid(format!(
                    "architecture rule {} has an empty label",
                    i + 1
                )));
            }
            if rule.label.contains(['/', '\\']) {
                return Err(error::config::invalid(format!(
                    "architecture label must not contain path separators: {}",
                    rule.label
                )));
            }
            if rule.patterns.is_empty() || rule.patterns.iter().any(|p| p.trim().is_empty()) {
                return Err(error::config::invalid(format!(
                    "architecture rule '{}' needs non-empty patterns",
                    rule.label
                )));
            }
        }
        Ok(())
    }

    pub fn script_options(&self) -> ScriptOptions {
        ScriptOptions {
            check_variants: self.check_variants,
        }
    }

    pub fn classifier(&self) -> Classifier {
        Classifier::with_extra_rules(&self.architectures)
    }
}
