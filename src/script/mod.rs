//! Inno Setup install script model
//!
//! This module handles:
//! - Scanning the script innounp writes next to the payload (`install_script.iss`)
//! - Collecting `[Setup]` metadata, `[Components]` and `[Files]` declarations
//! - Resolving each file's `Components:` clause to concrete components
//!
//! Anything the scanner cannot make sense of degrades to "common" with a
//! [`Issue::ParseWarning`], never to an error.

pub mod expr;
pub mod lexer;

use std::collections::BTreeSet;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{self, Result};
use crate::report::Issue;

use expr::Expr;
use lexer::{LogicalLine, Param, param, parse_params};

/// Where a component came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentOrigin {
    /// Declared in the `[Components]` section
    Declared,
    /// Derived from a `Check:` clause on a `[Files]` entry
    Check,
}

/// A selectable variant of the installer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Component {
    /// 1-based position in declaration order
    pub index: usize,
    pub name: String,
    pub description: String,
    pub condition: Option<String>,
    pub origin: ComponentOrigin,
}

/// Which components a file declaration is installed for
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Gate {
    /// Installed regardless of the selected variant
    Common,
    /// Installed only for these component indices
    Components(BTreeSet<usize>),
}

impl Gate {
    /// Whether the file is specific to component `index`
    pub fn is_gated_to(&self, index: usize) -> bool {
        matches!(self, Gate::Components(set) if set.contains(&index))
    }
}

/// One `[Files]` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileDeclaration {
    pub line: usize,
    pub source: String,
    pub dest_dir: String,
    pub dest_name: Option<String>,
    pub components: Option<String>,
    pub check: Option<String>,
    pub gate: Gate,
}

/// Application metadata from the `[Setup]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SetupInfo {
    pub app_name: Option<String>,
    pub app_ver_name: Option<String>,
    pub app_id: Option<String>,
    pub app_version: Option<String>,
    pub app_publisher: Option<String>,
    #[serde(rename = "AppPublisherURL")]
    pub app_publisher_url: Option<String>,
    #[serde(rename = "AppSupportURL")]
    pub app_support_url: Option<String>,
    #[serde(rename = "AppUpdatesURL")]
    pub app_updates_url: Option<String>,
    pub app_comments: Option<String>,
}

impl SetupInfo {
    fn set(&mut self, key: &str, value: &str) {
        let slot = match key.to_ascii_lowercase().as_str() {
            "appname" => &mut self.app_name,
            "appvername" => &mut self.app_ver_name,
            "appid" => &mut self.app_id,
            "appversion" => &mut self.app_version,
            "apppublisher" => &mut self.app_publisher,
            "apppublisherurl" => &mut self.app_publisher_url,
            "appsupporturl" => &mut self.app_support_url,
            "appupdatesurl" => &mut self.app_updates_url,
            "appcomments" => &mut self.app_comments,
            _ => return,
        };
        *slot = Some(value.trim().trim_matches('"').to_string());
    }
}

/// Knobs for script interpretation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptOptions {
    /// Derive variants from `Check:` clauses when no components are declared
    pub check_variants: bool,
}

impl Default for ScriptOptions {
    fn default() -> Self {
        Self {
            check_variants: true,
        }
    }
}

/// Parsed install script
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScriptModel {
    pub setup: SetupInfo,
    pub components: Vec<Component>,
    pub files: Vec<FileDeclaration>,
    #[serde(skip)]
    pub warnings: Vec<Issue>,
}

/// Read and decode a script file
///
/// innounp writes either UTF-8 (with or without BOM) or UTF-16 with BOM.
/// Malformed sequences are replaced rather than rejected.
pub fn read_script(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(error::script::not_found(path));
    }
    let bytes = std::fs::read(path).map_err(|e| error::script::read_failed(path, &e))?;
    let (text, encoding, had_errors) = encoding_rs::UTF_8.decode(&bytes);
    if had_errors {
        warn!(
            path = %path.display(),
            encoding = encoding.name(),
            "script contains undecodable bytes"
        );
    }
    Ok(text.into_owned())
}

impl ScriptModel {
    /// Parse script text
    pub fn parse(text: &str, options: ScriptOptions) -> Self {
        let mut model = ScriptModel::default();

        for logical in lexer::logical_lines(text) {
            match logical.section.as_str() {
                "setup" => model.parse_setup_line(&logical),
                "components" => model.parse_component_line(&logical),
                "files" => model.parse_file_line(&logical),
                _ => {}
            }
        }

        if model.components.is_empty() && options.check_variants {
            model.derive_check_components();
        }
        model.resolve_gates();

        debug!(
            components = model.components.len(),
            files = model.files.len(),
            warnings = model.warnings.len(),
            "parsed install script"
        );
        model
    }

    /// Parse the script at `path`
    pub fn load(path: &Path, options: ScriptOptions) -> Result<Self> {
        let text = read_script(path)?;
        Ok(Self::parse(&text, options))
    }

    fn warn(&mut self, line: usize, message: String) {
        warn!(line, "{message}");
        self.warnings.push(Issue::ParseWarning { line, message });
    }

    fn parse_setup_line(&mut self, logical: &LogicalLine) {
        if let Some((key, value)) = logical.text.split_once('=') {
            self.setup.set(key.trim(), value);
        }
    }

    fn entry_params(&mut self, logical: &LogicalLine, required: &str) -> Option<Vec<Param>> {
        let params = parse_params(&logical.text).filter(|p| param(p, required).is_some());
        if params.is_none() {
            self.warn(
                logical.line,
                format!(
                    "unrecognized [{}] entry: {}",
                    logical.section, logical.text
                ),
            );
        }
        params
    }

    fn parse_component_line(&mut self, logical: &LogicalLine) {
        let Some(params) = self.entry_params(logical, "Name") else {
            return;
        };
        let name = param(&params, "Name").unwrap_or_default().to_string();
        let component = Component {
            index: self.components.len() + 1,
            description: param(&params, "Description")
                .unwrap_or_default()
                .to_string(),
            condition: param(&params, "Check").map(str::to_string),
            origin: ComponentOrigin::Declared,
            name,
        };
        self.components.push(component);
    }

    fn parse_file_line(&mut self, logical: &LogicalLine) {
        let Some(params) = self.entry_params(logical, "Source") else {
            return;
        };
        let non_empty = |key: &str| {
            param(&params, key)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        let declaration = FileDeclaration {
            line: logical.line,
            source: non_empty("Source").unwrap_or_default(),
            dest_dir: non_empty("DestDir").unwrap_or_default(),
            dest_name: non_empty("DestName"),
            components: non_empty("Components"),
            check: non_empty("Check"),
            gate: Gate::Common,
        };
        self.files.push(declaration);
    }

    fn derive_check_components(&mut self) {
        for file in &self.files {
            let Some(check) = &file.check else {
                continue;
            };
            if self
                .components
                .iter()
                .any(|c| c.name.eq_ignore_ascii_case(check))
            {
                continue;
            }
            self.components.push(Component {
                index: self.components.len() + 1,
                name: check.clone(),
                description: String::new(),
                condition: Some(check.clone()),
                origin: ComponentOrigin::Check,
            });
        }
    }

    /// Find the component a name or ordinal refers to
    pub fn resolve_component(&self, reference: &str) -> Option<usize> {
        if let Some(component) = self
            .components
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(reference))
        {
            return Some(component.index);
        }
        reference
            .parse::<usize>()
            .ok()
            .filter(|n| (1..=self.components.len()).contains(n))
    }

    fn resolve_gates(&mut self) {
        let derived_from_checks = self
            .components
            .first()
            .is_some_and(|c| c.origin == ComponentOrigin::Check);

        let mut gates = Vec::with_capacity(self.files.len());
        let mut warnings = Vec::new();

        for file in &self.files {
            let gate = if derived_from_checks {
                match &file.check {
                    Some(check) => match self.resolve_component(check) {
                        Some(index) => Gate::Components(BTreeSet::from([index])),
                        None => Gate::Common,
                    },
                    None => Gate::Common,
                }
            } else {
                match &file.components {
                    Some(clause) => match self.gate_for_clause(clause) {
                        Ok(gate) => gate,
                        Err(message) => {
                            warnings.push((file.line, message));
                            Gate::Common
                        }
                    },
                    None => Gate::Common,
                }
            };
            gates.push(gate);
        }

        for (file, gate) in self.files.iter_mut().zip(gates) {
            file.gate = gate;
        }
        for (line, message) in warnings {
            self.warn(line, message);
        }
    }

    fn gate_for_clause(&self, clause: &str) -> std::result::Result<Gate, String> {
        let expr = Expr::parse(clause)
            .map_err(|e| format!("cannot evaluate Components clause '{clause}': {e}"))?;

        let unresolved: Vec<&str> = expr
            .vars()
            .into_iter()
            .filter(|name| self.resolve_component(name).is_none())
            .collect();
        if !unresolved.is_empty() {
            return Err(format!(
                "Components clause '{clause}' references undeclared component(s): {}",
                unresolved.join(", ")
            ));
        }

        let all = 1..=self.components.len();
        let selected = expr.satisfying(all, &|name: &str| self.resolve_component(name));
        if selected.is_empty() {
            return Err(format!(
                "Components clause '{clause}' is never satisfied by a single component"
            ));
        }
        Ok(Gate::Components(selected))
    }
}
