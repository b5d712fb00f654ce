//! Architecture classification of installer components
//!
//! Installer authors name their variants freely ("Setup (x64)", "InstallARM64",
//! "64-bit binaries"...). Classification is an ordered table of substring
//! rules; the first hit wins and anything unmatched is [`ArchitectureLabel::other`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::script::Component;

/// Label of an output tree
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArchitectureLabel(String);

impl ArchitectureLabel {
    pub const OTHER: &'static str = "Other";

    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Sentinel for components no rule recognizes
    pub fn other() -> Self {
        Self(Self::OTHER.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_other(&self) -> bool {
        self.0 == Self::OTHER
    }
}

impl fmt::Display for ArchitectureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One row of the classification table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchitectureRule {
    pub label: String,
    pub patterns: Vec<String>,
}

impl ArchitectureRule {
    pub fn new(label: &str, patterns: &[&str]) -> Self {
        Self {
            label: label.to_string(),
            patterns: patterns.iter().map(|p| (*p).to_string()).collect(),
        }
    }

    fn matches(&self, haystack_lower: &str) -> bool {
        self.patterns
            .iter()
            .any(|p| haystack_lower.contains(&p.to_lowercase()))
    }
}

/// Built-in rules in priority order
pub fn default_rules() -> Vec<ArchitectureRule> {
    vec![
        ArchitectureRule::new("x64", &["x64", "amd64", "x86_64", "x86-64", "win64"]),
        ArchitectureRule::new("ARM64", &["arm64", "aarch64"]),
        ArchitectureRule::new("x86", &["x86", "i386", "i686", "win32"]),
    ]
}

/// Maps components to architecture labels
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<ArchitectureRule>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(default_rules())
    }
}

impl Classifier {
    pub fn new(rules: Vec<ArchitectureRule>) -> Self {
        Self { rules }
    }

    /// Built-in table with `extra` rules tried first
    pub fn with_extra_rules(extra: &[ArchitectureRule]) -> Self {
        let mut rules = extra.to_vec();
        rules.extend(default_rules());
        Self::new(rules)
    }

    fn classify_text(&self, text: &str) -> Option<ArchitectureLabel> {
        let lower = text.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lower))
            .map(|rule| ArchitectureLabel::new(rule.label.clone()))
    }

    /// Label for one component
    ///
    /// Name is consulted before description, description before condition.
    pub fn classify(&self, component: &Component) -> ArchitectureLabel {
        [
            Some(component.name.as_str()),
            Some(component.description.as_str()),
            component.condition.as_deref(),
        ]
        .into_iter()
        .flatten()
        .find_map(|text| self.classify_text(text))
        .unwrap_or_else(ArchitectureLabel::other)
    }

    /// Labels for every component, index-aligned with `components`
    pub fn classify_all(&self, components: &[Component]) -> Vec<ArchitectureLabel> {
        components.iter().map(|c| self.classify(c)).collect()
    }
}
