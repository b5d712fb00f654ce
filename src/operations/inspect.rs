//! Inspect operation: variants of a script without touching any files

use std::path::Path;

use serde::Serialize;

use crate::classify::ArchitectureLabel;
use crate::config::RebuildConfig;
use crate::error::Result;
use crate::report::Issue;
use crate::script::{ComponentOrigin, Gate, ScriptModel, SetupInfo};

/// A component with its label and the number of files gated to it
#[derive(Debug, Clone, Serialize)]
pub struct InspectedVariant {
    pub index: usize,
    pub name: String,
    pub description: String,
    pub condition: Option<String>,
    pub origin: ComponentOrigin,
    pub label: ArchitectureLabel,
    pub files: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct InspectReport {
    pub setup: SetupInfo,
    pub variants: Vec<InspectedVariant>,
    pub common_declarations: usize,
    pub issues: Vec<Issue>,
}

pub struct InspectOperation<'a> {
    config: &'a RebuildConfig,
}

impl<'a> InspectOperation<'a> {
    pub fn new(config: &'a RebuildConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self, script: &Path) -> Result<InspectReport> {
        let model = ScriptModel::load(script, self.config.script_options())?;
        Ok(self.inspect(model))
    }

    pub fn inspect(&self, model: ScriptModel) -> InspectReport {
        let labels = self.config.classifier().classify_all(&model.components);

        let variants = model
            .components
            .iter()
            .zip(labels)
            .map(|(component, label)| InspectedVariant {
                index: component.index,
                name: component.name.clone(),
                description: component.description.clone(),
                condition: component.condition.clone(),
                origin: component.origin,
                label,
                files: model
                    .files
                    .iter()
                    .filter(|f| f.gate.is_gated_to(component.index))
                    .count(),
            })
            .collect();

        let common_declarations = model
            .files
            .iter()
            .filter(|f| f.gate == Gate::Common)
            .count();

        InspectReport {
            setup: model.setup,
            variants,
            common_declarations,
            issues: model.warnings,
        }
    }
}
