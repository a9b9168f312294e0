use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::{progress::ProgressSink, project::Project};

/// A single migration step applied to a project in place.
///
/// Every implementation must treat an absent project as a no-op: return
/// `Ok(())` without touching anything and without reporting progress.
/// A step that cannot apply itself returns an error and the pipeline stops;
/// whatever it already mutated stays mutated.
pub trait Transformation {
    /// Stable identifier used in logs and reports
    fn name(&self) -> &str;

    fn transform(
        &self,
        project: Option<&mut Project>,
        progress: &mut dyn ProgressSink,
    ) -> Result<(), TransformationError>;
}

#[derive(Debug, Error)]
pub enum TransformationError {
    #[error("Cannot apply transformation: {0}")]
    Unsupported(String),
}

/// Project setting touched by a transformation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectField {
    TargetFrameworks,
    AppendTargetFrameworkToOutputPath,
}

/// Before/after values of one project setting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChange {
    pub field: ProjectField,
    pub old_value: String,
    pub new_value: String,
}

/// Record of a transformation that ran against a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedTransformation {
    pub name: String,
    pub changes: Vec<FieldChange>,
}

/// Snapshot of the settings transformations are allowed to rewrite,
/// used to compute `FieldChange`s around each step
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SettingsSnapshot {
    target_frameworks: Vec<String>,
    append_target_framework_to_output_path: bool,
}

impl SettingsSnapshot {
    pub(crate) fn capture(project: &Project) -> Self {
        Self {
            target_frameworks: project.target_frameworks.clone(),
            append_target_framework_to_output_path: project.append_target_framework_to_output_path,
        }
    }

    pub(crate) fn diff(&self, after: &SettingsSnapshot) -> Vec<FieldChange> {
        let mut changes = Vec::new();

        if self.target_frameworks != after.target_frameworks {
            changes.push(FieldChange {
                field: ProjectField::TargetFrameworks,
                old_value: self.target_frameworks.join(";"),
                new_value: after.target_frameworks.join(";"),
            });
        }

        if self.append_target_framework_to_output_path != after.append_target_framework_to_output_path {
            changes.push(FieldChange {
                field: ProjectField::AppendTargetFrameworkToOutputPath,
                old_value: self.append_target_framework_to_output_path.to_string(),
                new_value: after.append_target_framework_to_output_path.to_string(),
            });
        }

        changes
    }
}
