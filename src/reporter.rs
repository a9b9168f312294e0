use serde::Serialize;
use crate::{
    pipeline::MigrationOutcome,
    transformation::{AppliedTransformation, ProjectField},
};

/// Renders migration reports for the user
pub struct MigrationReporter {
    output_format: ReportFormat,
}

/// Available output formats for migration reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    Console,
    Json,
    Yaml,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MigrationStatus {
    Migrated,
    Rejected,
}

/// Summary of one project's migration
#[derive(Debug, Clone, Serialize)]
pub struct MigrationReport {
    pub project: String,
    pub status: MigrationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    pub applied_transformations: Vec<AppliedTransformation>,
    pub target_frameworks: Vec<String>,
    pub append_target_framework_to_output_path: bool,
    pub progress: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl MigrationReporter {
    pub fn new() -> Self {
        Self {
            output_format: ReportFormat::Console,
        }
    }

    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Build a report from a migration outcome. `target_frameworks` and
    /// `append` describe the project as it stands after the outcome.
    pub fn generate_report(
        &self,
        project: impl Into<String>,
        outcome: &MigrationOutcome,
        target_frameworks: &[String],
        append: bool,
        progress: Vec<String>,
    ) -> MigrationReport {
        let (status, rejection_reason, applied_transformations) = match outcome {
            MigrationOutcome::Rejected { project_type } => (
                MigrationStatus::Rejected,
                Some(format!(
                    "{} projects ({}) cannot be migrated",
                    project_type.description, project_type.guid
                )),
                Vec::new(),
            ),
            MigrationOutcome::Migrated(result) => (
                MigrationStatus::Migrated,
                None,
                result.applied_transformations.clone(),
            ),
        };

        MigrationReport {
            project: project.into(),
            status,
            rejection_reason,
            applied_transformations,
            target_frameworks: target_frameworks.to_vec(),
            append_target_framework_to_output_path: append,
            progress,
        }
    }

    /// Format the report according to the configured output format
    pub fn format_report(&self, report: &MigrationReport) -> Result<String, ReportError> {
        match self.output_format {
            ReportFormat::Console => Ok(self.format_console_report(report)),
            ReportFormat::Json => serde_json::to_string_pretty(report)
                .map_err(|e| ReportError::SerializationError(e.to_string())),
            ReportFormat::Yaml => serde_yaml::to_string(report)
                .map_err(|e| ReportError::SerializationError(e.to_string())),
        }
    }

    fn format_console_report(&self, report: &MigrationReport) -> String {
        let mut output = String::new();

        output.push_str("=== Project Migration Report ===\n\n");
        output.push_str(&format!("Project: {}\n", report.project));

        match report.status {
            MigrationStatus::Rejected => {
                output.push_str("Status: REJECTED\n");
                if let Some(ref reason) = report.rejection_reason {
                    output.push_str(&format!("Reason: {}\n", reason));
                }
                return output;
            }
            MigrationStatus::Migrated => output.push_str("Status: MIGRATED\n"),
        }

        output.push_str(&format!("Target Frameworks: {}\n", report.target_frameworks.join(";")));
        output.push_str(&format!(
            "AppendTargetFrameworkToOutputPath: {}\n",
            report.append_target_framework_to_output_path
        ));
        output.push_str(&format!("Transformations Applied: {}\n", report.applied_transformations.len()));

        for applied in &report.applied_transformations {
            for change in &applied.changes {
                let field = match change.field {
                    ProjectField::TargetFrameworks => "TargetFrameworks",
                    ProjectField::AppendTargetFrameworkToOutputPath => "AppendTargetFrameworkToOutputPath",
                };
                output.push_str(&format!(
                    "  • [{}] {}: {} → {}\n",
                    applied.name, field, change.old_value, change.new_value
                ));
            }
        }

        output
    }
}

impl Default for MigrationReporter {
    fn default() -> Self {
        Self::new()
    }
}
