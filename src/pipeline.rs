use thiserror::Error;
use tracing::{debug, info, warn};
use crate::{
    compatibility::{self, CompatibilityError, UnsupportedProjectType},
    progress::ProgressSink,
    project::Project,
    transformation::{AppliedTransformation, SettingsSnapshot, Transformation, TransformationError},
};

/// Ordered list of transformations applied to one project in place
#[derive(Default)]
pub struct MigrationPipeline {
    transformations: Vec<Box<dyn Transformation>>,
}

/// Result of running the pipeline over a project
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineResult {
    pub applied_transformations: Vec<AppliedTransformation>,
    pub target_frameworks: Vec<String>,
    pub append_target_framework_to_output_path: bool,
}

/// What happened to a project handed to `migrate`
#[derive(Debug, Clone, PartialEq)]
pub enum MigrationOutcome {
    /// The project declares an unconvertible type; nothing was run
    Rejected { project_type: &'static UnsupportedProjectType },
    Migrated(PipelineResult),
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Transformation {transformation} failed: {source}")]
    TransformationFailed {
        transformation: String,
        #[source]
        source: TransformationError,
    },

    #[error("Compatibility check failed: {0}")]
    Compatibility(#[from] CompatibilityError),
}

impl MigrationPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transformation<T: Transformation + 'static>(mut self, transformation: T) -> Self {
        self.transformations.push(Box::new(transformation));
        self
    }

    pub fn len(&self) -> usize {
        self.transformations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transformations.is_empty()
    }

    pub fn transformation_names(&self) -> Vec<&str> {
        self.transformations.iter().map(|t| t.name()).collect()
    }

    /// Apply every transformation in order. An absent project short-circuits
    /// to an empty result. The first failing step stops the run and leaves
    /// the project as the earlier steps left it.
    pub fn run(
        &self,
        project: Option<&mut Project>,
        progress: &mut dyn ProgressSink,
    ) -> Result<Option<PipelineResult>, PipelineError> {
        let Some(project) = project else {
            debug!("no project given, skipping pipeline");
            return Ok(None);
        };

        let mut applied = Vec::with_capacity(self.transformations.len());

        for transformation in &self.transformations {
            let name = transformation.name();
            debug!(transformation = name, "applying transformation");

            let before = SettingsSnapshot::capture(project);
            transformation
                .transform(Some(&mut *project), progress)
                .map_err(|source| {
                    warn!(transformation = name, error = %source, "transformation failed");
                    PipelineError::TransformationFailed {
                        transformation: name.to_string(),
                        source,
                    }
                })?;
            let after = SettingsSnapshot::capture(project);

            applied.push(AppliedTransformation {
                name: name.to_string(),
                changes: before.diff(&after),
            });
        }

        info!(steps = applied.len(), "pipeline complete");

        Ok(Some(PipelineResult {
            applied_transformations: applied,
            target_frameworks: project.target_frameworks.clone(),
            append_target_framework_to_output_path: project.append_target_framework_to_output_path,
        }))
    }

    /// Check compatibility first, then run the pipeline if the project is
    /// convertible. Unlike `run`, an absent project is an error here since
    /// the compatibility check needs one.
    pub fn migrate(
        &self,
        project: Option<&mut Project>,
        progress: &mut dyn ProgressSink,
    ) -> Result<MigrationOutcome, PipelineError> {
        let project = project.ok_or(CompatibilityError::MissingProject)?;

        if let Some(project_type) = compatibility::unsupported_project_type(project) {
            warn!(guid = project_type.guid, "refusing to migrate {} project", project_type.description);
            progress.report(&format!(
                "Project type {} ({}) is not supported, migration skipped",
                project_type.description, project_type.guid
            ));
            return Ok(MigrationOutcome::Rejected { project_type });
        }

        let result = self.run(Some(project), progress)?.unwrap_or_default();
        Ok(MigrationOutcome::Migrated(result))
    }
}
