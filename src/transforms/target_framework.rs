use tracing::debug;
use crate::{
    progress::ProgressSink,
    project::Project,
    transformation::{Transformation, TransformationError},
};

/// Overwrites the project's target frameworks and the output-path append flag.
///
/// An empty framework list leaves the project's frameworks alone, so the
/// step can be used just to toggle output-path behavior. The flag is
/// always written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetFrameworkTransformation {
    target_frameworks: Vec<String>,
    append_target_framework_to_output_path: bool,
}

impl TargetFrameworkTransformation {
    pub fn new<I, S>(target_frameworks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_append_target_framework(target_frameworks, true)
    }

    pub fn with_append_target_framework<I, S>(target_frameworks: I, append: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            target_frameworks: target_frameworks.into_iter().map(Into::into).collect(),
            append_target_framework_to_output_path: append,
        }
    }

    pub fn append_target_framework_to_output_path(&self) -> bool {
        self.append_target_framework_to_output_path
    }
}

impl Transformation for TargetFrameworkTransformation {
    fn name(&self) -> &str {
        "target-framework"
    }

    fn transform(
        &self,
        project: Option<&mut Project>,
        progress: &mut dyn ProgressSink,
    ) -> Result<(), TransformationError> {
        let Some(project) = project else {
            return Ok(());
        };

        if !self.target_frameworks.is_empty() {
            project.target_frameworks.clear();
            project.target_frameworks.extend(self.target_frameworks.iter().cloned());
            progress.report(&format!(
                "Target frameworks set to {}",
                self.target_frameworks.join(";")
            ));
        }

        project.append_target_framework_to_output_path = self.append_target_framework_to_output_path;
        debug!(
            append = self.append_target_framework_to_output_path,
            "AppendTargetFrameworkToOutputPath applied"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{document::XNamespace, progress::NullProgress};

    fn project_with(frameworks: &[&str], append: bool) -> Project {
        Project::empty(XNamespace::msbuild())
            .with_target_frameworks(frameworks.iter().copied())
            .with_append_target_framework_to_output_path(append)
    }

    #[test]
    fn test_replaces_frameworks_in_order() {
        let mut project = project_with(&["net45", "net40"], true);
        let transformation = TargetFrameworkTransformation::new(["net472", "net6.0"]);

        transformation.transform(Some(&mut project), &mut NullProgress).unwrap();

        assert_eq!(project.target_frameworks, vec!["net472", "net6.0"]);
        assert_eq!(project.primary_target_framework(), Some("net472"));
    }

    #[test]
    fn test_replacement_ignores_prior_contents() {
        let configured = ["netstandard2.0"];
        for prior in [vec![], vec!["net20"], vec!["net35", "net40", "net45"]] {
            let mut project = project_with(&prior, true);
            TargetFrameworkTransformation::new(configured)
                .transform(Some(&mut project), &mut NullProgress)
                .unwrap();
            assert_eq!(project.target_frameworks, vec!["netstandard2.0"]);
        }
    }

    #[test]
    fn test_duplicates_preserved() {
        let mut project = project_with(&[], true);
        TargetFrameworkTransformation::new(["net48", "net48", "net6.0"])
            .transform(Some(&mut project), &mut NullProgress)
            .unwrap();
        assert_eq!(project.target_frameworks, vec!["net48", "net48", "net6.0"]);
    }

    #[test]
    fn test_empty_list_keeps_frameworks_but_sets_flag() {
        let mut project = project_with(&["net45"], true);
        let transformation =
            TargetFrameworkTransformation::with_append_target_framework(Vec::<String>::new(), false);
        let mut progress: Vec<String> = Vec::new();

        transformation.transform(Some(&mut project), &mut progress).unwrap();

        assert_eq!(project.target_frameworks, vec!["net45"]);
        assert!(!project.append_target_framework_to_output_path);
        assert!(progress.is_empty());
    }

    #[test]
    fn test_flag_set_when_frameworks_replaced() {
        let mut project = project_with(&["net45"], false);
        TargetFrameworkTransformation::new(["net6.0"])
            .transform(Some(&mut project), &mut NullProgress)
            .unwrap();
        assert!(project.append_target_framework_to_output_path);
    }

    #[test]
    fn test_append_defaults_to_true() {
        let transformation = TargetFrameworkTransformation::new(["net6.0"]);
        assert!(transformation.append_target_framework_to_output_path());
    }

    #[test]
    fn test_absent_project_is_noop() {
        let transformation = TargetFrameworkTransformation::new(["net6.0"]);
        let mut progress: Vec<String> = Vec::new();

        let result = transformation.transform(None, &mut progress);

        assert!(result.is_ok());
        assert!(progress.is_empty());
    }

    #[test]
    fn test_reports_progress_on_replacement() {
        let mut project = project_with(&["net45"], true);
        let mut progress: Vec<String> = Vec::new();
        TargetFrameworkTransformation::new(["net472", "net6.0"])
            .transform(Some(&mut project), &mut progress)
            .unwrap();
        assert_eq!(progress, vec!["Target frameworks set to net472;net6.0".to_string()]);
    }
}
