use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::{pipeline::MigrationPipeline, transforms::TargetFrameworkTransformation};

/// User-facing migration settings, usually read from a YAML file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MigrationOptions {
    /// Replacement target frameworks. Empty keeps what the project declares.
    #[serde(default)]
    pub target_frameworks: Vec<String>,

    #[serde(default = "default_append_target_framework")]
    pub append_target_framework_to_output_path: bool,
}

fn default_append_target_framework() -> bool {
    true
}

impl Default for MigrationOptions {
    fn default() -> Self {
        Self {
            target_frameworks: Vec::new(),
            append_target_framework_to_output_path: true,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read options file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid options: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl MigrationOptions {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&contents)
    }

    /// Apply command-line overrides on top of file values
    pub fn with_overrides(mut self, target_frameworks: Vec<String>, append: Option<bool>) -> Self {
        if !target_frameworks.is_empty() {
            self.target_frameworks = target_frameworks;
        }
        if let Some(append) = append {
            self.append_target_framework_to_output_path = append;
        }
        self
    }

    /// Identifiers that don't look like a target framework moniker
    /// (`net48`, `net6.0`, `netstandard2.0`, `net6.0-windows`, ...).
    /// Only used for warnings; unknown monikers are still applied.
    pub fn unrecognized_frameworks(&self) -> Vec<&str> {
        self.target_frameworks
            .iter()
            .map(String::as_str)
            .filter(|tfm| !framework_moniker_pattern().is_match(tfm))
            .collect()
    }

    pub fn build_pipeline(&self) -> MigrationPipeline {
        MigrationPipeline::new().with_transformation(
            TargetFrameworkTransformation::with_append_target_framework(
                self.target_frameworks.iter().cloned(),
                self.append_target_framework_to_output_path,
            ),
        )
    }
}

fn framework_moniker_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(net\d+(\.\d+)*(-[a-z]+(\d+(\.\d+)*)?)?|netstandard\d+\.\d+|netcoreapp\d+\.\d+)$")
            .expect("static regex")
    })
}
