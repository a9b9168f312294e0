// Legacy project file migration core
pub mod document;
pub mod project;
pub mod progress;
pub mod transformation;
pub mod transforms;
pub mod compatibility;
pub mod pipeline;
pub mod config;
pub mod reporter;
pub mod logging;

// Re-export core types for convenience
pub use document::{Document, Element, XName, XNamespace};
pub use project::Project;
pub use progress::{NullProgress, ProgressSink, TracingProgress};
pub use transformation::{AppliedTransformation, FieldChange, Transformation, TransformationError};
pub use transforms::TargetFrameworkTransformation;
pub use compatibility::{is_unsupported_project_type, CompatibilityError, UnsupportedProjectType};
pub use pipeline::{MigrationOutcome, MigrationPipeline, PipelineError, PipelineResult};
pub use config::{ConfigError, MigrationOptions};
pub use reporter::{MigrationReport, MigrationReporter, ReportFormat};
