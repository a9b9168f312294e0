use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use project_upgrade::{
    logging, MigrationOptions, MigrationOutcome, MigrationReporter, Project, ProgressSink,
    ReportFormat, TracingProgress,
};

#[derive(Parser, Debug)]
#[command(name = "project-upgrade")]
#[command(about = "Migrate a legacy project snapshot to the new project format")]
struct Args {
    /// Project snapshot to migrate (.yaml, .yml or .json)
    project_file: PathBuf,

    /// YAML file with migration options
    #[arg(long, value_name = "FILE")]
    options: Option<PathBuf>,

    /// Target framework to set; repeat for multi-targeting (overrides the options file)
    #[arg(long = "target-framework", value_name = "TFM")]
    target_frameworks: Vec<String>,

    /// Don't append the target framework to the output path
    #[arg(long)]
    no_append_target_framework: bool,

    /// Report format
    #[arg(long, value_enum, default_value = "console")]
    format: ReportFormat,

    /// Only report, don't write the migrated snapshot
    #[arg(long)]
    dry_run: bool,

    #[arg(short, long)]
    verbose: bool,
}

/// Keeps every progress message for the report and logs it as it arrives
#[derive(Default)]
struct RecordingProgress {
    messages: Vec<String>,
}

impl ProgressSink for RecordingProgress {
    fn report(&mut self, message: &str) {
        TracingProgress.report(message);
        self.messages.push(message.to_string());
    }
}

fn main() {
    let args = Args::parse();
    logging::init_logger(args.verbose);

    match run(args) {
        Ok(true) => {}
        Ok(false) => process::exit(2),
        Err(e) => {
            eprintln!("\n❌ Error: {:#}", e);
            process::exit(1);
        }
    }
}

/// Returns false when the project was rejected as unsupported
fn run(args: Args) -> Result<bool> {
    let mut options = match &args.options {
        Some(path) => MigrationOptions::load(path)?,
        None => MigrationOptions::default(),
    };
    let append = args.no_append_target_framework.then_some(false);
    options = options.with_overrides(args.target_frameworks, append);

    for tfm in options.unrecognized_frameworks() {
        warn!(target_framework = tfm, "unrecognized target framework moniker, applying as-is");
    }

    let mut project = read_project(&args.project_file)?;
    let pipeline = options.build_pipeline();
    let mut progress = RecordingProgress::default();

    let outcome = pipeline
        .migrate(Some(&mut project), &mut progress)
        .with_context(|| format!("Migration of {} failed", args.project_file.display()))?;

    let reporter = MigrationReporter::new().with_format(args.format);
    let report = reporter.generate_report(
        args.project_file.display().to_string(),
        &outcome,
        &project.target_frameworks,
        project.append_target_framework_to_output_path,
        progress.messages,
    );
    println!("{}", reporter.format_report(&report)?);

    let migrated = matches!(outcome, MigrationOutcome::Migrated(_));
    if migrated && !args.dry_run {
        let output = unique_output_path(&args.project_file);
        write_project(&project, &output)?;
        info!(output = %output.display(), "wrote migrated project");
    }

    Ok(migrated)
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn read_project(path: &Path) -> Result<Project> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read project snapshot {}", path.display()))?;

    let project = if is_json(path) {
        serde_json::from_str(&contents).context("Failed to parse project snapshot JSON")?
    } else {
        serde_yaml::from_str(&contents).context("Failed to parse project snapshot YAML")?
    };
    Ok(project)
}

fn write_project(project: &Project, path: &Path) -> Result<()> {
    let serialized = if is_json(path) {
        serde_json::to_string_pretty(project)?
    } else {
        serde_yaml::to_string(project)?
    };
    fs::write(path, serialized).with_context(|| format!("Failed to write {}", path.display()))
}

/// `<stem>.migrated.<ext>` next to the input, numbered if that already exists
fn unique_output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("project");
    let ext = input.extension().and_then(|s| s.to_str()).unwrap_or("yaml");

    let mut count = 0;
    let mut candidate = input.with_file_name(format!("{}.migrated.{}", stem, ext));
    while candidate.exists() {
        count += 1;
        candidate = input.with_file_name(format!("{}.migrated-{}.{}", stem, count, ext));
    }
    candidate
}
