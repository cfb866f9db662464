//! # Lint Run
//!
//! Resolves configuration, discovers the input corpus, runs the engine and
//! emits the console and machine reports.
//!
//! Configuration problems (missing schema, missing input directory, no
//! documents, unreadable rule table) are raised before any document is
//! read and surface as `Err`, which the binary maps to exit code 2.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use wraplint_checks::{RunOptions, RunReport};
use wraplint_core::{ConfigError, Profile, RuleTable};
use wraplint_schema::SchemaValidator;

/// Console output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Arguments for a lint run.
#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Path to the day-document schema contract.
    #[arg(long, default_value = "schema.json")]
    pub schema: PathBuf,

    /// Directory containing one JSON day document per date.
    #[arg(long, default_value = "sample_data")]
    pub input_dir: PathBuf,

    /// Execution profile: lenient or strict.
    #[arg(long, default_value = "lenient")]
    pub profile: Profile,

    /// Write the machine-readable JSON report to this path.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Rule table YAML replacing the built-in baseline.
    #[arg(long)]
    pub rules: Option<PathBuf>,

    /// Worker threads. 0 uses the available parallelism.
    #[arg(long, default_value_t = 0)]
    pub jobs: usize,

    /// Console output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl ValidateArgs {
    /// Arguments with every default applied, rooted at the given paths.
    pub fn new(schema: impl Into<PathBuf>, input_dir: impl Into<PathBuf>) -> Self {
        Self {
            schema: schema.into(),
            input_dir: input_dir.into(),
            profile: Profile::default(),
            output: None,
            rules: None,
            jobs: 0,
            format: OutputFormat::default(),
        }
    }
}

/// Execute a lint run.
///
/// Returns exit code: 0 on success, 1 on lint failure. Configuration and
/// I/O problems are returned as errors.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let report = lint(args)?;

    match args.format {
        OutputFormat::Text => print!("{}", report.render_text()),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&report).context("failed to serialize report")?
        ),
    }

    if let Some(ref output) = args.output {
        write_report(&report, output)?;
        tracing::info!(path = %output.display(), "wrote report");
    }

    Ok(report.exit_code())
}

/// Resolve configuration and lint the corpus without printing anything.
pub fn lint(args: &ValidateArgs) -> Result<RunReport> {
    if !args.schema.is_file() {
        return Err(ConfigError::SchemaNotFound {
            path: args.schema.clone(),
        }
        .into());
    }
    let documents = discover_documents(&args.input_dir)?;
    let rules = load_rules(args.rules.as_deref())?;
    let validator = SchemaValidator::from_file(&args.schema)
        .with_context(|| format!("failed to load schema {}", args.schema.display()))?;

    tracing::info!(
        documents = documents.len(),
        schema = %args.schema.display(),
        profile = %args.profile,
        "starting lint run"
    );

    let options = RunOptions {
        profile: args.profile,
        jobs: args.jobs,
    };
    let report = wraplint_checks::run(&documents, &validator, &rules, options)?;
    tracing::info!(
        passed = report.summary.passed,
        failed = report.summary.failed,
        errors = report.summary.errors,
        warnings = report.summary.warnings,
        "lint run complete"
    );
    Ok(report)
}

/// Every `*.json` file directly inside `dir`, sorted by path.
pub fn discover_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(ConfigError::InputDirNotFound {
            path: dir.to_path_buf(),
        }
        .into());
    }
    let mut documents = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("cannot list {}", dir.display()))? {
        let path = entry
            .with_context(|| format!("cannot list {}", dir.display()))?
            .path();
        if path.is_file() && path.extension().is_some_and(|e| e == "json") {
            documents.push(path);
        }
    }
    if documents.is_empty() {
        return Err(ConfigError::NoDocuments {
            path: dir.to_path_buf(),
        }
        .into());
    }
    documents.sort();
    Ok(documents)
}

fn load_rules(path: Option<&Path>) -> Result<RuleTable> {
    match path {
        Some(path) => {
            let rules = RuleTable::from_yaml_file(path)?;
            tracing::debug!(path = %path.display(), "loaded rule table");
            Ok(rules)
        }
        None => Ok(RuleTable::baseline()),
    }
}

fn write_report(report: &RunReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("cannot create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(report).context("failed to serialize report")?;
    fs::write(path, json + "\n")
        .with_context(|| format!("cannot write report {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discovery_skips_other_files_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["2026-01-16.json", "notes.txt", "2026-01-15.json"] {
            fs::write(dir.path().join(name), "{}").unwrap();
        }
        fs::create_dir(dir.path().join("nested.json")).unwrap();
        let found = discover_documents(dir.path()).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["2026-01-15.json", "2026-01-16.json"]);
    }

    #[test]
    fn empty_directory_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = discover_documents(dir.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::NoDocuments { .. })
        ));
    }

    #[test]
    fn missing_directory_is_a_config_error() {
        let err = discover_documents(Path::new("/nonexistent/wraplint/input")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::InputDirNotFound { .. })
        ));
    }

    #[test]
    fn report_written_with_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let report = wraplint_checks::aggregate(Profile::Lenient, "schema.json", vec![], vec![]);
        let path = dir.path().join("out/nested/report.json");
        write_report(&report, &path).unwrap();
        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["schema"], "schema.json");
        assert_eq!(written["summary"]["files"], 0);
    }

    #[test]
    fn baseline_rules_without_flag() {
        assert_eq!(load_rules(None).unwrap(), RuleTable::baseline());
    }
}
