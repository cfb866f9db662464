//! # Run Orchestration
//!
//! Each input file is read, parsed, schema-validated and field-checked
//! independently on a rayon pool. After every file has been processed the
//! parsed documents are gathered into a [`Corpus`] for the realism pass,
//! and the whole lot is handed to [`aggregate`].
//!
//! Per-file results are collected in input order, so reports are stable
//! regardless of the worker count.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde_json::Value;
use thiserror::Error;
use wraplint_core::{LintCode, LintItem, Profile, RuleTable};
use wraplint_schema::SchemaValidator;

use crate::check_document;
use crate::realism::{check_corpus, Corpus};
use crate::report::{aggregate, FileFindings, RunReport};

/// Failures that stop a run before any report exists.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("failed to build worker pool with {jobs} thread(s): {source}")]
    Pool {
        jobs: usize,
        #[source]
        source: rayon::ThreadPoolBuildError,
    },
}

/// Knobs for one run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub profile: Profile,
    /// Worker threads; `0` uses the available parallelism.
    pub jobs: usize,
}

/// File name used in findings and reports.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Lint one file. The parsed document is returned alongside the findings
/// so the caller can feed it to the realism pass.
pub fn lint_file(
    path: &Path,
    schema: &SchemaValidator,
    rules: &RuleTable,
) -> (FileFindings, Option<Value>) {
    let file = display_name(path);
    let parsed = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))
        .and_then(|text| serde_json::from_str::<Value>(&text).map_err(|e| e.to_string()));

    let doc = match parsed {
        Ok(doc) => doc,
        Err(message) => {
            tracing::debug!(file = %file, "parse failed");
            let findings = FileFindings {
                file,
                parsed: false,
                schema_valid: false,
                items: vec![LintItem::new(LintCode::ParseError, "$", message)],
            };
            return (findings, None);
        }
    };

    let mut items: Vec<LintItem> = schema
        .violations(&doc)
        .into_iter()
        .map(|v| LintItem::new(LintCode::SchemaViolation, v.dotted_path(), v.message))
        .collect();
    let schema_valid = items.is_empty();
    items.extend(check_document(&doc, rules));
    tracing::debug!(file = %file, findings = items.len(), schema_valid, "checked");

    let findings = FileFindings {
        file,
        parsed: true,
        schema_valid,
        items,
    };
    (findings, Some(doc))
}

/// Lint every path and build the run report.
pub fn run(
    paths: &[PathBuf],
    schema: &SchemaValidator,
    rules: &RuleTable,
    options: RunOptions,
) -> Result<RunReport, EngineError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.jobs)
        .build()
        .map_err(|source| EngineError::Pool {
            jobs: options.jobs,
            source,
        })?;
    tracing::info!(
        files = paths.len(),
        threads = pool.current_num_threads(),
        profile = %options.profile,
        "linting"
    );

    let results: Vec<(FileFindings, Option<Value>)> =
        pool.install(|| paths.par_iter().map(|p| lint_file(p, schema, rules)).collect());

    let mut corpus = Corpus::new();
    let mut files = Vec::with_capacity(results.len());
    for (findings, doc) in results {
        if let Some(doc) = doc {
            if !corpus.add_document(&findings.file, &doc, rules) {
                tracing::debug!(file = %findings.file, "no valid date; excluded from realism");
            }
        }
        files.push(findings);
    }
    let cross_file = check_corpus(&corpus);

    Ok(aggregate(
        options.profile,
        schema.schema_path().display().to_string(),
        files,
        cross_file,
    ))
}
