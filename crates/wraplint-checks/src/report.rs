//! # Report Aggregation
//!
//! Collects raw per-file findings and the cross-file realism findings,
//! applies the execution profile once, splits findings into errors and
//! warnings by effective severity, and decides the run outcome.
//!
//! The same [`RunReport`] backs the console rendering and the
//! machine-readable JSON report.

use std::fmt::Write as _;

use serde::Serialize;
use wraplint_core::{apply_profile, decide_exit, ExitStatus, LintItem, Profile, Severity};

/// Raw checker output for one input file, before the profile is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct FileFindings {
    pub file: String,
    pub parsed: bool,
    pub schema_valid: bool,
    pub items: Vec<LintItem>,
}

/// Findings split by effective severity.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FindingSet {
    pub errors: Vec<LintItem>,
    pub warnings: Vec<LintItem>,
}

impl FindingSet {
    fn split(mut items: Vec<LintItem>, profile: Profile) -> Self {
        apply_profile(&mut items, profile);
        let (errors, warnings) = items.into_iter().partition(|i| i.severity == Severity::Hard);
        Self { errors, warnings }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    /// Whether this set fails a run under `profile`.
    pub fn fails(&self, profile: Profile) -> bool {
        decide_exit(self.errors.len(), self.warnings.len(), profile) != ExitStatus::Success
    }
}

/// Per-file section of the run report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    pub file: String,
    pub parsed: bool,
    pub schema_valid: bool,
    #[serde(flatten)]
    pub findings: FindingSet,
}

/// Run totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub files: usize,
    pub passed: usize,
    pub failed: usize,
    pub errors: usize,
    pub warnings: usize,
}

/// Complete outcome of one lint run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub profile: Profile,
    pub schema: String,
    pub files: Vec<FileReport>,
    pub cross_file: FindingSet,
    pub summary: Summary,
    pub status: ExitStatus,
}

/// Build the run report. `files` keeps the caller's order.
pub fn aggregate(
    profile: Profile,
    schema: impl Into<String>,
    files: Vec<FileFindings>,
    cross_file: Vec<LintItem>,
) -> RunReport {
    let files: Vec<FileReport> = files
        .into_iter()
        .map(|f| FileReport {
            file: f.file,
            parsed: f.parsed,
            schema_valid: f.schema_valid,
            findings: FindingSet::split(f.items, profile),
        })
        .collect();
    let cross_file = FindingSet::split(cross_file, profile);

    let failed = files.iter().filter(|f| f.findings.fails(profile)).count();
    let errors =
        files.iter().map(|f| f.findings.errors.len()).sum::<usize>() + cross_file.errors.len();
    let warnings =
        files.iter().map(|f| f.findings.warnings.len()).sum::<usize>() + cross_file.warnings.len();
    let summary = Summary {
        files: files.len(),
        passed: files.len() - failed,
        failed,
        errors,
        warnings,
    };
    let status = decide_exit(errors, warnings, profile);

    RunReport {
        profile,
        schema: schema.into(),
        files,
        cross_file,
        summary,
        status,
    }
}

impl RunReport {
    pub fn exit_code(&self) -> u8 {
        self.status.code()
    }

    /// Human-readable console rendering.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let s = &self.summary;
        let _ = writeln!(
            out,
            "Files: {}/{} passed (profile: {}, schema: {})",
            s.passed, s.files, self.profile, self.schema
        );
        for file in &self.files {
            let f = &file.findings;
            let label = if f.fails(self.profile) {
                "FAIL"
            } else if f.warnings.is_empty() {
                "OK"
            } else {
                "WARN"
            };
            if f.is_empty() {
                let _ = writeln!(out, "  {label}: {}", file.file);
            } else {
                let _ = writeln!(
                    out,
                    "  {label}: {} ({} error(s), {} warning(s))",
                    file.file,
                    f.errors.len(),
                    f.warnings.len()
                );
            }
            write_items(&mut out, f);
        }
        if !self.cross_file.is_empty() {
            let _ = writeln!(
                out,
                "Cross-file: {} finding(s)",
                self.cross_file.errors.len() + self.cross_file.warnings.len()
            );
            write_items(&mut out, &self.cross_file);
        }
        let _ = writeln!(
            out,
            "\nSummary: {} file(s), {} passed, {} failed, {} error(s), {} warning(s)",
            s.files, s.passed, s.failed, s.errors, s.warnings
        );
        out
    }
}

fn write_items(out: &mut String, set: &FindingSet) {
    for item in set.errors.iter().chain(&set.warnings) {
        let _ = writeln!(out, "    {item}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wraplint_core::LintCode;

    fn findings(file: &str, items: Vec<LintItem>) -> FileFindings {
        FileFindings {
            file: file.to_string(),
            parsed: true,
            schema_valid: true,
            items,
        }
    }

    fn degenerate() -> LintItem {
        LintItem::new(
            LintCode::DegenerateClose,
            "b.json:market_outcomes.indices[0].close",
            "repeat",
        )
    }

    #[test]
    fn clean_run_succeeds() {
        let report = aggregate(Profile::Strict, "s.json", vec![findings("a.json", vec![])], vec![]);
        assert_eq!(report.status, ExitStatus::Success);
        assert_eq!(report.summary.passed, 1);
        assert!(report.render_text().contains("OK: a.json"));
    }

    #[test]
    fn realism_soft_under_lenient() {
        let report = aggregate(Profile::Lenient, "s.json", vec![], vec![degenerate()]);
        assert_eq!(report.status, ExitStatus::Success);
        assert_eq!(report.cross_file.warnings.len(), 1);
        assert_eq!(report.cross_file.warnings[0].severity, Severity::Soft);
    }

    #[test]
    fn realism_hard_under_strict() {
        let report = aggregate(Profile::Strict, "s.json", vec![], vec![degenerate()]);
        assert_eq!(report.status, ExitStatus::LintFailure);
        assert_eq!(report.cross_file.errors.len(), 1);
        assert_eq!(report.cross_file.errors[0].severity, Severity::Hard);
    }

    #[test]
    fn soft_file_finding_fails_only_strict() {
        let soft = LintItem::new(LintCode::EvidenceNotFactStyled, "evidence_items[0].excerpt", "m");
        let lenient = aggregate(
            Profile::Lenient,
            "s",
            vec![findings("a.json", vec![soft.clone()])],
            vec![],
        );
        assert_eq!(lenient.summary.failed, 0);
        assert!(lenient.render_text().contains("WARN: a.json"));
        let strict = aggregate(Profile::Strict, "s", vec![findings("a.json", vec![soft])], vec![]);
        assert_eq!(strict.summary.failed, 1);
        assert_eq!(strict.exit_code(), 1);
    }

    #[test]
    fn totals_and_json_shape() {
        let hard = LintItem::new(LintCode::MoverSign, "movers.top_gainers[0].return_pct", "m");
        let report = aggregate(
            Profile::Lenient,
            "market_wrap_day.schema.json",
            vec![findings("a.json", vec![hard]), findings("b.json", vec![])],
            vec![degenerate()],
        );
        assert_eq!(
            report.summary,
            Summary { files: 2, passed: 1, failed: 1, errors: 1, warnings: 1 }
        );
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["profile"], "lenient");
        assert_eq!(json["status"], "lint_failure");
        assert_eq!(json["files"][0]["errors"][0]["code"], "MOVERS_SIGN");
        assert_eq!(json["files"][0]["errors"][0]["severity"], "HARD");
        assert_eq!(json["cross_file"]["warnings"][0]["code"], "REALISM_DEGENERATE_CLOSE");
    }
}
