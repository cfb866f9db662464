//! End-to-end scenarios over the checked-in fixture and schema.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use wraplint_checks::{check_document, run, RunOptions};
use wraplint_core::{ExitStatus, LintCode, Profile, RuleTable, Severity};
use wraplint_schema::SchemaValidator;

fn repo_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../..")
}

fn fixture() -> Value {
    let text = fs::read_to_string(repo_root().join("fixtures/day_valid.json")).unwrap();
    serde_json::from_str(&text).unwrap()
}

fn schema() -> SchemaValidator {
    SchemaValidator::from_file(repo_root().join("schemas/market_wrap_day.schema.json")).unwrap()
}

fn codes(doc: &Value) -> Vec<LintCode> {
    check_document(doc, &RuleTable::baseline())
        .into_iter()
        .map(|i| i.code)
        .collect()
}

/// The fixture moved to a later date with every headline close changed
/// except SPX.
fn later_day_same_spx() -> Value {
    let mut doc = fixture();
    doc["governance"]["date"] = json!("2026-02-27");
    doc["governance"]["doc_key"] = json!("market_wrap/us/2026-02-27");
    doc["market_outcomes"]["indices"][1] = json!({
        "symbol": "NDX", "close": 17600.0, "prev_close": 17520.4,
        "return_pct": 0.45, "high": 17620.0, "low": 17500.0
    });
    doc["market_outcomes"]["indices"][2]["close"] = json!(2160.0);
    doc["market_outcomes"]["volatility"][0]["close"] = json!(14.9);
    doc["market_outcomes"]["volatility"][1]["close"] = json!(15.6);
    doc
}

fn write(dir: &Path, name: &str, doc: &Value) {
    fs::write(dir.join(name), serde_json::to_string_pretty(doc).unwrap()).unwrap();
}

fn sorted_json_files(dir: &Path) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.extension().is_some_and(|x| x == "json"))
        .collect();
    paths.sort();
    paths
}

#[test]
fn fixture_is_clean() {
    let doc = fixture();
    assert!(schema().violations(&doc).is_empty());
    assert_eq!(codes(&doc), Vec::<LintCode>::new());
}

#[test]
fn later_day_fixture_is_clean_on_its_own() {
    let doc = later_day_same_spx();
    assert!(schema().violations(&doc).is_empty());
    assert_eq!(codes(&doc), Vec::<LintCode>::new());
}

#[test]
fn close_outside_bracket_cites_instrument() {
    let mut doc = fixture();
    doc["market_outcomes"]["indices"][0] = json!({
        "symbol": "SPX", "close": 106.0, "low": 100.0, "high": 105.0
    });
    let items = check_document(&doc, &RuleTable::baseline());
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].code, LintCode::IndexBracket);
    assert_eq!(items[0].severity, Severity::Hard);
    assert!(items[0].message.contains("SPX"));
}

#[test]
fn excerpt_with_hedging_and_causal_tokens() {
    let mut doc = fixture();
    doc["evidence_items"][0]["excerpt"] =
        json!("Fed officials said rates are likely to fall due to inflation");
    let items = check_document(&doc, &RuleTable::baseline());
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].code, LintCode::ForbiddenToken);
    assert_eq!(items[0].path, "evidence_items[0].excerpt");
    assert!(items[0].message.contains("'likely'"));
    assert!(items[0].message.contains("'due to'"));
}

#[test]
fn factual_text_with_past_tense_verbs_is_clean() {
    let mut doc = fixture();
    doc["evidence_items"][2]["excerpt"] = json!(
        "Quarterly earnings release includes detailed financial metrics. \
         The company disclosed performance metrics."
    );
    doc["events"][1]["facts"][0] = json!("The Treasury scheduled a 10-year note auction");
    doc["events"][2]["facts"][1] = json!("The 8-K was filed by the company and settled by wire");
    assert_eq!(codes(&doc), Vec::<LintCode>::new());
}

#[test]
fn attribution_phrase_in_fact() {
    let mut doc = fixture();
    doc["events"][2]["facts"][1] = json!("Led by Apple, revenue was $119.6B");
    let items = check_document(&doc, &RuleTable::baseline());
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].code, LintCode::ForbiddenToken);
    assert_eq!(items[0].path, "events[2].facts[1]");
    assert!(items[0].message.contains("'led by' (attribution)"));
}

#[test]
fn vix_reaction_in_percent() {
    let mut doc = fixture();
    doc["reaction_windows"][1] = json!({
        "event_id": "EVT-20260115-001", "instrument": "VIX",
        "window": "t0_to_t+60m", "move_pct": -2.8
    });
    assert_eq!(codes(&doc), vec![LintCode::ReactionUnitDiscipline]);
}

#[test]
fn dangling_evidence_reference() {
    let mut doc = fixture();
    doc["evidence_items"][2]["event_id"] = json!("EVT-20260115-999");
    assert_eq!(codes(&doc), vec![LintCode::DanglingEventRef]);
}

#[test]
fn embedded_newline_in_fact() {
    let mut doc = fixture();
    doc["events"][0]["facts"][0] = json!("CPI rose 0.3%\nmonth over month");
    assert_eq!(codes(&doc), vec![LintCode::EmbeddedNewline]);
}

#[test]
fn field_checks_are_idempotent() {
    let mut doc = fixture();
    doc["governance"]["asof_ts"] = json!("2026-01-15T23:00:00Z");
    doc["movers"]["top_gainers"][0]["return_pct"] = json!(-0.5);
    let rules = RuleTable::baseline();
    let first = check_document(&doc, &rules);
    let second = check_document(&doc, &rules);
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn repeated_close_soft_under_lenient() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "2026-01-15.json", &fixture());
    write(dir.path(), "2026-02-27.json", &later_day_same_spx());

    let options = RunOptions {
        profile: Profile::Lenient,
        jobs: 2,
    };
    let paths = sorted_json_files(dir.path());
    let report = run(&paths, &schema(), &RuleTable::baseline(), options).unwrap();

    assert_eq!(report.status, ExitStatus::Success);
    assert_eq!(report.exit_code(), 0);
    assert!(report.cross_file.errors.is_empty());
    assert_eq!(report.cross_file.warnings.len(), 1);
    let finding = &report.cross_file.warnings[0];
    assert_eq!(finding.code, LintCode::DegenerateClose);
    assert_eq!(finding.severity, Severity::Soft);
    assert!(finding.path.starts_with("2026-02-27.json:"));
    assert!(finding.message.contains("4901.23"));
}

#[test]
fn repeated_close_hard_under_strict() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "2026-01-15.json", &fixture());
    write(dir.path(), "2026-02-27.json", &later_day_same_spx());

    let options = RunOptions {
        profile: Profile::Strict,
        jobs: 1,
    };
    let paths = sorted_json_files(dir.path());
    let report = run(&paths, &schema(), &RuleTable::baseline(), options).unwrap();

    assert_eq!(report.status, ExitStatus::LintFailure);
    assert_eq!(report.cross_file.errors.len(), 1);
    assert_eq!(report.cross_file.errors[0].severity, Severity::Hard);
    assert_eq!(report.summary.errors, 1);
}

#[test]
fn first_occurrence_follows_date_not_file_name() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a_late.json", &later_day_same_spx());
    write(dir.path(), "z_early.json", &fixture());

    let report = run(
        &sorted_json_files(dir.path()),
        &schema(),
        &RuleTable::baseline(),
        RunOptions::default(),
    )
    .unwrap();
    assert_eq!(report.cross_file.warnings.len(), 1);
    assert!(report.cross_file.warnings[0].path.starts_with("a_late.json:"));
}

#[test]
fn worker_count_does_not_change_report() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "2026-01-15.json", &fixture());
    write(dir.path(), "2026-02-27.json", &later_day_same_spx());
    let mut bad = fixture();
    bad["governance"]["date"] = json!("2026-03-02");
    write(dir.path(), "2026-03-02.json", &bad);
    fs::write(dir.path().join("broken.json"), "{ not json").unwrap();

    let paths = sorted_json_files(dir.path());
    let rules = RuleTable::baseline();
    let schema = schema();
    let strict = |jobs| RunOptions {
        profile: Profile::Strict,
        jobs,
    };
    let one = run(&paths, &schema, &rules, strict(1)).unwrap();
    let four = run(&paths, &schema, &rules, strict(4)).unwrap();
    assert_eq!(one, four);
}

#[test]
fn unparseable_file_is_reported_and_skipped() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "2026-01-15.json", &fixture());
    fs::write(dir.path().join("broken.json"), "{ \"governance\": ").unwrap();

    let report = run(
        &sorted_json_files(dir.path()),
        &schema(),
        &RuleTable::baseline(),
        RunOptions::default(),
    )
    .unwrap();
    let broken = report.files.iter().find(|f| f.file == "broken.json").unwrap();
    assert!(!broken.parsed);
    assert_eq!(broken.findings.errors.len(), 1);
    assert_eq!(broken.findings.errors[0].code, LintCode::ParseError);
    assert_eq!(report.summary.failed, 1);
    assert_eq!(report.exit_code(), 1);
}

#[test]
fn schema_violation_does_not_stop_field_checks() {
    let mut doc = fixture();
    doc["governance"]["market_session"] = json!("overnight");
    doc["movers"]["top_decliners"][0]["return_pct"] = json!(1.0);
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "2026-01-15.json", &doc);

    let report = run(
        &sorted_json_files(dir.path()),
        &schema(),
        &RuleTable::baseline(),
        RunOptions::default(),
    )
    .unwrap();
    let file = &report.files[0];
    assert!(!file.schema_valid);
    let found: Vec<LintCode> = file.findings.errors.iter().map(|i| i.code).collect();
    assert!(found.contains(&LintCode::SchemaViolation));
    assert!(found.contains(&LintCode::MoverSign));
}
