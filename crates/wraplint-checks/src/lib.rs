//! # wraplint-checks: Rule Checkers and Run Aggregation
//!
//! Field-level checkers take one parsed day document and append
//! [`LintItem`]s at their default severity:
//!
//! | Module | Rules |
//! |--------|-------|
//! | [`governance`] | required keys, timestamp format and order, date, doc key |
//! | [`outcomes`] | OHLC bracket, return arithmetic, units, breadth, headline purity |
//! | [`events`] | event ids, fact purity, session consistency |
//! | [`reactions`] | event references, move-unit discipline |
//! | [`evidence`] | event references, id uniqueness, excerpt length, purity, style |
//! | [`movers`] | gainer/decliner return signs |
//! | [`formatting`] | embedded line breaks in any string |
//!
//! [`realism`] runs once per run over a [`Corpus`] of every parsed document.
//! [`report`] applies the execution profile and decides the exit status.
//! [`engine`] ties these together over a rayon worker pool.
//!
//! ## Crate Policy
//!
//! - Checkers never consult the execution profile.
//! - Checkers tolerate missing or mistyped fields; absence is the schema's
//!   concern.
//! - Finding order within a document is deterministic.

pub mod document;
pub mod engine;
pub mod events;
pub mod evidence;
pub mod formatting;
pub mod governance;
pub mod movers;
pub mod outcomes;
pub mod purity;
pub mod reactions;
pub mod realism;
pub mod report;

use serde_json::Value;
use wraplint_core::{LintItem, RuleTable};

pub use document::DayDocument;
pub use engine::{lint_file, run, EngineError, RunOptions};
pub use realism::{check_corpus, Corpus, CorpusEntry, HeadlineClose};
pub use report::{aggregate, FileFindings, FileReport, FindingSet, RunReport, Summary};

/// Run every field-level checker over one document.
pub fn check_document(doc: &Value, rules: &RuleTable) -> Vec<LintItem> {
    let day = DayDocument::new(doc);
    let mut out = Vec::new();
    governance::check_governance(&day, &mut out);
    outcomes::check_outcomes(&day, rules, &mut out);
    let event_ids = events::check_events(&day, rules, &mut out);
    reactions::check_reactions(&day, rules, &event_ids, &mut out);
    evidence::check_evidence(&day, rules, &event_ids, &mut out);
    movers::check_movers(&day, &mut out);
    formatting::check_newlines(doc, &mut out);
    out
}
