//! Cross-file realism: degenerate repeated closes.
//!
//! A [`Corpus`] is built fresh for every run from the documents that parsed
//! and carried a valid date. It is consulted only after every document has
//! been read, in date order, so findings do not depend on the order in
//! which files were loaded or checked.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde_json::Value;
use wraplint_core::{parse_calendar_date, LintCode, LintItem, RuleTable};

use crate::document::{num_field, str_field, DayDocument};

/// One headline close extracted from a document.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlineClose {
    pub symbol: String,
    pub close: f64,
    /// Location inside the document, e.g. `market_outcomes.indices[0].close`.
    pub path: String,
}

/// The per-run view of one dated document.
#[derive(Debug, Clone, PartialEq)]
pub struct CorpusEntry {
    pub file: String,
    pub date: NaiveDate,
    pub closes: Vec<HeadlineClose>,
}

/// Dated headline closes of every document in a run.
#[derive(Debug, Default, Clone)]
pub struct Corpus {
    entries: Vec<CorpusEntry>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parsed document. Returns `false` (and adds nothing) when the
    /// document has no valid governance date.
    pub fn add_document(&mut self, file: &str, doc: &Value, rules: &RuleTable) -> bool {
        let day = DayDocument::new(doc);
        let Some(date) = day.date().and_then(|d| parse_calendar_date(d).ok()) else {
            return false;
        };
        let mut closes = Vec::new();
        for section in ["indices", "volatility"] {
            for (i, entry) in day.outcomes(section).iter().enumerate() {
                let symbol = str_field(entry, "symbol");
                let (Some(symbol), Some(close)) = (symbol, num_field(entry, "close")) else {
                    continue;
                };
                if rules.is_headline(symbol) {
                    closes.push(HeadlineClose {
                        symbol: symbol.to_string(),
                        close,
                        path: format!("market_outcomes.{section}[{i}].close"),
                    });
                }
            }
        }
        self.entries.push(CorpusEntry {
            file: file.to_string(),
            date,
            closes,
        });
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered by date, then file name.
    pub fn ordered(&self) -> Vec<&CorpusEntry> {
        let mut ordered: Vec<&CorpusEntry> = self.entries.iter().collect();
        ordered.sort_by(|a, b| (a.date, &a.file).cmp(&(b.date, &b.file)));
        ordered
    }
}

/// Exact-equality key for a close. `-0.0` and `0.0` are the same close.
fn close_key(close: f64) -> u64 {
    if close == 0.0 {
        0.0f64.to_bits()
    } else {
        close.to_bits()
    }
}

/// Report every headline close that exactly repeats a value the same
/// instrument had on an earlier-processed document.
pub fn check_corpus(corpus: &Corpus) -> Vec<LintItem> {
    // symbol -> close -> (date, file) where first seen
    let mut seen: BTreeMap<&str, BTreeMap<u64, (NaiveDate, &str)>> = BTreeMap::new();
    let mut out = Vec::new();

    for entry in corpus.ordered() {
        for close in &entry.closes {
            let by_value = seen.entry(close.symbol.as_str()).or_default();
            match by_value.get(&close_key(close.close)) {
                Some((_, first_file)) if *first_file == entry.file => {}
                Some((first_date, first_file)) => out.push(LintItem::new(
                    LintCode::DegenerateClose,
                    format!("{}:{}", entry.file, close.path),
                    format!(
                        "{} close {} on {} repeats the close first seen on {} ({})",
                        close.symbol, close.close, entry.date, first_date, first_file
                    ),
                )),
                None => {
                    by_value.insert(close_key(close.close), (entry.date, entry.file.as_str()));
                }
            }
        }
    }
    out
}
