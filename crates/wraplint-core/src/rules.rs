//! # Rule Table
//!
//! Every list the checkers consult (forbidden vocabulary, unit set,
//! volatility family, headline instruments, session calendars) lives in a
//! [`RuleTable`]. The compiled-in [`RuleTable::baseline`] is the reference
//! table used by test fixtures; a YAML file of the same shape replaces it
//! at run time so rules can evolve without code changes.
//!
//! Vocabulary matching is case-insensitive substring matching, not word
//! matching: `"support"` also hits `"supported"`. Tokens are stored as
//! written, including significant whitespace such as the trailing space in
//! `"may "` or the leading space in `" led by"`. The scanned text is padded
//! with one space on each side, so such tokens still match at either end.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::RuleTableError;
use crate::temporal::SessionCalendar;

/// Family of a forbidden vocabulary token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VocabularyFamily {
    /// Causal connectors ("because", "due to").
    Causal,
    /// Sentiment words ("relief", "bullish").
    Sentiment,
    /// Interpretive / technical-analysis language ("support", "implies").
    Interpretive,
    /// Hedging modals and forecasts ("likely", "could").
    Hedging,
    /// Directional-attribution verbs (" led by", "dragged").
    Attribution,
}

impl VocabularyFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Causal => "causal",
            Self::Sentiment => "sentiment",
            Self::Interpretive => "interpretive",
            Self::Hedging => "hedging",
            Self::Attribution => "attribution",
        }
    }
}

impl fmt::Display for VocabularyFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A forbidden token found in a text field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyHit {
    pub token: String,
    pub family: VocabularyFamily,
}

/// The configurable rule table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleTable {
    /// Forbidden token → family. Ordered so scan results are deterministic.
    pub forbidden_vocabulary: BTreeMap<String, VocabularyFamily>,
    /// Closed set of accepted rates/FX/commodities units.
    pub units: Vec<String>,
    /// Symbol prefixes identifying the volatility family (`VIX`, `VIX9D`, ...).
    pub volatility_prefixes: Vec<String>,
    /// Instruments whose closes are tracked for cross-file degeneracy.
    pub headline_instruments: Vec<String>,
    /// Verbs that make a digit-free evidence excerpt fact-styled.
    pub factual_verbs: Vec<String>,
    /// Maximum evidence excerpt length, in characters.
    pub excerpt_max_chars: usize,
    /// Absolute tolerance for recomputed index returns, in percentage points.
    pub return_tolerance_pct: f64,
    /// Exchange session calendars, one per region.
    pub session_calendars: Vec<SessionCalendar>,
}

const BASELINE_VOCABULARY: &[(&str, VocabularyFamily)] = &[
    ("because", VocabularyFamily::Causal),
    ("due to", VocabularyFamily::Causal),
    ("driven by", VocabularyFamily::Causal),
    ("as investors", VocabularyFamily::Causal),
    ("on hopes", VocabularyFamily::Causal),
    ("on fears", VocabularyFamily::Causal),
    ("relief", VocabularyFamily::Sentiment),
    ("concerns", VocabularyFamily::Sentiment),
    ("sentiment", VocabularyFamily::Sentiment),
    ("risk-on", VocabularyFamily::Sentiment),
    ("risk off", VocabularyFamily::Sentiment),
    ("risk-off", VocabularyFamily::Sentiment),
    ("bullish", VocabularyFamily::Sentiment),
    ("bearish", VocabularyFamily::Sentiment),
    ("support", VocabularyFamily::Interpretive),
    ("resistance", VocabularyFamily::Interpretive),
    ("oversold", VocabularyFamily::Interpretive),
    ("overbought", VocabularyFamily::Interpretive),
    ("priced in", VocabularyFamily::Interpretive),
    ("implies", VocabularyFamily::Interpretive),
    ("signals", VocabularyFamily::Interpretive),
    ("likely", VocabularyFamily::Hedging),
    ("expected to", VocabularyFamily::Hedging),
    ("should", VocabularyFamily::Hedging),
    ("could", VocabularyFamily::Hedging),
    ("may ", VocabularyFamily::Hedging),
    ("outlook", VocabularyFamily::Hedging),
    ("forecast", VocabularyFamily::Hedging),
    (" led by", VocabularyFamily::Attribution),
    (" led gains", VocabularyFamily::Attribution),
    (" led losses", VocabularyFamily::Attribution),
    ("dragged", VocabularyFamily::Attribution),
    ("weighed", VocabularyFamily::Attribution),
    ("boosted", VocabularyFamily::Attribution),
    ("lagged", VocabularyFamily::Attribution),
];

const BASELINE_UNITS: &[&str] = &["pct", "bps", "usd", "index", "ratio", "other"];

const BASELINE_HEADLINE: &[&str] = &["SPX", "NDX", "DJIA", "RUT", "QQQ", "IWM", "VIX", "VIX9D"];

const BASELINE_FACTUAL_VERBS: &[&str] = &[
    "reported",
    "announced",
    "released",
    "said",
    "published",
    "disclosed",
    "issued",
    "stated",
    "showed",
    "approved",
    "auctioned",
    "rose",
    "fell",
    "closed",
];

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::baseline()
    }
}

impl RuleTable {
    /// The checked-in reference table.
    pub fn baseline() -> Self {
        Self {
            forbidden_vocabulary: BASELINE_VOCABULARY
                .iter()
                .map(|(tok, fam)| (tok.to_string(), *fam))
                .collect(),
            units: owned(BASELINE_UNITS),
            volatility_prefixes: owned(&["VIX"]),
            headline_instruments: owned(BASELINE_HEADLINE),
            factual_verbs: owned(BASELINE_FACTUAL_VERBS),
            excerpt_max_chars: 280,
            return_tolerance_pct: 0.02,
            session_calendars: vec![SessionCalendar::us_equities()],
        }
    }

    /// Parse a table from YAML text and check table-level constraints.
    pub fn from_yaml_str(yaml: &str, origin: &Path) -> Result<Self, RuleTableError> {
        let table: Self = serde_yaml::from_str(yaml).map_err(|source| RuleTableError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        table.check()?;
        Ok(table)
    }

    /// Load a table from a YAML file.
    pub fn from_yaml_file(path: &Path) -> Result<Self, RuleTableError> {
        let text = std::fs::read_to_string(path).map_err(|source| RuleTableError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text, path)
    }

    fn check(&self) -> Result<(), RuleTableError> {
        if self.units.is_empty() {
            return Err(RuleTableError::Invalid("unit set is empty".to_string()));
        }
        if let Some(tok) = self
            .forbidden_vocabulary
            .keys()
            .find(|t| t.trim().is_empty())
        {
            return Err(RuleTableError::Invalid(format!(
                "forbidden token {tok:?} is blank"
            )));
        }
        if !(self.return_tolerance_pct.is_finite() && self.return_tolerance_pct >= 0.0) {
            return Err(RuleTableError::Invalid(format!(
                "return tolerance must be a non-negative number, got {}",
                self.return_tolerance_pct
            )));
        }
        for cal in &self.session_calendars {
            if cal.regular_open >= cal.regular_close {
                return Err(RuleTableError::Invalid(format!(
                    "calendar {}: regular_open must precede regular_close",
                    cal.region
                )));
            }
        }
        Ok(())
    }

    /// Distinct forbidden tokens occurring in `text`, in table order.
    pub fn scan_forbidden(&self, text: &str) -> Vec<VocabularyHit> {
        let lowered = format!(" {} ", text.to_lowercase());
        self.forbidden_vocabulary
            .iter()
            .filter(|(tok, _)| lowered.contains(tok.to_lowercase().as_str()))
            .map(|(tok, fam)| VocabularyHit {
                token: tok.clone(),
                family: *fam,
            })
            .collect()
    }

    pub fn is_known_unit(&self, unit: &str) -> bool {
        self.units.iter().any(|u| u == unit)
    }

    pub fn is_volatility(&self, symbol: &str) -> bool {
        let upper = symbol.to_ascii_uppercase();
        self.volatility_prefixes
            .iter()
            .any(|p| upper.starts_with(&p.to_ascii_uppercase()))
    }

    pub fn is_headline(&self, symbol: &str) -> bool {
        self.headline_instruments.iter().any(|s| s == symbol)
    }

    /// An excerpt is fact-styled when it contains a digit or a factual verb.
    pub fn is_fact_styled(&self, excerpt: &str) -> bool {
        if excerpt.chars().any(|c| c.is_ascii_digit()) {
            return true;
        }
        let lowered = excerpt.to_lowercase();
        lowered
            .split(|c: char| !c.is_alphanumeric())
            .any(|word| self.factual_verbs.iter().any(|v| v == word))
    }

    /// Calendar for a document region, matched case-insensitively.
    pub fn calendar_for(&self, region: &str) -> Option<&SessionCalendar> {
        self.session_calendars
            .iter()
            .find(|c| c.region.eq_ignore_ascii_case(region))
    }
}
