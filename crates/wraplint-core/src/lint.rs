//! # Lint Item Model
//!
//! Defines the atomic unit of a finding: a stable [`LintCode`], a
//! [`Severity`], a location path inside the document, and a message.
//!
//! Codes are grouped into [`RuleFamily`] values. Every `match` on
//! `LintCode` is exhaustive, so adding a code forces its family, wire
//! identifier, and default severity to be decided in one place.

use std::fmt;

use serde::{Serialize, Serializer};

/// Severity of a finding.
///
/// `Hard` findings always fail a run. `Soft` findings fail only under the
/// strict execution profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Hard,
    Soft,
}

impl Severity {
    /// Returns the wire identifier (`"HARD"` / `"SOFT"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hard => "HARD",
            Self::Soft => "SOFT",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Family a lint code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleFamily {
    /// Document could not be read or parsed as JSON.
    Parse,
    /// Structural non-conformance with the schema contract.
    Schema,
    /// Document metadata: keys, timestamps, identity.
    Governance,
    /// Numeric consistency between related fields.
    Consistency,
    /// Unit enumeration and unit-denominated field naming.
    Units,
    /// Rendering-safety formatting rules.
    Format,
    /// Forbidden causal/interpretive vocabulary in factual text.
    Purity,
    /// Event timestamp versus declared market session.
    Session,
    /// Event-id primary keys and foreign-key resolution.
    Referential,
    /// Evidence excerpt constraints.
    Evidence,
    /// Mover list sign convention.
    Movers,
    /// Cross-document degeneracy.
    Realism,
}

impl RuleFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Parse => "parse",
            Self::Schema => "schema",
            Self::Governance => "governance",
            Self::Consistency => "consistency",
            Self::Units => "units",
            Self::Format => "format",
            Self::Purity => "purity",
            Self::Session => "session",
            Self::Referential => "referential",
            Self::Evidence => "evidence",
            Self::Movers => "movers",
            Self::Realism => "realism",
        }
    }
}

impl fmt::Display for RuleFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable lint code identifiers.
///
/// The string form returned by [`LintCode::as_str`] is part of the machine
/// report contract and must not change once published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LintCode {
    ParseError,
    SchemaViolation,
    GovMissingKey,
    GovTimestampFormat,
    GovTimestampOrder,
    GovDocKey,
    GovDateFormat,
    IndexBracket,
    ReturnMismatch,
    BreadthRange,
    UnknownUnit,
    VolatilityChangeField,
    RateChangeUnit,
    ReactionUnitDiscipline,
    EmbeddedNewline,
    ForbiddenToken,
    EventTimestampFormat,
    SessionMismatch,
    SessionNoCalendar,
    EventMissingId,
    EventDuplicateId,
    DanglingEventRef,
    EvidenceDuplicateDocId,
    EvidenceDuplicateChunkId,
    EvidenceExcerptTooLong,
    EvidenceNotFactStyled,
    EvidenceTimestampFormat,
    MoverSign,
    DegenerateClose,
}

impl LintCode {
    /// Returns the stable wire identifier for this code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ParseError => "PARSE_ERROR",
            Self::SchemaViolation => "SCHEMA_VIOLATION",
            Self::GovMissingKey => "GOV_MISSING_KEY",
            Self::GovTimestampFormat => "GOV_TS_FORMAT",
            Self::GovTimestampOrder => "GOV_TS_ORDER",
            Self::GovDocKey => "GOV_DOC_KEY",
            Self::GovDateFormat => "GOV_DATE_FORMAT",
            Self::IndexBracket => "OUT_INDEX_BRACKET",
            Self::ReturnMismatch => "OUT_RETURN_MISMATCH",
            Self::BreadthRange => "OUT_BREADTH_RANGE",
            Self::UnknownUnit => "UNIT_UNKNOWN",
            Self::VolatilityChangeField => "UNIT_VOL_CHANGE_FIELD",
            Self::RateChangeUnit => "UNIT_RATE_CHANGE_BPS",
            Self::ReactionUnitDiscipline => "UNIT_REACTION_MOVE",
            Self::EmbeddedNewline => "FMT_EMBEDDED_NEWLINE",
            Self::ForbiddenToken => "PURITY_FORBIDDEN_TOKEN",
            Self::EventTimestampFormat => "EVT_TS_FORMAT",
            Self::SessionMismatch => "SESSION_MISMATCH",
            Self::SessionNoCalendar => "SESSION_NO_CALENDAR",
            Self::EventMissingId => "REF_MISSING_EVENT_ID",
            Self::EventDuplicateId => "REF_DUPLICATE_EVENT_ID",
            Self::DanglingEventRef => "REF_DANGLING_EVENT",
            Self::EvidenceDuplicateDocId => "EVD_DUPLICATE_DOC_ID",
            Self::EvidenceDuplicateChunkId => "EVD_DUPLICATE_CHUNK_ID",
            Self::EvidenceExcerptTooLong => "EVD_EXCERPT_TOO_LONG",
            Self::EvidenceNotFactStyled => "EVD_NOT_FACT_STYLED",
            Self::EvidenceTimestampFormat => "EVD_TS_FORMAT",
            Self::MoverSign => "MOVERS_SIGN",
            Self::DegenerateClose => "REALISM_DEGENERATE_CLOSE",
        }
    }

    /// Returns the family this code belongs to.
    pub fn family(&self) -> RuleFamily {
        match self {
            Self::ParseError => RuleFamily::Parse,
            Self::SchemaViolation => RuleFamily::Schema,
            Self::GovMissingKey
            | Self::GovTimestampFormat
            | Self::GovTimestampOrder
            | Self::GovDocKey
            | Self::GovDateFormat => RuleFamily::Governance,
            Self::IndexBracket | Self::ReturnMismatch | Self::BreadthRange => {
                RuleFamily::Consistency
            }
            Self::UnknownUnit
            | Self::VolatilityChangeField
            | Self::RateChangeUnit
            | Self::ReactionUnitDiscipline => RuleFamily::Units,
            Self::EmbeddedNewline => RuleFamily::Format,
            Self::ForbiddenToken => RuleFamily::Purity,
            Self::EventTimestampFormat | Self::SessionMismatch | Self::SessionNoCalendar => {
                RuleFamily::Session
            }
            Self::EventMissingId | Self::EventDuplicateId | Self::DanglingEventRef => {
                RuleFamily::Referential
            }
            Self::EvidenceDuplicateDocId
            | Self::EvidenceDuplicateChunkId
            | Self::EvidenceExcerptTooLong
            | Self::EvidenceNotFactStyled
            | Self::EvidenceTimestampFormat => RuleFamily::Evidence,
            Self::MoverSign => RuleFamily::Movers,
            Self::DegenerateClose => RuleFamily::Realism,
        }
    }

    /// Severity a checker assigns before the execution profile is applied.
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::EvidenceNotFactStyled | Self::SessionNoCalendar | Self::DegenerateClose => {
                Severity::Soft
            }
            _ => Severity::Hard,
        }
    }
}

impl fmt::Display for LintCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for LintCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A single finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintItem {
    pub code: LintCode,
    pub severity: Severity,
    /// Dotted location inside the document, e.g. `market_outcomes.indices[0].close`.
    pub path: String,
    pub message: String,
}

impl LintItem {
    /// Create a finding at the code's default severity.
    pub fn new(code: LintCode, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: code.default_severity(),
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn is_hard(&self) -> bool {
        self.severity == Severity::Hard
    }
}

impl fmt::Display for LintItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} at {}: {}",
            self.severity, self.code, self.path, self.message
        )
    }
}
