//! # Severity Policy & Exit Semantics
//!
//! Checkers emit findings at their code's default severity and never look
//! at the execution profile. The profile is applied afterwards, in one
//! place, by [`effective_severity`]. The run outcome is then a pure
//! function of the effective severity totals and the profile.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::lint::{LintItem, RuleFamily, Severity};

/// Execution profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// SOFT findings are reported but do not fail the run.
    #[default]
    Lenient,
    /// SOFT findings fail the run; realism findings are escalated to HARD.
    Strict,
}

impl Profile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lenient => "lenient",
            Self::Strict => "strict",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            other => Err(format!("unknown profile {other:?} (expected lenient or strict)")),
        }
    }
}

/// Families whose findings are promoted to HARD under [`Profile::Strict`].
const STRICT_ESCALATED: &[RuleFamily] = &[RuleFamily::Realism];

/// Effective severity of a finding under a profile.
pub fn effective_severity(item: &LintItem, profile: Profile) -> Severity {
    match profile {
        Profile::Strict if STRICT_ESCALATED.contains(&item.code.family()) => Severity::Hard,
        _ => item.severity,
    }
}

/// Rewrite every finding's severity to its effective severity.
pub fn apply_profile(items: &mut [LintItem], profile: Profile) {
    for item in items.iter_mut() {
        item.severity = effective_severity(item, profile);
    }
}

/// Process outcome of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitStatus {
    Success,
    LintFailure,
    ConfigError,
}

impl ExitStatus {
    /// Process exit code: `0` success, `1` lint failure, `2` configuration error.
    pub fn code(&self) -> u8 {
        match self {
            Self::Success => 0,
            Self::LintFailure => 1,
            Self::ConfigError => 2,
        }
    }
}

/// Decide the run outcome from effective severity totals.
pub fn decide_exit(hard: usize, soft: usize, profile: Profile) -> ExitStatus {
    if hard > 0 {
        return ExitStatus::LintFailure;
    }
    match profile {
        Profile::Strict if soft > 0 => ExitStatus::LintFailure,
        _ => ExitStatus::Success,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::LintCode;

    #[test]
    fn realism_escalates_only_under_strict() {
        let item = LintItem::new(LintCode::DegenerateClose, "p", "m");
        assert_eq!(effective_severity(&item, Profile::Lenient), Severity::Soft);
        assert_eq!(effective_severity(&item, Profile::Strict), Severity::Hard);
    }

    #[test]
    fn other_soft_findings_stay_soft_under_strict() {
        let item = LintItem::new(LintCode::EvidenceNotFactStyled, "p", "m");
        assert_eq!(effective_severity(&item, Profile::Strict), Severity::Soft);
    }

    #[test]
    fn hard_never_demoted() {
        let item = LintItem::new(LintCode::IndexBracket, "p", "m");
        assert_eq!(effective_severity(&item, Profile::Lenient), Severity::Hard);
    }

    #[test]
    fn apply_profile_rewrites_in_place() {
        let mut items = vec![
            LintItem::new(LintCode::DegenerateClose, "a", "m"),
            LintItem::new(LintCode::EvidenceNotFactStyled, "b", "m"),
        ];
        apply_profile(&mut items, Profile::Strict);
        assert_eq!(items[0].severity, Severity::Hard);
        assert_eq!(items[1].severity, Severity::Soft);
    }

    #[test]
    fn exit_decisions() {
        assert_eq!(decide_exit(0, 0, Profile::Lenient), ExitStatus::Success);
        assert_eq!(decide_exit(0, 3, Profile::Lenient), ExitStatus::Success);
        assert_eq!(decide_exit(0, 1, Profile::Strict), ExitStatus::LintFailure);
        assert_eq!(decide_exit(2, 0, Profile::Lenient), ExitStatus::LintFailure);
        assert_eq!(ExitStatus::ConfigError.code(), 2);
    }

    #[test]
    fn profile_parse() {
        assert_eq!("STRICT".parse::<Profile>().unwrap(), Profile::Strict);
        assert_eq!("lenient".parse::<Profile>().unwrap(), Profile::Lenient);
        assert!("paranoid".parse::<Profile>().is_err());
    }
}
