//! # wraplint-core: Foundational Types for the Market Wrap Lint Engine
//!
//! Leaf crate of the workspace. Defines the vocabulary every other crate
//! speaks:
//!
//! - [`LintItem`], [`LintCode`], [`Severity`], [`RuleFamily`]: the finding model.
//! - [`Profile`], [`effective_severity`], [`decide_exit`]: the single place
//!   where execution profiles turn findings into a pass/fail outcome.
//! - [`RuleTable`]: forbidden vocabulary, unit set, instrument families and
//!   session calendars, loadable from YAML.
//! - [`SessionCalendar`], [`parse_zulu`]: the strict UTC timestamp format
//!   and DST-aware session classification.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `wraplint-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Checkers never consult the profile; only [`policy`] does.

pub mod error;
pub mod lint;
pub mod policy;
pub mod rules;
pub mod temporal;

pub use error::{ConfigError, RuleTableError, WraplintError};
pub use lint::{LintCode, LintItem, RuleFamily, Severity};
pub use policy::{apply_profile, decide_exit, effective_severity, ExitStatus, Profile};
pub use rules::{RuleTable, VocabularyFamily, VocabularyHit};
pub use temporal::{
    is_zulu_timestamp, parse_calendar_date, parse_zulu, DstRule, MarketSession, NthWeekday,
    SessionCalendar,
};
