//! # Error Types
//!
//! Structured errors for the foundational layer. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! Lint findings are *not* errors: a document that violates a rule yields
//! a [`LintItem`](crate::LintItem), never an `Err`. The types here cover
//! malformed field values and the conditions that stop a run before any
//! document is judged.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from the value parsers in [`temporal`](crate::temporal).
///
/// Checkers turn these into findings; they never abort a run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WraplintError {
    /// A timestamp or date did not match the required format.
    #[error("temporal format error: {0}")]
    Temporal(String),
}

/// Errors raised while loading or checking a rule table.
#[derive(Error, Debug)]
pub enum RuleTableError {
    /// The rule table file could not be read.
    #[error("cannot read rule table {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The rule table file is not valid YAML for the table shape.
    #[error("invalid rule table {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// The table parsed but violates a table-level constraint.
    #[error("rule table rejected: {0}")]
    Invalid(String),
}

/// Configuration errors. These terminate a run before validation begins
/// and map to the distinct configuration-error exit code.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The schema contract file does not exist.
    #[error("schema file not found: {}", path.display())]
    SchemaNotFound { path: PathBuf },

    /// The input directory does not exist or is not a directory.
    #[error("input directory not found: {}", path.display())]
    InputDirNotFound { path: PathBuf },

    /// The input directory contains no day documents.
    #[error("no JSON documents found in {}", path.display())]
    NoDocuments { path: PathBuf },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_not_found_display_includes_path() {
        let err = ConfigError::SchemaNotFound {
            path: PathBuf::from("/tmp/missing.schema.json"),
        };
        assert!(err.to_string().contains("/tmp/missing.schema.json"));
    }

    #[test]
    fn temporal_error_display() {
        let err = WraplintError::Temporal("bad date".to_string());
        assert_eq!(err.to_string(), "temporal format error: bad date");
    }

    #[test]
    fn no_documents_display_includes_path() {
        let err = ConfigError::NoDocuments {
            path: PathBuf::from("sample_data"),
        };
        assert_eq!(err.to_string(), "no JSON documents found in sample_data");
    }

    #[test]
    fn invalid_rule_table_display() {
        let err = RuleTableError::Invalid("empty unit set".to_string());
        assert_eq!(err.to_string(), "rule table rejected: empty unit set");
    }
}
