//! # wraplint-cli: Command-Line Surface
//!
//! Provides the `wraplint` binary:
//!
//! ```bash
//! wraplint --schema schema.json --input-dir sample_data
//! wraplint --profile strict --output reports/lint.json
//! wraplint --rules rules/baseline.yaml --format json --jobs 4
//! ```
//!
//! Handlers resolve configuration and delegate to `wraplint-checks`; no rule
//! logic lives here.
//!
//! Exit codes: `0` clean run, `1` lint failure, `2` configuration or
//! operational error.

pub mod validate;

pub use validate::{discover_documents, lint, run_validate, OutputFormat, ValidateArgs};

/// Exit code for configuration and operational errors.
pub const EXIT_CONFIG_ERROR: u8 = 2;
