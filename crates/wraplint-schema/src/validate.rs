//! # Schema Validation
//!
//! Runtime validation of day documents against the JSON Schema contract
//! (Draft 2020-12).
//!
//! ## Schema Resolution
//!
//! The contract file may `$ref` other schema files. Every `*.json` file in
//! the contract's directory is registered under its bare filename and under
//! its own `$id`, and a local retriever serves them. Unresolvable URIs get a
//! permissive empty schema, so validation never reaches the network.
//!
//! ## Failure Semantics
//!
//! A contract that cannot be read, parsed, or compiled is a configuration
//! error for the whole run. A document that does not conform is not an
//! error: [`SchemaValidator::violations`] returns every violation, not just
//! the first, and the caller turns each one into a finding.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use jsonschema::{Retrieve, Uri, ValidationOptions, Validator};
use serde_json::Value;
use thiserror::Error;

/// Local retriever that resolves `$ref` URIs to schemas loaded in memory.
struct LocalSchemaRetriever {
    schemas_by_uri: HashMap<String, Value>,
}

impl Retrieve for LocalSchemaRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri_str = uri.as_str();

        if let Some(value) = self.schemas_by_uri.get(uri_str) {
            return Ok(value.clone());
        }

        let filename = uri_str.rsplit('/').next().unwrap_or(uri_str);
        if let Some(value) = self.schemas_by_uri.get(filename) {
            return Ok(value.clone());
        }

        tracing::debug!(uri = uri_str, "unresolved $ref, substituting permissive schema");
        Ok(serde_json::json!({}))
    }
}

/// Error during schema loading or validation.
#[derive(Error, Debug)]
pub enum SchemaValidationError {
    /// The schema file could not be loaded.
    #[error("schema load error for '{schema_name}': {reason}")]
    SchemaLoadError { schema_name: String, reason: String },

    /// The compiled validator could not be built (e.g., invalid schema).
    #[error("validator build error for schema '{schema_name}': {reason}")]
    ValidatorBuildError { schema_name: String, reason: String },

    /// IO error reading the schema directory.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single validation violation with structured context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer path to the violating field in the instance.
    pub instance_path: String,
    /// JSON Pointer path within the schema that triggered the error.
    pub schema_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl Violation {
    /// The instance path in the dotted form used by lint findings.
    pub fn dotted_path(&self) -> String {
        pointer_to_dotted(&self.instance_path)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.message)
        }
    }
}

/// Convert a JSON Pointer (`/market_outcomes/indices/0/close`) into the
/// dotted form (`market_outcomes.indices[0].close`). The root pointer maps
/// to `$`.
pub fn pointer_to_dotted(pointer: &str) -> String {
    let mut out = String::new();
    for raw in pointer.split('/').skip(1) {
        let segment = raw.replace("~1", "/").replace("~0", "~");
        if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) {
            out.push('[');
            out.push_str(&segment);
            out.push(']');
        } else {
            if !out.is_empty() {
                out.push('.');
            }
            out.push_str(&segment);
        }
    }
    if out.is_empty() {
        "$".to_string()
    } else {
        out
    }
}

/// A compiled schema contract.
///
/// `SchemaValidator` is `Send + Sync`; one instance is shared by every
/// worker in a run.
pub struct SchemaValidator {
    schema_path: PathBuf,
    validator: Validator,
}

impl fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaValidator")
            .field("schema_path", &self.schema_path)
            .finish_non_exhaustive()
    }
}

impl SchemaValidator {
    /// Load and compile the schema contract at `schema_path`.
    ///
    /// # Errors
    ///
    /// `SchemaLoadError` if the contract or a sibling schema cannot be read
    /// or parsed; `ValidatorBuildError` if the contract does not compile.
    pub fn from_file(schema_path: impl AsRef<Path>) -> Result<Self, SchemaValidationError> {
        let schema_path = schema_path.as_ref().to_path_buf();
        let schema_name = schema_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("schema.json")
            .to_string();

        let schema = read_schema(&schema_path, &schema_name)?;

        let dir = schema_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let siblings = load_sibling_schemas(dir, &schema_name)?;
        tracing::debug!(
            schema = %schema_path.display(),
            siblings = siblings.len(),
            "loaded schema contract"
        );

        let opts = build_options(&schema_name, &schema, siblings);
        let validator =
            opts.build(&schema)
                .map_err(|e| SchemaValidationError::ValidatorBuildError {
                    schema_name,
                    reason: e.to_string(),
                })?;

        Ok(Self {
            schema_path,
            validator,
        })
    }

    pub fn schema_path(&self) -> &Path {
        &self.schema_path
    }

    /// All violations of `instance`, in validator order. Empty when the
    /// document conforms.
    pub fn violations(&self, instance: &Value) -> Vec<Violation> {
        self.validator
            .iter_errors(instance)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect()
    }
}

fn read_schema(path: &Path, schema_name: &str) -> Result<Value, SchemaValidationError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| SchemaValidationError::SchemaLoadError {
            schema_name: schema_name.to_string(),
            reason: format!("cannot read {}: {e}", path.display()),
        })?;
    serde_json::from_str(&content).map_err(|e| SchemaValidationError::SchemaLoadError {
        schema_name: schema_name.to_string(),
        reason: format!("invalid JSON: {e}"),
    })
}

/// Load every other `*.json` file in `dir`, keyed by filename.
fn load_sibling_schemas(
    dir: &Path,
    contract_name: &str,
) -> Result<HashMap<String, Value>, SchemaValidationError> {
    let mut schemas = HashMap::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name == contract_name || !name.ends_with(".json") {
            continue;
        }
        schemas.insert(name.to_string(), read_schema(&path, name)?);
    }
    Ok(schemas)
}

/// Build `ValidationOptions` with a local retriever covering the contract
/// and its siblings under both filename and `$id`.
fn build_options(
    contract_name: &str,
    contract: &Value,
    siblings: HashMap<String, Value>,
) -> ValidationOptions {
    let mut opts = jsonschema::options();
    opts.with_draft(jsonschema::Draft::Draft202012);

    let mut schemas_by_uri: HashMap<String, Value> = HashMap::new();
    let all = siblings
        .into_iter()
        .chain(std::iter::once((contract_name.to_string(), contract.clone())));
    for (filename, value) in all {
        if let Some(id) = value.get("$id").and_then(|v| v.as_str()) {
            schemas_by_uri.insert(id.to_string(), value.clone());
        }
        schemas_by_uri.insert(filename, value);
    }

    opts.with_retriever(LocalSchemaRetriever { schemas_by_uri });
    opts
}
