//! # wraplint-schema: Schema Contract Validation
//!
//! The schema contract for day documents is owned outside this repository
//! and versioned independently of the lint rules. This crate loads it,
//! compiles it once, and reports every structural violation with a JSON
//! Pointer to the offending field.
//!
//! ## Crate Policy
//!
//! - Depends on no other `wraplint-*` crate; callers translate
//!   [`Violation`]s into lint findings.
//! - Never performs network requests: `$ref`s resolve against schema files
//!   sitting next to the contract, or to a permissive empty schema.

pub mod validate;

pub use validate::{pointer_to_dotted, SchemaValidationError, SchemaValidator, Violation};
