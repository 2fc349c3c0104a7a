//! # projspec-schema — Schema Validation
//!
//! This crate owns the contract that a content repository must satisfy
//! and the machinery to check it.
//!
//! ## Responsibilities
//!
//! - **Documents:** parse YAML spec and step metadata files into
//!   `serde_json::Value` ([`document`]).
//! - **Validation:** compile the projects-map JSON Schema (built-in or
//!   loaded from disk) and check an aggregated map against it
//!   ([`validate`]).
//!
//! ## Design
//!
//! Validation errors are structured via [`SchemaValidationError`] with
//! the schema name, the JSON Pointer path to the violating field, and a
//! human-readable message. The gate reports the first violation only.

pub mod document;
pub mod validate;

// Re-export primary types for ergonomic imports.
pub use document::{parse_yaml, DocumentError};
pub use validate::{
    SchemaValidationError, SchemaValidator, ValidationViolations, Violation, BUILTIN_SCHEMA,
    BUILTIN_SCHEMA_NAME,
};
