//! # Schema Validation
//!
//! Validation of the aggregated projects map against a JSON Schema
//! (Draft 2020-12).
//!
//! The built-in schema lives in `schemas/projects-map.schema.json` and is
//! embedded at compile time. A replacement schema can be loaded from disk
//! for repositories that extend the content format.
//!
//! ## Reporting
//!
//! The gate stops at the first violation: [`SchemaValidator::validate`]
//! reports the instance path, schema path and message of the first
//! error produced by the validator. [`SchemaValidator::validate_all`]
//! collects every violation for local debugging.
//!
//! ## Schema Resolution
//!
//! Internal `$ref`s (`#/$defs/<name>`) are resolved by the jsonschema
//! crate natively. External references are refused rather than fetched,
//! so a run never touches the network.

use std::fmt;
use std::path::Path;

use jsonschema::{Retrieve, Uri, Validator};
use serde_json::Value;
use thiserror::Error;

/// File name of the built-in schema.
pub const BUILTIN_SCHEMA_NAME: &str = "projects-map.schema.json";

/// Source text of the built-in schema.
pub const BUILTIN_SCHEMA: &str = include_str!("../schemas/projects-map.schema.json");

/// Retriever that refuses every external `$ref`.
struct OfflineRetriever;

impl Retrieve for OfflineRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        Err(format!("external schema references are not supported: {}", uri.as_str()).into())
    }
}

/// Error during schema validation.
#[derive(Error, Debug)]
pub enum SchemaValidationError {
    /// The document did not conform to the schema.
    #[error("validation failed against schema '{schema_name}':\n{violations}")]
    ValidationFailed {
        /// Name of the schema that was validated against.
        schema_name: String,
        /// Structured list of individual violations.
        violations: ValidationViolations,
    },

    /// The schema file could not be loaded.
    #[error("schema load error for '{schema_name}': {reason}")]
    SchemaLoadError {
        /// Schema filename or identifier.
        schema_name: String,
        /// Reason the schema could not be loaded.
        reason: String,
    },

    /// The compiled validator could not be built (e.g., invalid schema).
    #[error("validator build error for schema '{schema_name}': {reason}")]
    ValidatorBuildError {
        /// Schema filename or identifier.
        schema_name: String,
        /// Reason the validator could not be built.
        reason: String,
    },
}

impl SchemaValidationError {
    /// The first reported violation, for `ValidationFailed` errors.
    pub fn first_violation(&self) -> Option<&Violation> {
        match self {
            Self::ValidationFailed { violations, .. } => violations.violations().first(),
            _ => None,
        }
    }
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

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.message)
        }
    }
}

/// Collection of validation violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// A compiled projects-map validator backed by the `jsonschema` crate.
///
/// The schema is compiled once at construction; validating an instance
/// does not re-read or re-compile anything.
pub struct SchemaValidator {
    schema_name: String,
    schema: Value,
    validator: Validator,
}

impl fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaValidator")
            .field("schema_name", &self.schema_name)
            .finish_non_exhaustive()
    }
}

impl SchemaValidator {
    /// Compile the built-in projects-map schema.
    pub fn builtin() -> Result<Self, SchemaValidationError> {
        let schema: Value = serde_json::from_str(BUILTIN_SCHEMA).map_err(|e| {
            SchemaValidationError::SchemaLoadError {
                schema_name: BUILTIN_SCHEMA_NAME.to_string(),
                reason: format!("invalid JSON: {e}"),
            }
        })?;
        Self::from_value(BUILTIN_SCHEMA_NAME, schema)
    }

    /// Load and compile a schema from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::SchemaLoadError` if the file cannot
    /// be read or is not JSON, and `ValidatorBuildError` if it is not a
    /// valid schema.
    pub fn from_file(path: &Path) -> Result<Self, SchemaValidationError> {
        let schema_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let content = std::fs::read_to_string(path).map_err(|e| {
            SchemaValidationError::SchemaLoadError {
                schema_name: path.display().to_string(),
                reason: format!("cannot read file: {e}"),
            }
        })?;
        let schema: Value = serde_json::from_str(&content).map_err(|e| {
            SchemaValidationError::SchemaLoadError {
                schema_name: schema_name.clone(),
                reason: format!("invalid JSON: {e}"),
            }
        })?;
        Self::from_value(&schema_name, schema)
    }

    /// Compile an already-parsed schema.
    pub fn from_value(
        schema_name: &str,
        schema: Value,
    ) -> Result<Self, SchemaValidationError> {
        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft202012);
        opts.with_retriever(OfflineRetriever);

        let validator = opts.build(&schema).map_err(|e| {
            SchemaValidationError::ValidatorBuildError {
                schema_name: schema_name.to_string(),
                reason: e.to_string(),
            }
        })?;

        Ok(Self {
            schema_name: schema_name.to_string(),
            schema,
            validator,
        })
    }

    /// The name of the compiled schema.
    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    /// The schema document.
    pub fn schema(&self) -> &Value {
        &self.schema
    }

    /// Every violation of `instance`, in validator order.
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

    /// Validate `instance`, reporting only the first violation.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::ValidationFailed` holding exactly
    /// one violation if the instance is invalid.
    pub fn validate(&self, instance: &Value) -> Result<(), SchemaValidationError> {
        let first = self.violations(instance).into_iter().next();
        match first {
            None => Ok(()),
            Some(violation) => Err(self.failed(vec![violation])),
        }
    }

    /// Validate `instance`, reporting every violation.
    pub fn validate_all(&self, instance: &Value) -> Result<(), SchemaValidationError> {
        let violations = self.violations(instance);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(self.failed(violations))
        }
    }

    fn failed(&self, violations: Vec<Violation>) -> SchemaValidationError {
        SchemaValidationError::ValidationFailed {
            schema_name: self.schema_name.clone(),
            violations: ValidationViolations { violations },
        }
    }
}
