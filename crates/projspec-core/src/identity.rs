//! # Identifier Newtypes
//!
//! Project names and step ids both come from directory names. Wrapping
//! them keeps the two namespaces apart and guarantees that every
//! identifier in a [`ProjectsMap`](crate::ProjectsMap) is a non-empty,
//! single path segment.

use serde::Serialize;

use crate::error::IdentifierError;

/// Name of a project, taken from the directory holding its spec file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ProjectName(String);

/// Identifier of a guided step, taken from the step's directory name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct StepId(String);

fn validate_segment(kind: &'static str, value: String) -> Result<String, IdentifierError> {
    if value.is_empty() {
        return Err(IdentifierError::Empty { kind });
    }
    if value == "." || value == ".." || value.contains(['/', '\\']) {
        return Err(IdentifierError::NotASegment { kind, value });
    }
    Ok(value)
}

impl ProjectName {
    /// Validate and wrap a project name.
    pub fn new(name: impl Into<String>) -> Result<Self, IdentifierError> {
        validate_segment("project name", name.into()).map(Self)
    }

    /// Access the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl StepId {
    /// Validate and wrap a step id.
    pub fn new(id: impl Into<String>) -> Result<Self, IdentifierError> {
        validate_segment("step id", id.into()).map(Self)
    }

    /// Access the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProjectName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for StepId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
