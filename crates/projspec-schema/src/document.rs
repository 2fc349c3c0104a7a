//! # YAML Documents
//!
//! Spec and step metadata files are YAML, but validation runs on
//! `serde_json::Value`. `serde_yaml` deserializes straight into that
//! value tree, so documents are limited to the JSON-compatible subset
//! of YAML: string keys and no tags.

use serde_json::Value;
use thiserror::Error;

/// A YAML document could not be turned into a JSON value.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The text is not well-formed YAML, or uses a construct with no
    /// JSON counterpart.
    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),
}

/// Parse YAML text into a JSON value.
pub fn parse_yaml(content: &str) -> Result<Value, DocumentError> {
    Ok(serde_yaml::from_str(content)?)
}
