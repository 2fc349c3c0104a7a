//! # Typed Project Views
//!
//! Strongly typed mirrors of the spec and step documents. The scan keeps
//! documents as raw JSON so that the schema validator sees exactly what
//! was written; these types decode a record once it has been validated.

use serde::{Deserialize, Serialize};

/// A project's `spec.yml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ProjectSpec {
    pub name: String,
    pub tags: Vec<String>,
    pub starter_files: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub level: String,
    pub cover_image: String,
    pub short_description: String,
    pub long_description: String,
    /// Playground and display settings.
    pub codedamn: PlatformConfig,
}

/// The `codedamn` block of a project spec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PlatformConfig {
    pub helper_learning_path: String,
    pub show_community_banner: bool,
    pub playground_layout: String,
    pub playground_image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guided: Option<bool>,
}

impl ProjectSpec {
    /// Whether the project is declared as a guided project.
    pub fn is_guided(&self) -> bool {
        self.codedamn.guided.unwrap_or(false)
    }
}

/// A fully merged guided step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GuidedStep {
    pub step_id: String,
    pub instructions: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_break_down: Option<Vec<StepBreakDown>>,
}

/// One entry of a step's `stepBreakDown` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StepBreakDown {
    pub text: String,
}
