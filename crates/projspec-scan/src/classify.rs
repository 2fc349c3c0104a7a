//! # File Classifier & Parser
//!
//! Decides what a file is from its name, reads it, and names its owner
//! from where it sits below the content root.
//!
//! Suffixes are checked in a fixed priority order: step metadata, then
//! instructions, then project spec. A recognized file must live at the
//! depth its kind requires:
//!
//! - step metadata and instructions: `<root>/<project>/<step>/<file>`
//! - project spec: `<root>/<project>/<file>`
//!
//! A recognized file anywhere else is a [`ContentError::Layout`] rather
//! than a guess at the wrong project.

use std::path::{Component, Path};

use projspec_core::{ContentError, ProjectName, StepId};
use serde_json::{Map, Value};

use crate::config::ScanConfig;

/// The three kinds of content document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Guided-step metadata (`challenges.yml`).
    StepMetadata,
    /// Guided-step instructions text (`Instructions.md`).
    StepInstructions,
    /// Project spec (`spec.yml`).
    Spec,
}

impl DocumentKind {
    /// Determine the kind of a file from its base name.
    pub fn of(file_name: &str, config: &ScanConfig) -> Option<Self> {
        if file_name.ends_with(&config.step_metadata_file) {
            Some(Self::StepMetadata)
        } else if file_name.ends_with(&config.instructions_file) {
            Some(Self::StepInstructions)
        } else if file_name.ends_with(&config.spec_file) {
            Some(Self::Spec)
        } else {
            None
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::StepMetadata => "step metadata",
            Self::StepInstructions => "step instructions",
            Self::Spec => "project spec",
        }
    }

    fn expected_layout(self) -> &'static str {
        match self {
            Self::StepMetadata | Self::StepInstructions => "<root>/<project>/<step>/<file>",
            Self::Spec => "<root>/<project>/<file>",
        }
    }

    /// Number of path components between the root and the file, inclusive.
    fn depth(self) -> usize {
        match self {
            Self::StepMetadata | Self::StepInstructions => 3,
            Self::Spec => 2,
        }
    }
}

/// What a single file contributes to the projects map.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    /// A project's spec document.
    Spec {
        /// Owning project.
        project: ProjectName,
        /// Parsed document.
        spec: Value,
    },
    /// Fields of a guided step.
    StepMetadata {
        /// Owning project.
        project: ProjectName,
        /// Step directory name.
        step: StepId,
        /// Parsed document fields.
        fields: Map<String, Value>,
    },
    /// Instructions text of a guided step.
    StepInstructions {
        /// Owning project.
        project: ProjectName,
        /// Step directory name.
        step: StepId,
        /// Raw file content.
        text: String,
    },
    /// Not a content document.
    Ignored,
}

/// Classify and parse the file at `path`, which must lie below `root`.
///
/// # Errors
///
/// Returns a [`ContentError`] naming `path` if the file is at the wrong
/// depth, cannot be read, or does not parse as its document kind.
pub fn classify(path: &Path, root: &Path, config: &ScanConfig) -> Result<Fragment, ContentError> {
    let Some(file_name) = path.file_name().map(|n| n.to_string_lossy()) else {
        return Ok(Fragment::Ignored);
    };
    let Some(kind) = DocumentKind::of(&file_name, config) else {
        return Ok(Fragment::Ignored);
    };

    let segments = owner_segments(path, root, kind)?;

    match kind {
        DocumentKind::StepMetadata => {
            let (project, step) = step_owner(path, &segments)?;
            let fields = match parse_document(path)? {
                Value::Object(fields) => fields,
                other => {
                    return Err(ContentError::Parse {
                        path: path.to_path_buf(),
                        reason: format!(
                            "step metadata must be a mapping, found {}",
                            json_type_name(&other)
                        ),
                    })
                }
            };
            Ok(Fragment::StepMetadata {
                project,
                step,
                fields,
            })
        }
        DocumentKind::StepInstructions => {
            let (project, step) = step_owner(path, &segments)?;
            let text = read(path)?;
            Ok(Fragment::StepInstructions {
                project,
                step,
                text,
            })
        }
        DocumentKind::Spec => {
            let project = ProjectName::new(segments[0].clone()).map_err(|source| {
                ContentError::Identifier {
                    path: path.to_path_buf(),
                    source,
                }
            })?;
            let spec = parse_document(path)?;
            Ok(Fragment::Spec { project, spec })
        }
    }
}

/// Directory names between `root` and the file, checked against the
/// depth `kind` requires.
fn owner_segments(path: &Path, root: &Path, kind: DocumentKind) -> Result<Vec<String>, ContentError> {
    let layout_error = || ContentError::Layout {
        path: path.to_path_buf(),
        kind: kind.label(),
        expected: kind.expected_layout(),
    };

    let relative = path.strip_prefix(root).map_err(|_| layout_error())?;
    let components: Vec<String> = relative
        .components()
        .map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()
        .ok_or_else(layout_error)?;

    if components.len() != kind.depth() {
        return Err(layout_error());
    }
    Ok(components[..components.len() - 1].to_vec())
}

fn step_owner(path: &Path, segments: &[String]) -> Result<(ProjectName, StepId), ContentError> {
    let identifier_error = |source| ContentError::Identifier {
        path: path.to_path_buf(),
        source,
    };
    let project = ProjectName::new(segments[0].clone()).map_err(identifier_error)?;
    let step = StepId::new(segments[1].clone()).map_err(identifier_error)?;
    Ok((project, step))
}

fn read(path: &Path) -> Result<String, ContentError> {
    std::fs::read_to_string(path).map_err(|source| ContentError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_document(path: &Path) -> Result<Value, ContentError> {
    let content = read(path)?;
    projspec_schema::parse_yaml(&content).map_err(|e| ContentError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
