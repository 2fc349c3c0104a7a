//! # Validation Pipeline
//!
//! One run of the gate: walk the tree, classify every file, merge the
//! fragments into a fresh [`ProjectsMap`], then validate the map once.
//!
//! Files are processed sequentially and every per-file failure is
//! collected. Validation only starts after the last file has been
//! merged, and is skipped entirely if any file failed.

use std::path::Path;

use projspec_core::{ContentErrors, ProjectsMap, StepFragment};
use projspec_schema::SchemaValidator;

use crate::classify::{classify, Fragment};
use crate::config::ScanConfig;
use crate::error::ScanError;
use crate::walk::{walk, ContentRoot};

/// How many schema violations to report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Reporting {
    /// Stop at the first violation.
    #[default]
    FirstError,
    /// Report every violation.
    AllErrors,
}

/// Merge one fragment into the map.
pub fn apply(projects: &mut ProjectsMap, fragment: Fragment) {
    match fragment {
        Fragment::Spec { project, spec } => projects.merge_spec(project, spec),
        Fragment::StepMetadata {
            project,
            step,
            fields,
        } => projects.merge_step(project, step, StepFragment::Metadata(fields)),
        Fragment::StepInstructions {
            project,
            step,
            text,
        } => projects.merge_step(project, step, StepFragment::Instructions(text)),
        Fragment::Ignored => {}
    }
}

/// Build the projects map for the tree under `root` without validating it.
///
/// # Errors
///
/// Returns `ScanError::Root`/`ScanError::Walk` if the tree cannot be
/// listed, and `ScanError::Content` carrying every failed file otherwise.
pub fn aggregate(root: &Path, config: &ScanConfig) -> Result<ProjectsMap, ScanError> {
    let root = ContentRoot::resolve(root)?;
    let files = walk(&root, config)?;

    let mut projects = ProjectsMap::new();
    let mut errors = ContentErrors::new();

    for path in &files {
        match classify(path, root.path(), config) {
            Ok(Fragment::Ignored) => {}
            Ok(fragment) => {
                tracing::debug!(path = %path.display(), "merging content file");
                apply(&mut projects, fragment);
            }
            Err(e) => {
                tracing::debug!(path = %e.path().display(), "content file rejected");
                errors.push(e);
            }
        }
    }

    if !errors.is_empty() {
        return Err(ScanError::Content(errors));
    }

    tracing::info!(
        files = files.len(),
        projects = projects.len(),
        steps = projects.step_count(),
        "aggregated content tree"
    );
    Ok(projects)
}

/// Aggregate the tree under `root` and validate it.
///
/// Returns the validated map on success.
pub fn run(
    root: &Path,
    config: &ScanConfig,
    validator: &SchemaValidator,
    reporting: Reporting,
) -> Result<ProjectsMap, ScanError> {
    let projects = aggregate(root, config)?;
    let instance = projects.to_value();
    match reporting {
        Reporting::FirstError => validator.validate(&instance)?,
        Reporting::AllErrors => validator.validate_all(&instance)?,
    }
    tracing::info!(
        schema = validator.schema_name(),
        projects = projects.len(),
        "content tree is valid"
    );
    Ok(projects)
}
