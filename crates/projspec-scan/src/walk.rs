//! # Tree Walker
//!
//! Depth-first listing of every file under the content root. Excluded
//! names are pruned before descent, so nothing below an excluded
//! directory is ever visited. Entries are sorted by file name within
//! each directory, which makes two runs over the same tree identical.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::ScanConfig;
use crate::error::ScanError;

/// A content root resolved to an absolute, canonical path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRoot(PathBuf);

impl ContentRoot {
    /// Canonicalize `root`.
    ///
    /// # Errors
    ///
    /// Returns `ScanError::Root` if `root` does not exist.
    pub fn resolve(root: &Path) -> Result<Self, ScanError> {
        root.canonicalize()
            .map(Self)
            .map_err(|source| ScanError::Root {
                path: root.to_path_buf(),
                source,
            })
    }

    /// The canonical path.
    pub fn path(&self) -> &Path {
        &self.0
    }
}

/// List the absolute paths of all non-excluded files under `root`.
///
/// Symbolic links are not followed; a link is reported like a file.
///
/// # Errors
///
/// Returns `ScanError::Walk` if any directory below `root` cannot be read.
pub fn walk(root: &ContentRoot, config: &ScanConfig) -> Result<Vec<PathBuf>, ScanError> {
    let root = root.path();
    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !config.is_excluded(e.file_name()));

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|source| ScanError::Walk {
            path: source
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf()),
            source,
        })?;
        if entry.file_type().is_dir() {
            continue;
        }
        files.push(entry.into_path());
    }

    tracing::debug!(root = %root.display(), files = files.len(), "walked content tree");
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"x").unwrap();
    }

    fn list(root: &Path, config: &ScanConfig) -> Vec<PathBuf> {
        walk(&ContentRoot::resolve(root).unwrap(), config).unwrap()
    }

    fn relative(root: &Path, files: &[PathBuf]) -> Vec<String> {
        let root = root.canonicalize().unwrap();
        files
            .iter()
            .map(|p| p.strip_prefix(&root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn lists_nested_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "b/spec.yml");
        touch(dir.path(), "a/step2/Instructions.md");
        touch(dir.path(), "a/spec.yml");
        touch(dir.path(), "README.md");

        let files = list(dir.path(), &ScanConfig::default());
        assert!(files.iter().all(|p| p.is_absolute()));
        assert_eq!(
            relative(dir.path(), &files),
            ["README.md", "a/spec.yml", "a/step2/Instructions.md", "b/spec.yml"]
        );
    }

    #[test]
    fn excluded_directories_are_pruned() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "proj/spec.yml");
        touch(dir.path(), "node_modules/pkg/spec.yml");
        touch(dir.path(), "proj/build/spec.yml");
        touch(dir.path(), ".git/HEAD");
        touch(dir.path(), "schemas/spec.yml");
        touch(dir.path(), ".github/workflows/ci.yml");

        let files = list(dir.path(), &ScanConfig::default());
        assert_eq!(relative(dir.path(), &files), ["proj/spec.yml"]);
    }

    #[test]
    fn excluded_names_apply_to_files_too() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "proj/build");
        touch(dir.path(), "proj/spec.yml");

        let files = list(dir.path(), &ScanConfig::default());
        assert_eq!(relative(dir.path(), &files), ["proj/spec.yml"]);
    }

    #[test]
    fn custom_exclusions() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "dist/spec.yml");
        touch(dir.path(), "node_modules/spec.yml");

        let config = ScanConfig {
            excluded_dirs: vec!["dist".to_string()],
            ..ScanConfig::default()
        };
        let files = list(dir.path(), &config);
        assert_eq!(relative(dir.path(), &files), ["node_modules/spec.yml"]);
    }

    #[test]
    fn root_named_like_excluded_dir_is_still_walked() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "build/proj/spec.yml");

        let files = list(&dir.path().join("build"), &ScanConfig::default());
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ContentRoot::resolve(&dir.path().join("absent")).unwrap_err();
        assert!(matches!(err, ScanError::Root { .. }), "{err}");
    }

    #[test]
    fn relative_root_resolves_to_canonical_path() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "proj/spec.yml");
        let dotted = dir.path().join("proj").join("..");

        let root = ContentRoot::resolve(&dotted).unwrap();
        assert_eq!(root.path(), dir.path().canonicalize().unwrap());
        assert!(walk(&root, &ScanConfig::default())
            .unwrap()
            .iter()
            .all(|p| p.starts_with(root.path())));
    }
}
