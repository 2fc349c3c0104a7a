//! # Scan Configuration
//!
//! File names that identify each document kind and the directory names
//! the walker never enters. Every field has a default, so a config file
//! only needs to list what it changes:
//!
//! ```yaml
//! excluded-dirs: [node_modules, schemas, .git, .github, build, dist]
//! instructions-file: README.md
//! ```

use std::ffi::OsStr;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Directory names skipped by default.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &["node_modules", "schemas", ".git", ".github", "build"];

/// Default name of a project spec file.
pub const DEFAULT_SPEC_FILE: &str = "spec.yml";
/// Default name of a guided-step metadata file.
pub const DEFAULT_STEP_METADATA_FILE: &str = "challenges.yml";
/// Default name of a guided-step instructions file.
pub const DEFAULT_INSTRUCTIONS_FILE: &str = "Instructions.md";

/// Settings for one scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields, default)]
pub struct ScanConfig {
    /// Base names of files and directories the walker skips.
    pub excluded_dirs: Vec<String>,
    /// Suffix identifying a project spec file.
    pub spec_file: String,
    /// Suffix identifying a guided-step metadata file.
    pub step_metadata_file: String,
    /// Suffix identifying a guided-step instructions file.
    pub instructions_file: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|s| s.to_string()).collect(),
            spec_file: DEFAULT_SPEC_FILE.to_string(),
            step_metadata_file: DEFAULT_STEP_METADATA_FILE.to_string(),
            instructions_file: DEFAULT_INSTRUCTIONS_FILE.to_string(),
        }
    }
}

impl ScanConfig {
    /// Load a config from a YAML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    /// Parse a config from YAML text. An empty document yields the defaults.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        Self::parse(content, Path::new("<inline>"))
    }

    fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("spec-file", &self.spec_file),
            ("step-metadata-file", &self.step_metadata_file),
            ("instructions-file", &self.instructions_file),
        ] {
            if value.is_empty() {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must not be empty".to_string(),
                });
            }
            if value.contains(['/', '\\']) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("'{value}' must be a file name, not a path"),
                });
            }
        }
        Ok(())
    }

    /// Whether an entry with this base name is skipped by the walker.
    pub fn is_excluded(&self, name: &OsStr) -> bool {
        self.excluded_dirs.iter().any(|d| OsStr::new(d) == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_content_repository_layout() {
        let config = ScanConfig::default();
        assert_eq!(config.spec_file, "spec.yml");
        assert_eq!(config.step_metadata_file, "challenges.yml");
        assert_eq!(config.instructions_file, "Instructions.md");
        for dir in ["node_modules", "schemas", ".git", ".github", "build"] {
            assert!(config.is_excluded(OsStr::new(dir)), "{dir} should be excluded");
        }
        assert!(!config.is_excluded(OsStr::new("proj1")));
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let config = ScanConfig::from_yaml("excluded-dirs: [dist]\n").unwrap();
        assert_eq!(config.excluded_dirs, vec!["dist".to_string()]);
        assert_eq!(config.spec_file, DEFAULT_SPEC_FILE);
    }

    #[test]
    fn empty_yaml_is_default() {
        assert_eq!(ScanConfig::from_yaml("").unwrap(), ScanConfig::default());
    }

    #[test]
    fn unknown_keys_rejected() {
        let err = ScanConfig::from_yaml("exclude: [x]\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn path_like_file_names_rejected() {
        let err = ScanConfig::from_yaml("spec-file: nested/spec.yml\n").unwrap_err();
        match err {
            ConfigError::Invalid { field, .. } => assert_eq!(field, "spec-file"),
            other => panic!("Expected Invalid, got: {other}"),
        }
    }

    #[test]
    fn load_reports_file_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projspec.yaml");
        std::fs::write(&path, "spec-file: [not, a, string]\n").unwrap();
        let err = ScanConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("projspec.yaml"), "{err}");
    }

    #[test]
    fn load_missing_file() {
        let err = ScanConfig::load(Path::new("/nonexistent/projspec.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
