//! Errors raised by a scan run.

use std::path::PathBuf;

use projspec_core::ContentErrors;
use projspec_schema::SchemaValidationError;
use thiserror::Error;

/// A scan run failed.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The content root does not exist or cannot be resolved.
    #[error("cannot resolve content root {}: {source}", .path.display())]
    Root {
        /// Root as given by the caller.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A directory could not be listed during the walk.
    #[error("cannot walk {}: {source}", .path.display())]
    Walk {
        /// Entry the walker failed on.
        path: PathBuf,
        /// Underlying walker error.
        #[source]
        source: walkdir::Error,
    },

    /// One or more content files could not be processed.
    #[error("{count} content file(s) could not be processed:\n{0}", count = .0.len())]
    Content(ContentErrors),

    /// The aggregated projects map failed schema validation.
    #[error(transparent)]
    Schema(#[from] SchemaValidationError),
}

/// The scan configuration file is unusable.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read config {}: {source}", .path.display())]
    Read {
        /// Config file path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid config document.
    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        /// Config file path.
        path: PathBuf,
        /// Parser error.
        #[source]
        source: serde_yaml::Error,
    },

    /// A config value is out of range.
    #[error("invalid config value for '{field}': {reason}")]
    Invalid {
        /// Offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}
