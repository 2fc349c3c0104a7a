//! # Error Types
//!
//! Errors raised while turning individual content files into fragments.
//! All errors use `thiserror` and carry the offending path so that a
//! failed run points straight at the file to fix.
//!
//! Per-file errors never abort a scan on their own. They are collected
//! into [`ContentErrors`] and reported together once every file has
//! been visited.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// A directory name could not be used as an identifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// The name was empty.
    #[error("{kind} must not be empty")]
    Empty {
        /// Which identifier was being built.
        kind: &'static str,
    },

    /// The name was not a single path segment.
    #[error("{kind} '{value}' is not a single path segment")]
    NotASegment {
        /// Which identifier was being built.
        kind: &'static str,
        /// The rejected value.
        value: String,
    },
}

/// A content file could not be turned into a fragment.
#[derive(Error, Debug)]
pub enum ContentError {
    /// The file could not be read.
    #[error("{}: cannot read file: {source}", .path.display())]
    Read {
        /// The unreadable file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The file content is malformed for its document kind.
    #[error("{}: {reason}", .path.display())]
    Parse {
        /// The malformed file.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },

    /// A recognized file sits at the wrong depth below the content root.
    #[error("{}: {kind} must be located at {expected}", .path.display())]
    Layout {
        /// The misplaced file.
        path: PathBuf,
        /// Document kind, e.g. "project spec".
        kind: &'static str,
        /// Expected location pattern relative to the root.
        expected: &'static str,
    },

    /// A directory on the file's path is not a usable identifier.
    #[error("{}: {source}", .path.display())]
    Identifier {
        /// The file whose ancestors were being named.
        path: PathBuf,
        /// Why the name was rejected.
        #[source]
        source: IdentifierError,
    },
}

impl ContentError {
    /// The file this error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Read { path, .. }
            | Self::Parse { path, .. }
            | Self::Layout { path, .. }
            | Self::Identifier { path, .. } => path,
        }
    }
}

/// Every per-file failure collected during one scan.
#[derive(Debug, Default)]
pub struct ContentErrors {
    errors: Vec<ContentError>,
}

impl ContentErrors {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one failure.
    pub fn push(&mut self, error: ContentError) {
        self.errors.push(error);
    }

    /// Returns the number of failures.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if no file failed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns a slice of all failures.
    pub fn errors(&self) -> &[ContentError] {
        &self.errors
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<ContentError> {
        self.errors
    }
}

impl fmt::Display for ContentErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {e}")?;
        }
        Ok(())
    }
}
