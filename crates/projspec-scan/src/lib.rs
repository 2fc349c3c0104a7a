//! # projspec-scan — Content Tree Scanning
//!
//! Turns a directory tree of project content into a validated
//! [`ProjectsMap`](projspec_core::ProjectsMap).
//!
//! ## Pipeline
//!
//! ```text
//! walk ──► classify ──► merge into ProjectsMap ──► validate once
//! ```
//!
//! - [`walk`] lists files, pruning excluded directory names.
//! - [`classify`] recognizes spec, step metadata and instructions files,
//!   parses them, and checks their depth below the root.
//! - [`pipeline`] owns the accumulator for a run, collects per-file
//!   failures, and calls the schema validator after the last merge.
//! - [`config`] holds the file names and exclusions, loadable from YAML.

pub mod classify;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod walk;

// Re-export primary types for ergonomic imports.
pub use classify::{classify, DocumentKind, Fragment};
pub use config::ScanConfig;
pub use error::{ConfigError, ScanError};
pub use pipeline::{aggregate, run, Reporting};
pub use walk::{walk, ContentRoot};
