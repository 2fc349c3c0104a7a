//! # projspec-cli — Content Gate CLI
//!
//! Provides the `projspec` command-line interface used in CI to gate
//! changes to a content repository.
//!
//! ## Subcommands
//!
//! - `projspec validate [ROOT]` — aggregate and validate the tree.
//! - `projspec schema` — print the effective schema.
//! - `projspec config` — print the effective scan configuration.
//!
//! ```bash
//! projspec validate
//! projspec -v validate content/ --all-errors
//! projspec --config projspec.yaml validate --print > projects.json
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing lives here; scanning and validation are delegated
//!   to `projspec-scan` and `projspec-schema`.
//! - Handlers return an exit code; errors propagate as `anyhow::Error`.

pub mod config;
pub mod schema;
pub mod validate;

pub use config::Settings;
