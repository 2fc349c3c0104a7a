//! # Config Subcommand
//!
//! Global settings shared by every subcommand, and `projspec config`,
//! which prints the scan configuration that a run would use.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use projspec_scan::ScanConfig;
use projspec_schema::SchemaValidator;

/// Settings taken from global command-line options.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    /// Scan configuration file, if any.
    pub config: Option<PathBuf>,
    /// Schema file replacing the built-in schema, if any.
    pub schema: Option<PathBuf>,
}

impl Settings {
    /// The scan configuration: loaded from `--config`, or the defaults.
    pub fn scan_config(&self) -> Result<ScanConfig> {
        match &self.config {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading scan config");
                ScanConfig::load(path).context("failed to load scan configuration")
            }
            None => Ok(ScanConfig::default()),
        }
    }

    /// The compiled schema: loaded from `--schema`, or the built-in one.
    pub fn validator(&self) -> Result<SchemaValidator> {
        let validator = match &self.schema {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading schema override");
                SchemaValidator::from_file(path)
            }
            None => SchemaValidator::builtin(),
        };
        validator.context("failed to prepare schema")
    }
}

/// Arguments for the config subcommand.
#[derive(Args, Debug)]
pub struct ConfigArgs {}

/// Print the effective scan configuration as YAML.
pub fn run_config(_args: &ConfigArgs, settings: &Settings) -> Result<u8> {
    let config = settings.scan_config()?;
    print!("{}", serde_yaml::to_string(&config)?);
    Ok(0)
}
