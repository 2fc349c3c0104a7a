//! # Validate Subcommand
//!
//! Runs the content gate over a directory tree. Silent on success apart
//! from `info` logs; any failure becomes a non-zero exit.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use projspec_scan::Reporting;

use crate::config::Settings;

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Content root to scan.
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Report every schema violation instead of stopping at the first.
    #[arg(long)]
    pub all_errors: bool,

    /// Print the aggregated projects map as JSON after a successful run.
    #[arg(long)]
    pub print: bool,
}

/// Validate the content tree at `args.root`.
pub fn run_validate(args: &ValidateArgs, settings: &Settings) -> Result<u8> {
    let config = settings.scan_config()?;
    let validator = settings.validator()?;
    let reporting = if args.all_errors {
        Reporting::AllErrors
    } else {
        Reporting::FirstError
    };

    let projects = projspec_scan::run(&args.root, &config, &validator, reporting)
        .with_context(|| {
            format!(
                "error while validating project documents in {}",
                args.root.display()
            )
        })?;

    for (name, record) in projects.iter() {
        match record.typed_spec() {
            Some(Ok(spec)) => tracing::info!(
                project = %name,
                title = %spec.name,
                guided = spec.is_guided(),
                steps = record.steps().len(),
                "project ok"
            ),
            Some(Err(e)) => tracing::warn!(project = %name, "spec accepted by schema but not decodable: {e}"),
            None => {}
        }
    }

    if args.print {
        println!("{}", serde_json::to_string_pretty(&projects.to_value())?);
    }
    Ok(0)
}
