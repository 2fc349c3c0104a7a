//! # Schema Subcommand
//!
//! Prints the schema a validation run would use.

use anyhow::Result;
use clap::Args;

use crate::config::Settings;

/// Arguments for the schema subcommand.
#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Print on a single line instead of pretty-printed.
    #[arg(long)]
    pub compact: bool,
}

/// Print the effective schema as JSON.
pub fn run_schema(args: &SchemaArgs, settings: &Settings) -> Result<u8> {
    let validator = settings.validator()?;
    let rendered = if args.compact {
        serde_json::to_string(validator.schema())?
    } else {
        serde_json::to_string_pretty(validator.schema())?
    };
    println!("{rendered}");
    Ok(0)
}
