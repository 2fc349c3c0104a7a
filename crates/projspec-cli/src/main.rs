//! # projspec CLI entry point
//!
//! Parses command-line arguments, installs logging, and dispatches to
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use projspec_cli::config::{run_config, ConfigArgs};
use projspec_cli::schema::{run_schema, SchemaArgs};
use projspec_cli::validate::{run_validate, ValidateArgs};
use projspec_cli::Settings;

/// Content gate for project specs and guided steps.
///
/// Walks a content repository, aggregates every project's spec and
/// guided steps, and validates the result against the projects schema.
#[derive(Parser, Debug)]
#[command(name = "projspec", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a scan configuration file (YAML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Path to a JSON schema replacing the built-in one.
    #[arg(long, global = true)]
    schema: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Aggregate and validate a content tree.
    Validate(ValidateArgs),

    /// Print the effective schema.
    Schema(SchemaArgs),

    /// Print the effective scan configuration.
    Config(ConfigArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings {
        config: cli.config,
        schema: cli.schema,
    };

    let result = match cli.command {
        Commands::Validate(args) => run_validate(&args, &settings),
        Commands::Schema(args) => run_schema(&args, &settings),
        Commands::Config(args) => run_config(&args, &settings),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parse_validate_defaults_to_cwd() {
        let cli = Cli::try_parse_from(["projspec", "validate"]).unwrap();
        if let Commands::Validate(args) = cli.command {
            assert_eq!(args.root, PathBuf::from("."));
            assert!(!args.all_errors);
            assert!(!args.print);
        } else {
            panic!("expected validate");
        }
    }

    #[test]
    fn cli_parse_validate_with_root_and_flags() {
        let cli = Cli::try_parse_from([
            "projspec",
            "validate",
            "content",
            "--all-errors",
            "--print",
        ])
        .unwrap();
        if let Commands::Validate(args) = cli.command {
            assert_eq!(args.root, PathBuf::from("content"));
            assert!(args.all_errors);
            assert!(args.print);
        } else {
            panic!("expected validate");
        }
    }

    #[test]
    fn cli_parse_schema_compact() {
        let cli = Cli::try_parse_from(["projspec", "schema", "--compact"]).unwrap();
        assert!(matches!(cli.command, Commands::Schema(SchemaArgs { compact: true })));
    }

    #[test]
    fn cli_parse_config() {
        let cli = Cli::try_parse_from(["projspec", "config"]).unwrap();
        assert!(matches!(cli.command, Commands::Config(_)));
    }

    #[test]
    fn cli_parse_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "projspec",
            "validate",
            "--config",
            "projspec.yaml",
            "--schema",
            "custom.schema.json",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("projspec.yaml")));
        assert_eq!(cli.schema, Some(PathBuf::from("custom.schema.json")));
    }

    #[test]
    fn cli_parse_verbose_levels() {
        let cli0 = Cli::try_parse_from(["projspec", "validate"]).unwrap();
        assert_eq!(cli0.verbose, 0);

        let cli2 = Cli::try_parse_from(["projspec", "-vv", "validate"]).unwrap();
        assert_eq!(cli2.verbose, 2);

        let cli3 = Cli::try_parse_from(["projspec", "validate", "-vvv"]).unwrap();
        assert_eq!(cli3.verbose, 3);
    }

    #[test]
    fn cli_parse_no_subcommand_errors() {
        assert!(Cli::try_parse_from(["projspec"]).is_err());
    }

    #[test]
    fn cli_parse_invalid_subcommand_errors() {
        assert!(Cli::try_parse_from(["projspec", "lint"]).is_err());
    }
}
