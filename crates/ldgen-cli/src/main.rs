//! # ldgen CLI entry point
//!
//! Parses command-line arguments, sets up logging, loads configuration,
//! and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ldgen_cli::build::{run_build, BuildArgs};
use ldgen_cli::bulk::{run_bulk, BulkArgs};
use ldgen_cli::config::RunContext;
use ldgen_cli::template::{run_template, TemplateArgs};
use ldgen_cli::types::{run_types, TypesArgs};

/// Exit code for operational errors.
const EXIT_ERROR: u8 = 2;

/// ldgen: Schema.org JSON-LD record builder
///
/// Builds validated JSON-LD records for a fixed set of Schema.org types,
/// one at a time or from CSV/JSON/spreadsheet uploads, and exports them as
/// JSON, HTML script embeds, or ZIP archives.
#[derive(Parser, Debug)]
#[command(name = "ldgen", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file (default: ./ldgen.yaml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output directory for exported files.
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List supported types, or the fields of one type.
    Types(TypesArgs),

    /// Build one record from field values and export it.
    Build(BuildArgs),

    /// Build records from every row of an upload file and export them.
    Bulk(BulkArgs),

    /// Write a blank upload template for a type.
    Template(TemplateArgs),
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

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "ldgen starting");

    // `types` reads no configuration, so a broken config file cannot fail it.
    let result = match &cli.command {
        Commands::Types(args) => run_types(args),
        Commands::Build(args) => run_context(&cli).and_then(|ctx| run_build(args, &ctx)),
        Commands::Bulk(args) => run_context(&cli).and_then(|ctx| run_bulk(args, &ctx)),
        Commands::Template(args) => run_context(&cli).and_then(|ctx| run_template(args, &ctx)),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Load configuration and settle the output directory for this run.
fn run_context(cli: &Cli) -> anyhow::Result<RunContext> {
    let cwd = std::env::current_dir()?;
    RunContext::resolve(cli.config.as_deref(), cli.output_dir.clone(), &cwd)
}
