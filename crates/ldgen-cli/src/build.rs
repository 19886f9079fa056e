//! # Build Subcommand
//!
//! Builds one record from `--field key=value` pairs and/or a JSON input
//! file, validates it, and exports it as JSON-LD or an HTML embed.
//! Fields given on the command line override the same fields in the file.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use serde_json::Value;

use ldgen_core::{BuildContext, ExtensionPolicy, FieldValues, RecordBuilder};
use ldgen_export::{ExportFormat, ExportOptions, Exporter};

use crate::config::RunContext;
use crate::output::Destination;

/// Arguments for the `ldgen build` subcommand.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Schema.org type to build (e.g. "Event").
    #[arg(long = "type", value_name = "TYPE")]
    pub schema_type: String,

    /// Field value, repeatable.
    #[arg(long = "field", value_name = "KEY=VALUE")]
    pub fields: Vec<String>,

    /// JSON file holding one object of field values.
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// `@id` of the record.
    #[arg(long)]
    pub id: Option<String>,

    /// Output format: json or html.
    #[arg(long, default_value = "json")]
    pub format: ExportFormat,

    /// Indent JSON output.
    #[arg(long)]
    pub pretty: bool,

    /// Export even when required fields are missing.
    #[arg(long)]
    pub unvalidated: bool,

    /// Drop fields the type does not declare.
    #[arg(long)]
    pub drop_extensions: bool,

    /// Write the export to stdout instead of a file.
    #[arg(long)]
    pub stdout: bool,
}

/// Execute the build subcommand.
pub fn run_build(args: &BuildArgs, ctx: &RunContext) -> Result<u8> {
    if !matches!(args.format, ExportFormat::Json | ExportFormat::Html) {
        bail!("build writes json or html, not {}", args.format);
    }
    let destination = Destination::select(args.stdout, args.format, &ctx.output_dir)?;
    let report = destination.reporter();

    let mut values = match &args.input {
        Some(path) => load_input(path)?,
        None => FieldValues::new(),
    };
    for field in &args.fields {
        let (key, value) = parse_field(field)?;
        values.insert(key, Value::String(value));
    }

    let builder = RecordBuilder::new(BuildContext {
        id: args.id.clone(),
        extensions: if args.drop_extensions {
            ExtensionPolicy::Drop
        } else {
            ctx.config.extensions
        },
        ..BuildContext::default()
    });

    let result = if args.unvalidated {
        builder.build_unvalidated(&args.schema_type, &values)
    } else {
        builder.build(&args.schema_type, &values)
    };
    let record = match result {
        Ok(record) => record,
        Err(e) if e.is_validation() => {
            report.line(&format!("FAIL: {e}"));
            return Ok(1);
        }
        Err(e) => return Err(e.into()),
    };

    if !record.is_valid() {
        report.line(&format!(
            "WARN: {} record is missing required field(s): {}",
            record.schema_type(),
            record.missing_fields().join(", ")
        ));
    }

    let exporter = Exporter::new(ExportOptions {
        pretty: args.pretty || ctx.config.pretty,
        validate: !args.unvalidated,
        ..ExportOptions::default()
    });
    let artifact = exporter.artifact_for_record(&record, args.format)?;
    destination.deliver(&artifact)?;
    Ok(0)
}

/// Split `key=value`. The key is trimmed and must not be empty; the value
/// is kept as given.
fn parse_field(field: &str) -> Result<(String, String)> {
    let Some((key, value)) = field.split_once('=') else {
        bail!("invalid --field {field:?}: expected KEY=VALUE");
    };
    let key = key.trim();
    if key.is_empty() {
        bail!("invalid --field {field:?}: empty key");
    }
    Ok((key.to_string(), value.to_string()))
}

fn load_input(path: &Path) -> Result<FieldValues> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read input file: {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse JSON: {}", path.display()))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => bail!("input file must hold a JSON object: {}", path.display()),
    }
}
