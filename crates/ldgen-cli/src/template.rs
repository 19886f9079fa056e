//! # Template Subcommand
//!
//! Writes a blank upload template for one type.

use anyhow::{bail, Result};
use clap::Args;

use ldgen_core::FieldTier;
use ldgen_export::{ExportFormat, Exporter, TemplateOptions};

use crate::config::RunContext;
use crate::output::Destination;

/// Arguments for the `ldgen template` subcommand.
#[derive(Args, Debug)]
pub struct TemplateArgs {
    /// Schema.org type of the template.
    #[arg(long = "type", value_name = "TYPE")]
    pub schema_type: String,

    /// Template format: csv, json, or excel.
    #[arg(long, default_value = "csv")]
    pub format: ExportFormat,

    /// Field tiers to include, comma-separated (required,common,advanced).
    #[arg(long, value_delimiter = ',', value_name = "TIERS")]
    pub tiers: Vec<FieldTier>,

    /// Add example values.
    #[arg(long)]
    pub examples: bool,

    /// Add an `@id` column.
    #[arg(long)]
    pub id_column: bool,

    /// Write the template to stdout instead of a file.
    #[arg(long)]
    pub stdout: bool,
}

/// Execute the template subcommand.
pub fn run_template(args: &TemplateArgs, ctx: &RunContext) -> Result<u8> {
    let format = template_format(args.format)?;
    let destination = Destination::select(args.stdout, format, &ctx.output_dir)?;

    let defaults = &ctx.config.template;
    let tiers = if !args.tiers.is_empty() {
        args.tiers.clone()
    } else {
        defaults
            .tiers
            .clone()
            .unwrap_or_else(|| FieldTier::all().to_vec())
    };
    let options = TemplateOptions {
        tiers,
        include_examples: args.examples || defaults.examples,
        include_id_column: args.id_column || defaults.id_column,
    };

    let artifact = match Exporter::default().artifact_for_template(&args.schema_type, format, &options) {
        Ok(artifact) => artifact,
        Err(e) if e.is_validation() => {
            destination.reporter().line(&format!("FAIL: {e}"));
            return Ok(1);
        }
        Err(e) => return Err(e.into()),
    };
    destination.deliver(&artifact)?;
    Ok(0)
}

/// `json` on this subcommand means the JSON template.
fn template_format(format: ExportFormat) -> Result<ExportFormat> {
    match format {
        ExportFormat::Json | ExportFormat::JsonTemplate => Ok(ExportFormat::JsonTemplate),
        ExportFormat::CsvTemplate | ExportFormat::ExcelTemplate => Ok(format),
        other => bail!("template writes csv, json, or excel, not {other}"),
    }
}
