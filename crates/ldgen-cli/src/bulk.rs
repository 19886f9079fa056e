//! # Bulk Subcommand
//!
//! Builds one record per row of an uploaded CSV, JSON, or spreadsheet file
//! and exports the successful ones together. Failed rows are listed by
//! their 1-based data row number; blank rows are skipped.
//!
//! ```text
//! Rows: 2/3 built
//! FAIL: row 2: Event is missing required field(s): location
//! OK: wrote ./bulk_schemas_event.zip (application/zip, 1234 bytes)
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use ldgen_core::{BuildContext, BulkRecordBuilder, ExtensionPolicy};
use ldgen_export::{ArchiveMember, ArchiveNaming, ExportFormat, ExportOptions, Exporter};

use crate::config::RunContext;
use crate::output::{Destination, Reporter};
use crate::upload::parse_upload;

/// Arguments for the `ldgen bulk` subcommand.
#[derive(Args, Debug)]
pub struct BulkArgs {
    /// Schema.org type of every row.
    #[arg(long = "type", value_name = "TYPE")]
    pub schema_type: String,

    /// Upload file (.csv, .json, .xlsx, .xls, .ods).
    #[arg(long, value_name = "FILE")]
    pub input: PathBuf,

    /// Output format: json, html, or archive.
    #[arg(long, default_value = "json")]
    pub format: ExportFormat,

    /// Content format of archive members: json or html.
    #[arg(long, value_name = "FORMAT")]
    pub archive_member: Option<ArchiveMember>,

    /// Name archive members after each record's `name`.
    #[arg(long)]
    pub name_files: bool,

    /// Keep rows that miss required fields.
    #[arg(long)]
    pub unvalidated: bool,

    /// Drop fields the type does not declare.
    #[arg(long)]
    pub drop_extensions: bool,

    /// Write the export to stdout instead of a file.
    #[arg(long)]
    pub stdout: bool,
}

/// Execute the bulk subcommand.
///
/// Exit code 1 when any row failed, even though the other rows were
/// exported.
pub fn run_bulk(args: &BulkArgs, ctx: &RunContext) -> Result<u8> {
    if args.format.is_template() {
        bail!("bulk writes json, html, or archive, not {}", args.format);
    }
    let destination = Destination::select(args.stdout, args.format, &ctx.output_dir)?;
    let report = destination.reporter();

    let rows = parse_upload(&args.input)
        .with_context(|| format!("failed to read upload: {}", args.input.display()))?;

    let mut builder = BulkRecordBuilder::new(BuildContext {
        extensions: if args.drop_extensions {
            ExtensionPolicy::Drop
        } else {
            ctx.config.extensions
        },
        ..BuildContext::default()
    })
    .skip_empty_rows();
    if args.unvalidated {
        builder = builder.unvalidated();
    }

    let outcome = match builder.build_all(&args.schema_type, &rows) {
        Ok(outcome) => outcome,
        Err(e) if e.is_validation() => {
            report.line(&format!("FAIL: {e}"));
            return Ok(1);
        }
        Err(e) => return Err(e.into()),
    };

    summarize(&report, &outcome);

    if outcome.succeeded() == 0 {
        report.line("FAIL: no rows were built; nothing exported");
        return Ok(1);
    }

    let exporter = Exporter::new(ExportOptions {
        pretty: ctx.config.pretty,
        validate: !args.unvalidated,
        archive_member: args.archive_member.unwrap_or(ctx.config.archive_member),
        archive_naming: if args.name_files {
            ArchiveNaming::NameField
        } else {
            ctx.config.archive_naming
        },
    });
    let artifact = exporter.artifact_for_rows(outcome.schema_type(), outcome.built(), args.format)?;
    destination.deliver(&artifact)?;

    Ok(if outcome.is_complete() { 0 } else { 1 })
}

fn summarize(report: &Reporter, outcome: &ldgen_core::BulkOutcome) {
    let considered = outcome.total() - outcome.skipped().len();
    report.line(&format!("Rows: {}/{} built", outcome.succeeded(), considered));
    if !outcome.skipped().is_empty() {
        report.line(&format!("Skipped {} empty row(s)", outcome.skipped().len()));
    }
    for failure in outcome.failures() {
        report.line(&format!("FAIL: row {}: {}", failure.row, failure.error));
    }
    for built in outcome.built() {
        if !built.record.is_valid() {
            report.line(&format!(
                "WARN: row {}: missing required field(s): {}",
                built.row,
                built.record.missing_fields().join(", ")
            ));
        }
    }
}
