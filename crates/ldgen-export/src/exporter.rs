//! # Exporter
//!
//! The entry point of the crate. An [`Exporter`] carries the export options
//! of one session and dispatches each request to the format modules,
//! refusing records that fail required-field validation.

use serde::{Deserialize, Serialize};

use ldgen_core::{BuiltRow, LdgenError, SchemaRecord, SchemaType};

use crate::archive::{self, ArchiveMember, ArchiveNaming};
use crate::artifact::ExportArtifact;
use crate::document;
use crate::format::ExportFormat;
use crate::template::{self, TemplateOptions};

/// Per-session export settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Indent JSON output. HTML embeds and archive JSON members are always
    /// indented.
    pub pretty: bool,
    /// Refuse records that miss required fields.
    pub validate: bool,
    /// Content format of archive members.
    pub archive_member: ArchiveMember,
    /// Naming of archive members.
    pub archive_naming: ArchiveNaming,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            validate: true,
            archive_member: ArchiveMember::default(),
            archive_naming: ArchiveNaming::default(),
        }
    }
}

/// Serializes records and templates.
#[derive(Debug, Clone, Default)]
pub struct Exporter {
    options: ExportOptions,
}

impl Exporter {
    /// Create an exporter with the given options.
    pub fn new(options: ExportOptions) -> Self {
        Self { options }
    }

    /// The session options.
    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    fn check(&self, record: &SchemaRecord) -> Result<(), LdgenError> {
        if !self.options.validate {
            return Ok(());
        }
        let missing = record.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(LdgenError::InvalidRecord {
                schema_type: record.schema_type().to_string(),
                missing,
            })
        }
    }

    /// Serialize one record as `json` or `html`.
    ///
    /// # Errors
    ///
    /// - `UnsupportedFormat` for `archive` and the template formats.
    /// - `InvalidRecord` when validation is on and a required field is
    ///   missing.
    pub fn serialize(&self, record: &SchemaRecord, format: ExportFormat) -> Result<Vec<u8>, LdgenError> {
        self.check(record)?;
        match format {
            ExportFormat::Json => document::to_json(record, self.options.pretty),
            ExportFormat::Html => Ok(document::to_html(record)?.into_bytes()),
            other => Err(LdgenError::UnsupportedFormat(format!(
                "{other} (not available for a single record)"
            ))),
        }
    }

    /// Serialize records as one `json` array, concatenated `html` embeds,
    /// or an `archive`. Archive members and html comments are numbered by
    /// position.
    ///
    /// Every record is checked before anything is written; the first
    /// invalid one fails the call.
    pub fn serialize_many(
        &self,
        records: &[SchemaRecord],
        format: ExportFormat,
    ) -> Result<Vec<u8>, LdgenError> {
        let entries: Vec<(usize, &SchemaRecord)> =
            records.iter().enumerate().map(|(i, r)| (i + 1, r)).collect();
        self.serialize_numbered(&entries, format)
    }

    /// [`serialize_many`](Self::serialize_many) for rows of a bulk upload.
    /// Archive members and html comments carry each row's source index, so
    /// they line up with the row numbers of any failures.
    pub fn serialize_rows(&self, rows: &[BuiltRow], format: ExportFormat) -> Result<Vec<u8>, LdgenError> {
        let entries: Vec<(usize, &SchemaRecord)> = rows.iter().map(|r| (r.row, &r.record)).collect();
        self.serialize_numbered(&entries, format)
    }

    fn serialize_numbered(
        &self,
        entries: &[(usize, &SchemaRecord)],
        format: ExportFormat,
    ) -> Result<Vec<u8>, LdgenError> {
        if format.is_template() {
            return Err(LdgenError::UnsupportedFormat(format!(
                "{format} (templates are not built from records)"
            )));
        }
        for (_, record) in entries {
            self.check(record)?;
        }
        let bytes = match format {
            ExportFormat::Json => {
                let records: Vec<&SchemaRecord> = entries.iter().map(|(_, r)| *r).collect();
                document::to_json_array(&records, self.options.pretty)?
            }
            ExportFormat::Html => document::to_html_numbered(entries)?.into_bytes(),
            _ => archive::write_archive(
                entries,
                self.options.archive_member,
                self.options.archive_naming,
            )?,
        };
        tracing::debug!(%format, records = entries.len(), bytes = bytes.len(), "exported records");
        Ok(bytes)
    }

    /// Produce a field template for `type_id`.
    ///
    /// # Errors
    ///
    /// - `UnknownSchemaType` for an unsupported type.
    /// - `UnsupportedFormat` unless `format` is a template format.
    pub fn template(
        &self,
        type_id: &str,
        format: ExportFormat,
        options: &TemplateOptions,
    ) -> Result<Vec<u8>, LdgenError> {
        let schema_type: SchemaType = type_id.parse()?;
        match format {
            ExportFormat::CsvTemplate => template::csv_template(schema_type, options),
            ExportFormat::JsonTemplate => template::json_template(schema_type, options),
            ExportFormat::ExcelTemplate => template::excel_template(schema_type, options),
            other => Err(LdgenError::UnsupportedFormat(format!("{other} (not a template format)"))),
        }
    }

    /// [`serialize`](Self::serialize) with a suggested file name,
    /// `schema_{type}.{ext}`.
    pub fn artifact_for_record(
        &self,
        record: &SchemaRecord,
        format: ExportFormat,
    ) -> Result<ExportArtifact, LdgenError> {
        Ok(ExportArtifact {
            filename: format!("schema_{}.{}", record.schema_type().slug(), format.extension()),
            mime_type: format.mime_type(),
            bytes: self.serialize(record, format)?,
        })
    }

    /// [`serialize_many`](Self::serialize_many) with a suggested file name,
    /// `bulk_schemas_{type}.{ext}`.
    pub fn artifact_for_records(
        &self,
        schema_type: SchemaType,
        records: &[SchemaRecord],
        format: ExportFormat,
    ) -> Result<ExportArtifact, LdgenError> {
        Ok(ExportArtifact {
            filename: format!("bulk_schemas_{}.{}", schema_type.slug(), format.extension()),
            mime_type: format.mime_type(),
            bytes: self.serialize_many(records, format)?,
        })
    }

    /// [`serialize_rows`](Self::serialize_rows) with the same file name as
    /// [`artifact_for_records`](Self::artifact_for_records).
    pub fn artifact_for_rows(
        &self,
        schema_type: SchemaType,
        rows: &[BuiltRow],
        format: ExportFormat,
    ) -> Result<ExportArtifact, LdgenError> {
        Ok(ExportArtifact {
            filename: format!("bulk_schemas_{}.{}", schema_type.slug(), format.extension()),
            mime_type: format.mime_type(),
            bytes: self.serialize_rows(rows, format)?,
        })
    }

    /// [`template`](Self::template) with a suggested file name,
    /// `template_{type}.{ext}`.
    pub fn artifact_for_template(
        &self,
        type_id: &str,
        format: ExportFormat,
        options: &TemplateOptions,
    ) -> Result<ExportArtifact, LdgenError> {
        let bytes = self.template(type_id, format, options)?;
        let schema_type: SchemaType = type_id.parse()?;
        Ok(ExportArtifact {
            filename: format!("template_{}.{}", schema_type.slug(), format.extension()),
            mime_type: format.mime_type(),
            bytes,
        })
    }
}
