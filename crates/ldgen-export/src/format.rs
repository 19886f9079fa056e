//! # Export Format Identifiers
//!
//! The closed set of formats the exporter understands, with their file
//! extensions and MIME types.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use ldgen_core::LdgenError;

/// An export format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportFormat {
    /// JSON-LD document.
    Json,
    /// JSON-LD wrapped in a `<script type="application/ld+json">` element.
    Html,
    /// ZIP archive with one file per record.
    Archive,
    /// CSV header row for bulk upload.
    CsvTemplate,
    /// JSON skeleton for bulk upload.
    JsonTemplate,
    /// XLSX workbook for bulk upload.
    ExcelTemplate,
}

impl ExportFormat {
    /// All formats.
    pub fn all() -> &'static [ExportFormat] {
        &[
            Self::Json,
            Self::Html,
            Self::Archive,
            Self::CsvTemplate,
            Self::JsonTemplate,
            Self::ExcelTemplate,
        ]
    }

    /// Canonical name, as accepted by `FromStr`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Html => "html",
            Self::Archive => "archive",
            Self::CsvTemplate => "csv-template",
            Self::JsonTemplate => "json-template",
            Self::ExcelTemplate => "excel-template",
        }
    }

    /// File extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json | Self::JsonTemplate => "json",
            Self::Html => "html",
            Self::Archive => "zip",
            Self::CsvTemplate => "csv",
            Self::ExcelTemplate => "xlsx",
        }
    }

    /// MIME type of the produced bytes.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Json | Self::JsonTemplate => "application/json",
            Self::Html => "text/html",
            Self::Archive => "application/zip",
            Self::CsvTemplate => "text/csv",
            Self::ExcelTemplate => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }

    /// True for the field-template formats.
    pub fn is_template(&self) -> bool {
        matches!(self, Self::CsvTemplate | Self::JsonTemplate | Self::ExcelTemplate)
    }

    /// True when the output is not UTF-8 text.
    pub fn is_binary(&self) -> bool {
        matches!(self, Self::Archive | Self::ExcelTemplate)
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = LdgenError;

    /// Parses canonical names and common aliases, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" | "jsonld" | "json-ld" => Ok(Self::Json),
            "html" => Ok(Self::Html),
            "archive" | "zip" => Ok(Self::Archive),
            "csv-template" | "csv" => Ok(Self::CsvTemplate),
            "json-template" => Ok(Self::JsonTemplate),
            "excel-template" | "excel" | "xlsx" => Ok(Self::ExcelTemplate),
            _ => Err(LdgenError::UnsupportedFormat(s.to_string())),
        }
    }
}
