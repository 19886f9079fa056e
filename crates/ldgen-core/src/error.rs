//! # Error Hierarchy
//!
//! Structured error types for record construction and export, built with
//! `thiserror`. No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Every failure is local to one record or one export action. Callers
//! (the CLI, or any other front end) display them; nothing here is fatal
//! to the process.

use thiserror::Error;

/// Top-level error type for ldgen.
#[derive(Error, Debug)]
pub enum LdgenError {
    /// The requested type is not one of the supported Schema.org types.
    #[error("unknown schema type: \"{0}\" (supported: {supported})", supported = crate::SchemaType::supported_names())]
    UnknownSchemaType(String),

    /// One or more required fields are absent or empty.
    ///
    /// Carries every missing field name, in descriptor order, so that a
    /// caller can report them all at once.
    #[error("{schema_type} is missing required field(s): {}", .fields.join(", "))]
    MissingRequiredFields {
        /// Schema.org type name of the record being built.
        schema_type: String,
        /// Names of the missing required fields.
        fields: Vec<String>,
    },

    /// The export format name is not recognized, or does not apply to the
    /// requested operation.
    #[error("unsupported export format: \"{0}\"")]
    UnsupportedFormat(String),

    /// An export of a record that fails required-field validation was
    /// refused.
    #[error("refusing to export invalid {schema_type} record; missing: {}", .missing.join(", "))]
    InvalidRecord {
        /// Schema.org type name of the refused record.
        schema_type: String,
        /// Names of the missing required fields.
        missing: Vec<String>,
    },

    /// A serialized record could not be read back as a record.
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Archive container could not be written.
    #[error("archive error: {0}")]
    Archive(String),

    /// Spreadsheet or tabular template could not be written.
    #[error("template error: {0}")]
    Template(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LdgenError {
    /// Names of missing required fields, for the two validation variants.
    ///
    /// Returns an empty slice for every other variant.
    pub fn missing_fields(&self) -> &[String] {
        match self {
            Self::MissingRequiredFields { fields, .. } => fields,
            Self::InvalidRecord { missing, .. } => missing,
            _ => &[],
        }
    }

    /// True for errors caused by the content of the input rather than by
    /// the environment (I/O, writer failures).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::UnknownSchemaType(_)
                | Self::MissingRequiredFields { .. }
                | Self::InvalidRecord { .. }
                | Self::MalformedRecord(_)
        )
    }
}
