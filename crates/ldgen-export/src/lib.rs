//! # ldgen-export: Export Formats
//!
//! Turns [`SchemaRecord`](ldgen_core::SchemaRecord)s into the bytes a user
//! downloads, and produces blank field templates for bulk upload.
//!
//! ## Formats
//!
//! | Format           | Single record | Many records        | Template |
//! |------------------|---------------|---------------------|----------|
//! | `json`           | object        | array               |          |
//! | `html`           | script embed  | commented embeds    |          |
//! | `archive`        |               | ZIP, one per record |          |
//! | `csv-template`   |               |                     | header   |
//! | `json-template`  |               |                     | skeleton |
//! | `excel-template` |               |                     | XLSX     |
//!
//! Asking for a combination left blank in the table is
//! `LdgenError::UnsupportedFormat`.
//!
//! ## Crate Policy
//!
//! - Depends only on `ldgen-core` within the workspace.
//! - Everything is produced in memory; writing to disk is the caller's
//!   business (see [`ExportArtifact::write_to_dir`]).
//! - Invalid records are refused unless [`ExportOptions::validate`] is
//!   turned off.

pub mod archive;
pub mod artifact;
pub mod document;
pub mod exporter;
pub mod format;
pub mod template;

pub use archive::{ArchiveMember, ArchiveNaming};
pub use artifact::ExportArtifact;
pub use exporter::{ExportOptions, Exporter};
pub use format::ExportFormat;
pub use template::TemplateOptions;
