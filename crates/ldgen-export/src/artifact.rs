//! # Export Artifacts
//!
//! An exported file held in memory: bytes plus the file name and MIME type
//! a front end should offer it under.

use std::path::{Path, PathBuf};

use ldgen_core::LdgenError;

/// A downloadable export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// Suggested file name, e.g. `schema_event.json`.
    pub filename: String,
    /// MIME type of `bytes`.
    pub mime_type: &'static str,
    /// File content.
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    /// Size of the content in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True when the content is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Write the artifact into `dir` under its suggested name, creating
    /// `dir` if needed. Returns the written path.
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf, LdgenError> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.filename);
        std::fs::write(&path, &self.bytes)?;
        tracing::debug!(path = %path.display(), bytes = self.len(), "wrote artifact");
        Ok(path)
    }
}
