//! # Output
//!
//! Delivery of export artifacts and status lines. Artifacts go to a file
//! in the output directory, or to stdout with `--stdout`. Status lines
//! (`OK:`, `FAIL:`, `WARN:`) go to stdout, except when stdout carries an
//! artifact, in which case they move to stderr.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use ldgen_export::{ExportArtifact, ExportFormat};

/// Where an artifact is delivered.
#[derive(Debug, Clone)]
pub enum Destination {
    Stdout,
    Dir(PathBuf),
}

impl Destination {
    /// Pick the destination from the `--stdout` flag.
    ///
    /// Binary formats cannot go to stdout.
    pub fn select(to_stdout: bool, format: ExportFormat, output_dir: &Path) -> Result<Self> {
        if !to_stdout {
            return Ok(Self::Dir(output_dir.to_path_buf()));
        }
        if format.is_binary() {
            bail!("{format} output is binary and cannot be written to stdout; drop --stdout");
        }
        Ok(Self::Stdout)
    }

    /// Status line printer matching this destination.
    pub fn reporter(&self) -> Reporter {
        Reporter {
            to_stderr: matches!(self, Self::Stdout),
        }
    }

    /// Deliver the artifact. Returns the written path, if any.
    pub fn deliver(&self, artifact: &ExportArtifact) -> Result<Option<PathBuf>> {
        match self {
            Self::Stdout => {
                let mut out = std::io::stdout().lock();
                out.write_all(&artifact.bytes)?;
                if !artifact.bytes.ends_with(b"\n") {
                    out.write_all(b"\n")?;
                }
                out.flush()?;
                Ok(None)
            }
            Self::Dir(dir) => {
                let path = artifact
                    .write_to_dir(dir)
                    .with_context(|| format!("failed to write {} into {}", artifact.filename, dir.display()))?;
                self.reporter().line(&format!(
                    "OK: wrote {} ({}, {} bytes)",
                    path.display(),
                    artifact.mime_type,
                    artifact.len()
                ));
                Ok(Some(path))
            }
        }
    }
}

/// Prints status lines to stdout or stderr.
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    to_stderr: bool,
}

impl Reporter {
    pub fn line(&self, message: &str) {
        if self.to_stderr {
            eprintln!("{message}");
        } else {
            println!("{message}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact() -> ExportArtifact {
        ExportArtifact {
            filename: "schema_person.json".to_string(),
            mime_type: "application/json",
            bytes: br#"{"@type":"Person"}"#.to_vec(),
        }
    }

    #[test]
    fn binary_formats_refuse_stdout() {
        let dir = Path::new(".");
        assert!(Destination::select(true, ExportFormat::Archive, dir).is_err());
        assert!(Destination::select(true, ExportFormat::ExcelTemplate, dir).is_err());
        assert!(matches!(
            Destination::select(true, ExportFormat::Html, dir).unwrap(),
            Destination::Stdout
        ));
        assert!(matches!(
            Destination::select(false, ExportFormat::Archive, dir).unwrap(),
            Destination::Dir(_)
        ));
    }

    #[test]
    fn dir_delivery_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let dest = Destination::select(false, ExportFormat::Json, dir.path()).unwrap();
        let path = dest.deliver(&artifact()).unwrap().unwrap();
        assert_eq!(path, dir.path().join("schema_person.json"));
        assert_eq!(std::fs::read(path).unwrap(), artifact().bytes);
    }

    #[test]
    fn stdout_delivery_writes_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let dest = Destination::select(true, ExportFormat::Json, dir.path()).unwrap();
        assert_eq!(dest.deliver(&artifact()).unwrap(), None);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
