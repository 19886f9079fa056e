//! # Archive Export
//!
//! Packs many records into one ZIP archive, one member file per record,
//! in input order.

use std::collections::HashSet;
use std::io::{Cursor, Write};

use serde::{Deserialize, Serialize};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use ldgen_core::{LdgenError, SchemaRecord};

use crate::document;

/// Content format of each archive member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveMember {
    /// Pretty-printed JSON-LD.
    #[default]
    Json,
    /// HTML script embed.
    Html,
}

impl ArchiveMember {
    /// File extension of a member.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Html => "html",
        }
    }
}

impl std::str::FromStr for ArchiveMember {
    type Err = LdgenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" | "jsonld" | "json-ld" => Ok(Self::Json),
            "html" => Ok(Self::Html),
            _ => Err(LdgenError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// How archive members are named.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArchiveNaming {
    /// `schema_{N}_{type}.{ext}`, N being the 1-based position.
    #[default]
    #[serde(rename = "index")]
    Index,
    /// A slug of the record's `name`, falling back to the position.
    #[serde(rename = "name")]
    NameField,
}

/// Longest name slug used for a member file.
const MAX_SLUG_LEN: usize = 64;

/// Member file names for numbered records, in order. Names are unique.
///
/// The number is the record's source row when the caller has one, and its
/// 1-based position otherwise.
pub fn member_names(
    entries: &[(usize, &SchemaRecord)],
    member: ArchiveMember,
    naming: ArchiveNaming,
) -> Vec<String> {
    let ext = member.extension();
    let mut used = HashSet::new();
    let mut names = Vec::with_capacity(entries.len());

    for (number, record) in entries {
        let positional = format!("schema_{}_{}", number, record.schema_type().slug());
        let base = match naming {
            ArchiveNaming::Index => positional,
            ArchiveNaming::NameField => record
                .name()
                .map(slugify)
                .filter(|slug| !slug.is_empty())
                .unwrap_or(positional),
        };

        let mut candidate = format!("{base}.{ext}");
        let mut n = 2;
        while used.contains(&candidate) {
            candidate = format!("{base}-{n}.{ext}");
            n += 1;
        }
        used.insert(candidate.clone());
        names.push(candidate);
    }
    names
}

/// Write numbered records into an in-memory ZIP archive.
pub fn write_archive(
    entries: &[(usize, &SchemaRecord)],
    member: ArchiveMember,
    naming: ArchiveNaming,
) -> Result<Vec<u8>, LdgenError> {
    let names = member_names(entries, member, naming);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    for ((_, record), name) in entries.iter().zip(&names) {
        let content = match member {
            ArchiveMember::Json => document::to_json(record, true)?,
            ArchiveMember::Html => document::to_html(record)?.into_bytes(),
        };
        zip.start_file(name.as_str(), options)
            .map_err(|e| LdgenError::Archive(format!("cannot add {name}: {e}")))?;
        zip.write_all(&content)?;
        tracing::trace!(member = %name, bytes = content.len(), "added archive member");
    }

    let cursor = zip
        .finish()
        .map_err(|e| LdgenError::Archive(format!("cannot finish archive: {e}")))?;
    Ok(cursor.into_inner())
}

/// Lowercase ASCII slug: alphanumerics kept, every other run becomes `-`.
fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
            if slug.len() >= MAX_SLUG_LEN {
                break;
            }
        } else {
            pending_dash = true;
        }
    }
    slug
}
