//! # Upload Parsing
//!
//! Reads a bulk upload file into one [`FieldValues`] mapping per data row.
//! The file extension picks the reader:
//!
//! - `.csv`: first row is the header; cells are trimmed; rows may be
//!   shorter or longer than the header.
//! - `.json`: an array of objects, or a single object as one row.
//! - `.xlsx`, `.xls`, `.ods`: the first worksheet, first row as header.
//!   Numbers and booleans stay typed, dates become ISO-8601 text.
//!
//! Empty cells are left out of the row mapping, so a blank cell and a
//! missing column read the same to the record builder.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Reader};
use chrono::Timelike;
use serde_json::{Number, Value};
use thiserror::Error;

use ldgen_core::FieldValues;

/// Why an upload could not be read.
#[derive(Error, Debug)]
pub enum UploadParseError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot read spreadsheet: {0}")]
    Spreadsheet(#[from] calamine::Error),

    /// 1-based position of the offending element.
    #[error("element {index} of the upload is not a JSON object")]
    NotAnObject { index: usize },

    #[error("spreadsheet has no worksheet")]
    NoWorksheet,

    #[error("unsupported upload type {0:?} (expected .csv, .json, .xlsx, .xls, or .ods)")]
    UnsupportedExtension(String),
}

/// Parse an upload file into rows.
pub fn parse_upload(path: &Path) -> Result<Vec<FieldValues>, UploadParseError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let rows = match extension.as_str() {
        "csv" => parse_csv(open(path)?)?,
        "json" => {
            let mut bytes = Vec::new();
            open(path)?
                .read_to_end(&mut bytes)
                .map_err(|source| io_error(path, source))?;
            parse_json(&bytes)?
        }
        "xlsx" | "xlsm" | "xls" | "ods" => parse_spreadsheet(path)?,
        _ => return Err(UploadParseError::UnsupportedExtension(extension)),
    };

    tracing::info!(path = %path.display(), rows = rows.len(), "parsed upload");
    Ok(rows)
}

fn open(path: &Path) -> Result<BufReader<File>, UploadParseError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| io_error(path, source))
}

fn io_error(path: &Path, source: std::io::Error) -> UploadParseError {
    UploadParseError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Rows of a CSV document with a header row.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<FieldValues>, UploadParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row = headers
            .iter()
            .zip(record.iter())
            .filter(|(header, cell)| !header.is_empty() && !cell.is_empty())
            .map(|(header, cell)| (header.to_string(), Value::String(cell.to_string())))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

/// Rows of a JSON document: an array of objects, or one object.
pub fn parse_json(bytes: &[u8]) -> Result<Vec<FieldValues>, UploadParseError> {
    match serde_json::from_slice::<Value>(bytes)? {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::Object(map) => Ok(map),
                _ => Err(UploadParseError::NotAnObject { index: i + 1 }),
            })
            .collect(),
        Value::Object(map) => Ok(vec![map]),
        _ => Err(UploadParseError::NotAnObject { index: 1 }),
    }
}

fn parse_spreadsheet(path: &Path) -> Result<Vec<FieldValues>, UploadParseError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(UploadParseError::NoWorksheet)??;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(Vec::new());
    };
    let headers: Vec<String> = header_row.iter().map(header_text).collect();

    Ok(rows
        .map(|cells| {
            headers
                .iter()
                .zip(cells)
                .filter(|(header, _)| !header.is_empty())
                .filter_map(|(header, cell)| cell_value(cell).map(|v| (header.clone(), v)))
                .collect()
        })
        .collect())
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Empty => String::new(),
        other => other.to_string().trim().to_string(),
    }
}

/// JSON value of one spreadsheet cell; `None` for blanks and error cells.
fn cell_value(cell: &Data) -> Option<Value> {
    match cell {
        Data::Empty => None,
        Data::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| Value::String(s.to_string()))
        }
        Data::Int(i) => Some(Value::from(*i)),
        Data::Float(f) => Some(float_value(*f)),
        Data::Bool(b) => Some(Value::Bool(*b)),
        Data::DateTime(dt) => Some(match dt.as_datetime() {
            Some(dt) if dt.hour() == 0 && dt.minute() == 0 && dt.second() == 0 => {
                Value::String(dt.format("%Y-%m-%d").to_string())
            }
            Some(dt) => Value::String(dt.format("%Y-%m-%dT%H:%M:%S").to_string()),
            None => float_value(dt.as_f64()),
        }),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(Value::String(s.clone())),
        Data::Error(e) => {
            tracing::warn!(error = ?e, "ignoring spreadsheet error cell");
            None
        }
    }
}

/// Spreadsheets store every number as a float; whole numbers read back as
/// integers.
fn float_value(f: f64) -> Value {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
    if f.fract() == 0.0 && f.abs() < MAX_EXACT {
        return Value::from(f as i64);
    }
    Number::from_f64(f).map_or(Value::Null, Value::Number)
}
