//! # Document Rendering: JSON and HTML Embeds
//!
//! Text renderings of records. JSON keeps the record's own key order. HTML
//! wraps the pretty-printed JSON in the script element search engines read
//! structured data from.

use ldgen_core::{LdgenError, SchemaRecord};

const SCRIPT_OPEN: &str = r#"<script type="application/ld+json">"#;
const SCRIPT_CLOSE: &str = "</script>";

/// Serialize one record as JSON, compact or with 2-space indentation.
pub fn to_json(record: &SchemaRecord, pretty: bool) -> Result<Vec<u8>, LdgenError> {
    let bytes = if pretty {
        serde_json::to_vec_pretty(record)?
    } else {
        serde_json::to_vec(record)?
    };
    Ok(bytes)
}

/// Serialize records as one JSON array.
pub fn to_json_array(records: &[&SchemaRecord], pretty: bool) -> Result<Vec<u8>, LdgenError> {
    let bytes = if pretty {
        serde_json::to_vec_pretty(records)?
    } else {
        serde_json::to_vec(records)?
    };
    Ok(bytes)
}

/// Wrap one record in a JSON-LD script element.
pub fn to_html(record: &SchemaRecord) -> Result<String, LdgenError> {
    let json = serde_json::to_string_pretty(record)?;
    Ok(format!("{SCRIPT_OPEN}\n{}\n{SCRIPT_CLOSE}", escape_script(&json)))
}

/// Script elements for every record, each preceded by a numbered comment
/// and separated by a blank line.
pub fn to_html_many(records: &[SchemaRecord]) -> Result<String, LdgenError> {
    let entries: Vec<(usize, &SchemaRecord)> =
        records.iter().enumerate().map(|(i, r)| (i + 1, r)).collect();
    to_html_numbered(&entries)
}

/// [`to_html_many`] with caller-chosen comment numbers, such as source rows.
pub fn to_html_numbered(entries: &[(usize, &SchemaRecord)]) -> Result<String, LdgenError> {
    let mut blocks = Vec::with_capacity(entries.len());
    for (number, record) in entries {
        blocks.push(format!("<!-- Schema {number} -->\n{}", to_html(record)?));
    }
    Ok(blocks.join("\n\n"))
}

/// Markup characters only occur inside JSON strings, where the `\uXXXX`
/// form decodes to the same text. Without a raw `<` nothing inside the
/// element can open or close a tag.
fn escape_script(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            c => out.push(c),
        }
    }
    out
}
