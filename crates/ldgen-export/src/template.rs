//! # Field Templates
//!
//! Blank scaffolds for bulk upload. A template lists the fields of one
//! type, in descriptor order, as CSV columns, JSON keys, or a spreadsheet
//! header row. Filling a template in and uploading it round-trips through
//! the bulk builder: array placeholders use the `|` separator the array
//! coercion splits on.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{json, Value};

use ldgen_core::{
    FieldTier, LdgenError, SchemaType, SchemaTypeDescriptor, ValueKind, SCHEMA_ORG_CONTEXT,
};

const ID_COLUMN: &str = "@id";
const EXAMPLE_ID: &str = "https://example.com/#schema1";

/// What a template contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateOptions {
    /// Field tiers to include. Columns keep descriptor order whatever the
    /// order here.
    pub tiers: Vec<FieldTier>,
    /// Add an example row (tabular) or example values (JSON).
    pub include_examples: bool,
    /// Add an `@id` column first.
    pub include_id_column: bool,
}

impl Default for TemplateOptions {
    fn default() -> Self {
        Self {
            tiers: FieldTier::all().to_vec(),
            include_examples: false,
            include_id_column: false,
        }
    }
}

/// Placeholder layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    /// One text cell per field.
    Tabular,
    /// A JSON value per field.
    Json,
}

/// Column names of a template, `@id` first when requested.
pub fn template_columns(
    descriptor: &SchemaTypeDescriptor,
    options: &TemplateOptions,
) -> Vec<&'static str> {
    let mut columns = Vec::new();
    if options.include_id_column {
        columns.push(ID_COLUMN);
    }
    columns.extend(descriptor.fields_for_tiers(&options.tiers));
    columns
}

fn example_value(descriptor: &SchemaTypeDescriptor, field: &str, layout: Layout) -> Value {
    if field == ID_COLUMN {
        return Value::from(EXAMPLE_ID);
    }
    match field {
        "name" => return Value::from("Example Name"),
        "description" => return Value::from("Example description"),
        "url" => return Value::from("https://example.com"),
        _ => {}
    }
    match (descriptor.value_kind(field), layout) {
        (ValueKind::Date, _) => Value::from("2024-01-01"),
        (ValueKind::Array, Layout::Tabular) => Value::from("item1|item2|item3"),
        (ValueKind::Array, Layout::Json) => json!(["example item 1", "example item 2"]),
        (ValueKind::Object, Layout::Json) => json!({"@type": "Thing", "name": "Example Object"}),
        _ => Value::from("example value"),
    }
}

fn example_cell(descriptor: &SchemaTypeDescriptor, field: &str) -> String {
    match example_value(descriptor, field, Layout::Tabular) {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn columns_or_err(
    descriptor: &SchemaTypeDescriptor,
    options: &TemplateOptions,
) -> Result<Vec<&'static str>, LdgenError> {
    let columns = template_columns(descriptor, options);
    if columns.is_empty() {
        return Err(LdgenError::Template(format!(
            "no fields selected for {}",
            descriptor.schema_type()
        )));
    }
    Ok(columns)
}

/// CSV template: a header row, plus an example row when asked.
pub fn csv_template(schema_type: SchemaType, options: &TemplateOptions) -> Result<Vec<u8>, LdgenError> {
    let descriptor = schema_type.descriptor();
    let columns = columns_or_err(descriptor, options)?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&columns).map_err(csv_error)?;
    if options.include_examples {
        let examples: Vec<String> = columns.iter().map(|c| example_cell(descriptor, c)).collect();
        writer.write_record(&examples).map_err(csv_error)?;
    }
    writer
        .into_inner()
        .map_err(|e| LdgenError::Template(format!("cannot flush CSV: {}", e.error())))
}

fn csv_error(e: csv::Error) -> LdgenError {
    LdgenError::Template(format!("cannot write CSV: {e}"))
}

/// One object of a JSON template, serialized in column order.
struct Skeleton {
    schema_type: SchemaType,
    entries: Vec<(&'static str, Value)>,
}

impl Serialize for Skeleton {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2 + self.entries.len()))?;
        map.serialize_entry("@context", SCHEMA_ORG_CONTEXT)?;
        map.serialize_entry("@type", self.schema_type.as_str())?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// JSON template: an array holding one skeleton object, pretty-printed.
///
/// Values are example placeholders when asked, otherwise empty strings.
pub fn json_template(schema_type: SchemaType, options: &TemplateOptions) -> Result<Vec<u8>, LdgenError> {
    let descriptor = schema_type.descriptor();
    let columns = columns_or_err(descriptor, options)?;

    let entries = columns
        .into_iter()
        .map(|field| {
            let value = if options.include_examples {
                example_value(descriptor, field, Layout::Json)
            } else {
                Value::from("")
            };
            (field, value)
        })
        .collect();

    let skeleton = Skeleton { schema_type, entries };
    Ok(serde_json::to_vec_pretty(&[skeleton])?)
}

/// Excel template: one sheet named after the type with a bold header row.
pub fn excel_template(schema_type: SchemaType, options: &TemplateOptions) -> Result<Vec<u8>, LdgenError> {
    use rust_xlsxwriter::{Format, Workbook};

    let descriptor = schema_type.descriptor();
    let columns = columns_or_err(descriptor, options)?;
    let xlsx = |e: rust_xlsxwriter::XlsxError| LdgenError::Template(format!("cannot write workbook: {e}"));

    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(schema_type.as_str()).map_err(xlsx)?;

    for (col, field) in columns.iter().enumerate() {
        let col = u16::try_from(col)
            .map_err(|_| LdgenError::Template(format!("too many columns for {schema_type}")))?;
        sheet.write_string_with_format(0, col, *field, &bold).map_err(xlsx)?;
        if options.include_examples {
            sheet
                .write_string(1, col, example_cell(descriptor, field))
                .map_err(xlsx)?;
        }
    }

    workbook.save_to_buffer().map_err(xlsx)
}
