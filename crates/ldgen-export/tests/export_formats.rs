//! # Export Format Tests
//!
//! End-to-end checks of the exporter: records are built with `ldgen-core`,
//! exported, and read back with independent readers (`serde_json`, `csv`,
//! `zip`, `calamine`).

use std::io::{Cursor, Read};

use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use proptest::prelude::*;
use serde_json::{json, Value};

use ldgen_core::{FieldTier, FieldValues, SchemaRecord, SchemaType};
use ldgen_export::{ArchiveMember, ArchiveNaming, ExportFormat, ExportOptions, Exporter, TemplateOptions};

fn values(v: Value) -> FieldValues {
    v.as_object().cloned().unwrap()
}

fn event(name: &str) -> SchemaRecord {
    ldgen_core::build(
        "Event",
        &values(json!({"name": name, "startDate": "2025-01-01", "location": "Hall A"})),
    )
    .unwrap()
}

fn strip_whitespace(s: &str) -> String {
    let mut out = String::new();
    let mut in_string = false;
    let mut escaped = false;
    for c in s.chars() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
            out.push(c);
        } else if !c.is_whitespace() {
            out.push(c);
        }
    }
    out
}

#[test]
fn event_html_matches_expected_document() {
    let bytes = Exporter::default()
        .serialize(&event("Launch"), ExportFormat::Html)
        .unwrap();
    let html = String::from_utf8(bytes).unwrap();
    // The only whitespace outside JSON strings is layout; the tag's own
    // space is restored after stripping.
    let compact = strip_whitespace(&html).replace("<scripttype=", "<script type=");
    assert_eq!(
        compact,
        r#"<script type="application/ld+json">{"@context":"https://schema.org","@type":"Event","name":"Launch","startDate":"2025-01-01","location":"Hall A"}</script>"#
    );
}

#[test]
fn event_json_roundtrips_through_from_value() {
    let record = event("Launch");
    let bytes = Exporter::default().serialize(&record, ExportFormat::Json).unwrap();
    let parsed: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(SchemaRecord::from_value(&parsed).unwrap(), record);
}

#[test]
fn product_csv_template_is_one_header_row() {
    let bytes = Exporter::default()
        .template("Product", ExportFormat::CsvTemplate, &TemplateOptions::default())
        .unwrap();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(bytes.as_slice());
    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 1);

    let descriptor = SchemaType::Product.descriptor();
    let mut expected: Vec<&str> = descriptor.required().to_vec();
    expected.extend(descriptor.optional_fields());
    assert_eq!(rows[0].iter().collect::<Vec<_>>(), expected);
}

#[test]
fn excel_template_reads_back() {
    let options = TemplateOptions {
        tiers: vec![FieldTier::Required],
        include_examples: true,
        include_id_column: true,
    };
    let bytes = Exporter::default()
        .template("Course", ExportFormat::ExcelTemplate, &options)
        .unwrap();

    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).unwrap();
    assert_eq!(workbook.sheet_names(), vec!["Course".to_string()]);
    let range = workbook.worksheet_range("Course").unwrap();
    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    Data::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect()
        })
        .collect();
    assert_eq!(
        rows,
        vec![
            vec!["@id", "name", "provider"],
            vec!["https://example.com/#schema1", "Example Name", "example value"],
        ]
    );
}

#[test]
fn json_template_is_valid_upload_shape() {
    let bytes = Exporter::default()
        .template("Recipe", ExportFormat::JsonTemplate, &TemplateOptions {
            include_examples: true,
            ..TemplateOptions::default()
        })
        .unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    let rows: Vec<FieldValues> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_object().cloned().unwrap())
        .collect();
    let outcome = ldgen_core::build_all("Recipe", &rows).unwrap();
    assert!(outcome.is_complete());
    let record = &outcome.records()[0];
    assert_eq!(record.get("recipeIngredient"), Some(&json!(["example item 1", "example item 2"])));
}

#[test]
fn csv_template_example_row_builds() {
    let options = TemplateOptions {
        include_examples: true,
        ..TemplateOptions::default()
    };
    let bytes = Exporter::default()
        .template("Recipe", ExportFormat::CsvTemplate, &options)
        .unwrap();
    let mut reader = csv::Reader::from_reader(bytes.as_slice());
    let headers = reader.headers().unwrap().clone();
    let example = reader.records().next().unwrap().unwrap();
    let row: FieldValues = headers
        .iter()
        .zip(example.iter())
        .map(|(k, v)| (k.to_string(), Value::from(v)))
        .collect();
    let record = ldgen_core::build("Recipe", &row).unwrap();
    assert_eq!(
        record.get("recipeInstructions"),
        Some(&json!(["item1", "item2", "item3"]))
    );
}

#[test]
fn name_field_archive_members() {
    let exporter = Exporter::new(ExportOptions {
        archive_member: ArchiveMember::Html,
        archive_naming: ArchiveNaming::NameField,
        ..ExportOptions::default()
    });
    let bytes = exporter
        .serialize_many(&[event("Product Launch"), event("Product Launch")], ExportFormat::Archive)
        .unwrap();
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect();
    assert_eq!(names, vec!["product-launch.html", "product-launch-2.html"]);
}

proptest! {
    #[test]
    fn archive_holds_every_record_in_order(names in prop::collection::vec("[A-Za-z][A-Za-z ]{0,15}", 1..8)) {
        let records: Vec<SchemaRecord> = names.iter().map(|n| event(n)).collect();
        let bytes = Exporter::default()
            .serialize_many(&records, ExportFormat::Archive)
            .unwrap();

        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        prop_assert_eq!(archive.len(), records.len());
        for (i, record) in records.iter().enumerate() {
            let mut file = archive.by_index(i).unwrap();
            prop_assert_eq!(file.name(), format!("schema_{}_event.json", i + 1));
            let mut text = String::new();
            file.read_to_string(&mut text).unwrap();
            let value: Value = serde_json::from_str(&text).unwrap();
            prop_assert_eq!(SchemaRecord::from_value(&value).unwrap(), record.clone());
        }
    }

    #[test]
    fn json_array_preserves_count_and_order(names in prop::collection::vec("[a-z]{1,10}", 0..10)) {
        let records: Vec<SchemaRecord> = names.iter().map(|n| event(n)).collect();
        let bytes = Exporter::default().serialize_many(&records, ExportFormat::Json).unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        let got: Vec<&str> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["name"].as_str().unwrap())
            .collect();
        prop_assert_eq!(got, names.iter().map(String::as_str).collect::<Vec<_>>());
    }
}
