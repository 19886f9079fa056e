//! Property tests for the catalog, the record builder, and the bulk
//! builder, run over every supported schema type.

use std::collections::BTreeMap;

use ldgen_core::{
    build, build_all, descriptor_for, FieldValues, LdgenError, SchemaRecord, SchemaType,
};
use proptest::prelude::*;
use serde_json::{json, Value};

/// A non-empty value that survives coercion for any value kind.
fn filled_value(field: &str) -> Value {
    json!(format!("value of {field}"))
}

/// Field values with every required field of `t` populated.
fn complete_values(t: SchemaType) -> FieldValues {
    let mut values = FieldValues::new();
    for field in t.descriptor().required() {
        values.insert(field.to_string(), filled_value(field));
    }
    values
}

fn schema_type_strategy() -> impl Strategy<Value = SchemaType> {
    prop::sample::select(SchemaType::all().to_vec())
}

#[test]
fn every_descriptor_has_required_subset_of_fields() {
    for t in SchemaType::all() {
        let d = descriptor_for(t.as_str()).unwrap();
        assert!(!d.required().is_empty());
        let fields = d.fields();
        assert!(d.required().iter().all(|r| fields.contains(r)));
    }
}

#[test]
fn event_example_serializes_in_descriptor_order() {
    let values = json!({"name": "Launch", "startDate": "2025-01-01", "location": "Hall A"});
    let record = build("Event", values.as_object().unwrap()).unwrap();
    assert_eq!(
        serde_json::to_string(&record).unwrap(),
        r#"{"@context":"https://schema.org","@type":"Event","name":"Launch","startDate":"2025-01-01","location":"Hall A"}"#
    );
}

proptest! {
    /// Populating every required field always builds, with the right
    /// `@type` and `@context`.
    #[test]
    fn complete_input_always_builds(t in schema_type_strategy()) {
        let record = build(t.as_str(), &complete_values(t)).unwrap();
        prop_assert_eq!(record.schema_type(), t);
        let value = record.to_value();
        prop_assert_eq!(&value["@type"], &json!(t.as_str()));
        prop_assert_eq!(&value["@context"], &json!("https://schema.org"));
    }

    /// Removing or blanking any subset of required fields reports exactly
    /// that subset.
    #[test]
    fn missing_fields_are_reported_exactly(
        t in schema_type_strategy(),
        mask in prop::collection::vec(0u8..3, 3),
    ) {
        let required = t.descriptor().required();
        let mut values = complete_values(t);
        let mut expected = Vec::new();
        for (i, field) in required.iter().enumerate() {
            match mask.get(i).copied().unwrap_or(0) {
                1 => {
                    values.remove(*field);
                    expected.push(field.to_string());
                }
                2 => {
                    values.insert(field.to_string(), json!("  "));
                    expected.push(field.to_string());
                }
                _ => {}
            }
        }

        let result = build(t.as_str(), &values);
        if expected.is_empty() {
            prop_assert!(result.is_ok());
        } else {
            match result {
                Err(LdgenError::MissingRequiredFields { fields, .. }) => {
                    prop_assert_eq!(fields, expected);
                }
                other => prop_assert!(false, "expected MissingRequiredFields, got {:?}", other),
            }
        }
    }

    /// Serialized JSON reads back to the same field mapping.
    #[test]
    fn json_roundtrip_preserves_fields(
        t in schema_type_strategy(),
        extras in prop::collection::btree_map("x[a-z]{1,8}", "[a-zA-Z0-9 ]{1,20}", 0..4),
    ) {
        let mut values = complete_values(t);
        for (k, v) in &extras {
            if !v.trim().is_empty() {
                values.insert(k.clone(), json!(v));
            }
        }
        let record = build(t.as_str(), &values).unwrap();
        let bytes = serde_json::to_vec(&record).unwrap();
        let parsed: Value = serde_json::from_slice(&bytes).unwrap();
        let back = SchemaRecord::from_value(&parsed).unwrap();

        let original: BTreeMap<_, _> = record.properties().collect();
        let restored: BTreeMap<_, _> = back.properties().collect();
        prop_assert_eq!(original, restored);
    }

    /// One bad row among N yields N-1 records and one failure at its index.
    #[test]
    fn bulk_isolates_the_bad_row(
        t in schema_type_strategy(),
        n in 1usize..12,
        k_seed in any::<usize>(),
    ) {
        let k = k_seed % n + 1;
        let rows: Vec<FieldValues> = (1..=n)
            .map(|i| {
                let mut values = complete_values(t);
                if i == k {
                    let first = t.descriptor().required()[0];
                    values.remove(first);
                }
                values
            })
            .collect();

        let outcome = build_all(t.as_str(), &rows).unwrap();
        prop_assert_eq!(outcome.succeeded(), n - 1);
        prop_assert_eq!(outcome.failed(), 1);
        prop_assert_eq!(outcome.failures()[0].row, k);
        let rows_built: Vec<usize> = outcome.built().iter().map(|b| b.row).collect();
        let expected: Vec<usize> = (1..=n).filter(|i| *i != k).collect();
        prop_assert_eq!(rows_built, expected);
    }
}
