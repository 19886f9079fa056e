//! # Value Coercion: Raw Input to JSON-LD Property Values
//!
//! Form fields and spreadsheet cells arrive as loosely typed JSON values,
//! mostly strings. This module turns each raw value into the property value
//! written to the record, guided by the field's [`ValueKind`].
//!
//! ## Rules
//!
//! 1. **Empty values are dropped.** `null`, blank strings, and arrays or
//!    objects that are empty after cleaning coerce to `None`. A dropped
//!    required field is reported as missing.
//! 2. **Text and URLs** are trimmed. URL fields also accept lists
//!    (`sameAs`).
//! 3. **Dates** in `YYYY-MM-DD`, RFC 3339, or `YYYY-MM-DD HH:MM:SS` form are
//!    normalized to ISO-8601. Anything else passes through as text.
//! 4. **Numbers** parse from strings when they can; other strings (such as
//!    ISO-8601 durations, `PT20M`) pass through as text.
//! 5. **Arrays** split text on newlines, or on `|` when the text has no
//!    newline, matching the `item1|item2` syntax of generated templates.
//! 6. **Objects** parse text that holds a JSON object or array. Plain text
//!    stays text unless [`ObjectFallback::WrapName`] asks for
//!    `{"name": text}`.
//!
//! Values are never validated against the Schema.org vocabulary.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::catalog::ValueKind;

/// What an `object` field does with plain text that is not JSON.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectFallback {
    /// Keep the text as a string property value.
    #[default]
    KeepText,
    /// Wrap the text as `{"name": text}`.
    WrapName,
}

/// True for values that count as "not supplied".
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.iter().all(is_empty_value),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Coerce a raw input value for a field of the given kind.
///
/// Returns `None` when the value is empty and the field should be omitted.
pub fn coerce_value(kind: ValueKind, value: &Value, fallback: ObjectFallback) -> Option<Value> {
    if is_empty_value(value) {
        return None;
    }
    let coerced = match kind {
        ValueKind::Text | ValueKind::Url => coerce_text(value),
        ValueKind::Date => coerce_date(value),
        ValueKind::Number => coerce_number(value),
        ValueKind::Array => coerce_array(value),
        ValueKind::Object => coerce_object(value, fallback),
    };
    coerced.filter(|v| !is_empty_value(v))
}

/// Clean a value whose field has no kind hint: trims strings and prunes
/// empty list items, otherwise passes through.
pub fn clean_value(value: &Value) -> Option<Value> {
    if is_empty_value(value) {
        return None;
    }
    coerce_text(value).filter(|v| !is_empty_value(v))
}

fn coerce_text(value: &Value) -> Option<Value> {
    match value {
        Value::String(s) => Some(Value::String(s.trim().to_string())),
        Value::Array(items) => Some(Value::Array(clean_items(items))),
        other => Some(other.clone()),
    }
}

fn coerce_date(value: &Value) -> Option<Value> {
    match value {
        Value::String(s) => Some(Value::String(normalize_date(s.trim()))),
        other => coerce_text(other),
    }
}

/// Normalize a date or date-time string to ISO-8601.
///
/// Unrecognized input is returned unchanged.
pub fn normalize_date(s: &str) -> String {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.format("%Y-%m-%d").to_string();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return dt.to_rfc3339_opts(SecondsFormat::AutoSi, true);
    }
    for pattern in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, pattern) {
            return dt.format("%Y-%m-%dT%H:%M:%S").to_string();
        }
    }
    s.to_string()
}

fn coerce_number(value: &Value) -> Option<Value> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            if let Ok(i) = s.parse::<i64>() {
                return Some(Value::from(i));
            }
            if let Ok(f) = s.parse::<f64>() {
                if let Some(n) = serde_json::Number::from_f64(f) {
                    return Some(Value::Number(n));
                }
            }
            Some(Value::String(s.to_string()))
        }
        other => coerce_text(other),
    }
}

fn coerce_array(value: &Value) -> Option<Value> {
    match value {
        Value::String(s) => {
            let separator = if s.contains('\n') { '\n' } else { '|' };
            let items: Vec<Value> = s
                .split(separator)
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(|item| Value::String(item.to_string()))
                .collect();
            Some(Value::Array(items))
        }
        Value::Array(items) => Some(Value::Array(clean_items(items))),
        other => Some(Value::Array(vec![other.clone()])),
    }
}

fn coerce_object(value: &Value, fallback: ObjectFallback) -> Option<Value> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            if s.starts_with('{') || s.starts_with('[') {
                if let Ok(parsed) = serde_json::from_str::<Value>(s) {
                    return Some(parsed);
                }
            }
            match fallback {
                ObjectFallback::KeepText => Some(Value::String(s.to_string())),
                ObjectFallback::WrapName => {
                    let mut map = Map::new();
                    map.insert("name".to_string(), Value::String(s.to_string()));
                    Some(Value::Object(map))
                }
            }
        }
        Value::Array(items) => Some(Value::Array(clean_items(items))),
        other => Some(other.clone()),
    }
}

fn clean_items(items: &[Value]) -> Vec<Value> {
    items
        .iter()
        .filter(|item| !is_empty_value(item))
        .map(|item| match item {
            Value::String(s) => Value::String(s.trim().to_string()),
            other => other.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn coerce(kind: ValueKind, value: Value) -> Option<Value> {
        coerce_value(kind, &value, ObjectFallback::KeepText)
    }

    #[test]
    fn test_empty_values_are_dropped() {
        for kind in [ValueKind::Text, ValueKind::Array, ValueKind::Object, ValueKind::Date] {
            assert_eq!(coerce(kind, json!(null)), None);
            assert_eq!(coerce(kind, json!("")), None);
            assert_eq!(coerce(kind, json!("   ")), None);
            assert_eq!(coerce(kind, json!([])), None);
            assert_eq!(coerce(kind, json!({})), None);
        }
        assert_eq!(coerce(ValueKind::Array, json!(["", "  "])), None);
        assert_eq!(coerce(ValueKind::Array, json!("\n\n")), None);
    }

    #[test]
    fn test_text_is_trimmed() {
        assert_eq!(coerce(ValueKind::Text, json!("  Launch ")), Some(json!("Launch")));
        assert_eq!(coerce(ValueKind::Text, json!(42)), Some(json!(42)));
        assert_eq!(coerce(ValueKind::Text, json!(false)), Some(json!(false)));
    }

    #[test]
    fn test_url_accepts_lists() {
        assert_eq!(
            coerce(ValueKind::Url, json!([" https://a.example ", ""])),
            Some(json!(["https://a.example"]))
        );
    }

    #[test]
    fn test_dates_are_normalized() {
        assert_eq!(coerce(ValueKind::Date, json!("2025-01-01")), Some(json!("2025-01-01")));
        assert_eq!(
            coerce(ValueKind::Date, json!("2025-01-01 09:30:00")),
            Some(json!("2025-01-01T09:30:00"))
        );
        assert_eq!(
            coerce(ValueKind::Date, json!("2025-01-01T09:30:00Z")),
            Some(json!("2025-01-01T09:30:00Z"))
        );
        assert_eq!(
            coerce(ValueKind::Date, json!("2025-01-01T09:30:00+02:00")),
            Some(json!("2025-01-01T09:30:00+02:00"))
        );
        assert_eq!(coerce(ValueKind::Date, json!("next Tuesday")), Some(json!("next Tuesday")));
    }

    #[test]
    fn test_numbers_parse_from_text() {
        assert_eq!(coerce(ValueKind::Number, json!("1200")), Some(json!(1200)));
        assert_eq!(coerce(ValueKind::Number, json!(" 2.5 ")), Some(json!(2.5)));
        assert_eq!(coerce(ValueKind::Number, json!(7)), Some(json!(7)));
        assert_eq!(coerce(ValueKind::Number, json!("PT20M")), Some(json!("PT20M")));
    }

    #[test]
    fn test_arrays_split_on_newlines() {
        assert_eq!(
            coerce(ValueKind::Array, json!("flour\n sugar \n\neggs")),
            Some(json!(["flour", "sugar", "eggs"]))
        );
    }

    #[test]
    fn test_arrays_split_on_pipes_without_newlines() {
        assert_eq!(
            coerce(ValueKind::Array, json!("item1|item2| item3")),
            Some(json!(["item1", "item2", "item3"]))
        );
        // With newlines present, pipes are part of the item.
        assert_eq!(
            coerce(ValueKind::Array, json!("a|b\nc")),
            Some(json!(["a|b", "c"]))
        );
    }

    #[test]
    fn test_scalar_becomes_single_item_array() {
        assert_eq!(coerce(ValueKind::Array, json!(3)), Some(json!([3])));
    }

    #[test]
    fn test_objects_parse_json_text() {
        assert_eq!(
            coerce(ValueKind::Object, json!(r#"{"@type": "Person", "name": "Ada"}"#)),
            Some(json!({"@type": "Person", "name": "Ada"}))
        );
        assert_eq!(
            coerce(ValueKind::Object, json!({"@type": "Place"})),
            Some(json!({"@type": "Place"}))
        );
    }

    #[test]
    fn test_object_plain_text_fallbacks() {
        assert_eq!(coerce(ValueKind::Object, json!("Hall A")), Some(json!("Hall A")));
        assert_eq!(
            coerce_value(ValueKind::Object, &json!("Hall A"), ObjectFallback::WrapName),
            Some(json!({"name": "Hall A"}))
        );
        // Text that only looks like JSON stays text.
        assert_eq!(coerce(ValueKind::Object, json!("{oops")), Some(json!("{oops")));
    }

    #[test]
    fn test_clean_value_for_undeclared_fields() {
        assert_eq!(clean_value(&json!(" x ")), Some(json!("x")));
        assert_eq!(clean_value(&json!({"a": 1})), Some(json!({"a": 1})));
        assert_eq!(clean_value(&json!("")), None);
    }
}
