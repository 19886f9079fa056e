//! # Schema Records: Validated JSON-LD Documents
//!
//! `SchemaRecord` is one JSON-LD document of a supported type. The
//! [`RecordBuilder`] produces it from a mapping of field names to raw
//! values, coercing each declared field by its value kind and checking
//! that every required field is present.
//!
//! ## Key Order
//!
//! Serialization writes keys in a fixed order regardless of input order:
//!
//! 1. `@context` (always `https://schema.org`)
//! 2. `@type`
//! 3. `@id`, when set
//! 4. declared fields, in descriptor order
//! 5. extension fields, in ascending name order
//!
//! ## Session State
//!
//! Everything that varies per form session or upload (the `@id`, the
//! extension policy) travels in an explicit [`BuildContext`]. Builders hold
//! no other state, so building is a pure function of its inputs.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::catalog::{descriptor_for, SchemaTypeDescriptor};
use crate::coerce::{clean_value, coerce_value, ObjectFallback};
use crate::error::LdgenError;
use crate::schema_type::SchemaType;

/// The `@context` of every record.
pub const SCHEMA_ORG_CONTEXT: &str = "https://schema.org";

/// Input keys that are never treated as properties.
const RESERVED_KEYS: &[&str] = &["@context", "@type", "@id"];

/// Raw input: field name to user-supplied value.
pub type FieldValues = Map<String, Value>;

/// What happens to input fields the descriptor does not declare.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionPolicy {
    /// Keep them as extension properties after the declared fields.
    #[default]
    Preserve,
    /// Drop them silently.
    Drop,
}

/// Per-session build settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildContext {
    /// `@id` for the record. When `None`, an `@id` key in the input is used.
    pub id: Option<String>,
    /// Treatment of undeclared fields.
    pub extensions: ExtensionPolicy,
    /// Treatment of plain text in nested-object fields.
    pub object_fallback: ObjectFallback,
}

impl BuildContext {
    /// Context with an explicit `@id`.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }
}

/// One JSON-LD document of a supported Schema.org type.
///
/// # Invariants
///
/// - Properties are stored in serialization order (see module docs).
/// - No property value is empty.
/// - A record returned by [`RecordBuilder::build`] has every required
///   field; records from `build_unvalidated` or `from_value` may not, and
///   report the gap through [`missing_fields`](Self::missing_fields).
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaRecord {
    schema_type: SchemaType,
    id: Option<String>,
    properties: Vec<(String, Value)>,
}

impl SchemaRecord {
    fn from_parts(
        descriptor: &SchemaTypeDescriptor,
        id: Option<String>,
        properties: BTreeMap<String, Value>,
    ) -> Self {
        let mut declared: Vec<(usize, String, Value)> = Vec::new();
        let mut extensions: Vec<(String, Value)> = Vec::new();
        for (name, value) in properties {
            match descriptor.position(&name) {
                Some(pos) => declared.push((pos, name, value)),
                None => extensions.push((name, value)),
            }
        }
        declared.sort_by_key(|(pos, _, _)| *pos);

        let properties = declared
            .into_iter()
            .map(|(_, name, value)| (name, value))
            .chain(extensions)
            .collect();

        Self {
            schema_type: descriptor.schema_type(),
            id,
            properties,
        }
    }

    /// The record's `@type`.
    pub fn schema_type(&self) -> SchemaType {
        self.schema_type
    }

    /// The record's `@context`.
    pub fn context(&self) -> &'static str {
        SCHEMA_ORG_CONTEXT
    }

    /// The record's `@id`, if any.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The descriptor of the record's type.
    pub fn descriptor(&self) -> &'static SchemaTypeDescriptor {
        self.schema_type.descriptor()
    }

    /// Value of a property.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.properties
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    /// Properties in serialization order, excluding `@`-keys.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.properties.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Names of properties the descriptor does not declare.
    pub fn extension_fields(&self) -> Vec<&str> {
        let descriptor = self.descriptor();
        self.properties()
            .map(|(name, _)| name)
            .filter(|name| !descriptor.is_declared(name))
            .collect()
    }

    /// Number of properties, excluding `@`-keys.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// True when the record has no properties.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Required fields that are absent, in descriptor order.
    pub fn missing_fields(&self) -> Vec<String> {
        self.descriptor()
            .required()
            .iter()
            .filter(|name| self.get(name).is_none())
            .map(|name| name.to_string())
            .collect()
    }

    /// True when every required field is present.
    pub fn is_valid(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// The value of the `name` property when it is a string.
    pub fn name(&self) -> Option<&str> {
        self.get("name").and_then(Value::as_str)
    }

    /// The record as a JSON value.
    ///
    /// `serde_json::Map` does not keep insertion order, so the key order of
    /// the returned object is not the serialization order. Use
    /// `serde_json::to_vec(&record)` for bytes.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("@context".to_string(), Value::String(SCHEMA_ORG_CONTEXT.to_string()));
        map.insert("@type".to_string(), Value::String(self.schema_type.as_str().to_string()));
        if let Some(id) = &self.id {
            map.insert("@id".to_string(), Value::String(id.clone()));
        }
        for (name, value) in &self.properties {
            map.insert(name.clone(), value.clone());
        }
        Value::Object(map)
    }

    /// Read a record back from its JSON form.
    ///
    /// Property values are taken as-is (no coercion) and empty values are
    /// dropped. Required fields are not checked.
    ///
    /// # Errors
    ///
    /// Returns `LdgenError::MalformedRecord` when the value is not an object
    /// or its `@context`/`@type`/`@id` keys are missing or of the wrong
    /// shape, and `LdgenError::UnknownSchemaType` for unsupported types.
    pub fn from_value(value: &Value) -> Result<Self, LdgenError> {
        let map = value
            .as_object()
            .ok_or_else(|| LdgenError::MalformedRecord("record is not a JSON object".into()))?;

        match map.get("@context").and_then(Value::as_str) {
            Some(SCHEMA_ORG_CONTEXT) => {}
            other => {
                return Err(LdgenError::MalformedRecord(format!(
                    "expected @context {SCHEMA_ORG_CONTEXT:?}, found {other:?}"
                )))
            }
        }

        let type_id = map
            .get("@type")
            .and_then(Value::as_str)
            .ok_or_else(|| LdgenError::MalformedRecord("missing string @type".into()))?;
        let descriptor = descriptor_for(type_id)?;

        let id = match map.get("@id") {
            None => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                return Err(LdgenError::MalformedRecord(format!(
                    "@id must be a string, found {other}"
                )))
            }
        };

        let properties = map
            .iter()
            .filter(|(name, _)| !RESERVED_KEYS.contains(&name.as_str()))
            .filter(|(_, value)| !crate::coerce::is_empty_value(value))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();

        Ok(Self::from_parts(descriptor, id, properties))
    }
}

impl Serialize for SchemaRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = 2 + usize::from(self.id.is_some()) + self.properties.len();
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("@context", SCHEMA_ORG_CONTEXT)?;
        map.serialize_entry("@type", self.schema_type.as_str())?;
        if let Some(id) = &self.id {
            map.serialize_entry("@id", id)?;
        }
        for (name, value) in &self.properties {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Builds [`SchemaRecord`]s from raw field values.
#[derive(Debug, Clone, Default)]
pub struct RecordBuilder {
    context: BuildContext,
}

impl RecordBuilder {
    /// Create a builder for one session.
    pub fn new(context: BuildContext) -> Self {
        Self { context }
    }

    /// The session context.
    pub fn context(&self) -> &BuildContext {
        &self.context
    }

    /// Build and validate a record.
    ///
    /// # Errors
    ///
    /// - `LdgenError::UnknownSchemaType` for an unsupported `type_id`.
    /// - `LdgenError::MissingRequiredFields` listing every required field
    ///   that is absent or empty after coercion.
    pub fn build(&self, type_id: &str, values: &FieldValues) -> Result<SchemaRecord, LdgenError> {
        let record = self.build_unvalidated(type_id, values)?;
        let missing = record.missing_fields();
        if !missing.is_empty() {
            tracing::debug!(schema_type = type_id, ?missing, "record is missing required fields");
            return Err(LdgenError::MissingRequiredFields {
                schema_type: record.schema_type().to_string(),
                fields: missing,
            });
        }
        Ok(record)
    }

    /// Build a record without the required-field check.
    ///
    /// # Errors
    ///
    /// Returns `LdgenError::UnknownSchemaType` for an unsupported `type_id`.
    pub fn build_unvalidated(
        &self,
        type_id: &str,
        values: &FieldValues,
    ) -> Result<SchemaRecord, LdgenError> {
        let descriptor = descriptor_for(type_id)?;

        let id = self
            .context
            .id
            .clone()
            .or_else(|| values.get("@id").and_then(Value::as_str).map(str::to_string))
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());

        let mut properties = BTreeMap::new();
        for (raw_name, raw_value) in values {
            let name = raw_name.trim();
            if name.is_empty() || RESERVED_KEYS.contains(&name) {
                continue;
            }
            let value = if descriptor.is_declared(name) {
                coerce_value(descriptor.value_kind(name), raw_value, self.context.object_fallback)
            } else {
                match self.context.extensions {
                    ExtensionPolicy::Preserve => clean_value(raw_value),
                    ExtensionPolicy::Drop => {
                        tracing::trace!(field = name, "dropping undeclared field");
                        None
                    }
                }
            };
            if let Some(value) = value {
                properties.insert(name.to_string(), value);
            }
        }

        let record = SchemaRecord::from_parts(descriptor, id, properties);
        tracing::debug!(
            schema_type = %record.schema_type(),
            properties = record.len(),
            "built record"
        );
        Ok(record)
    }
}

/// Build and validate a record with a default [`BuildContext`].
///
/// See [`RecordBuilder::build`].
pub fn build(type_id: &str, values: &FieldValues) -> Result<SchemaRecord, LdgenError> {
    RecordBuilder::default().build(type_id, values)
}
