//! # Schema Catalog: Static Field Specifications
//!
//! One static table maps every [`SchemaType`] to its
//! [`SchemaTypeDescriptor`]: the ordered required fields, the ordered
//! optional fields (split into a `common` and an `advanced` tier), and the
//! value-kind hint of each field.
//!
//! The table is indexed by the enum discriminant, so adding a type is a
//! data change: one variant in `schema_type.rs`, one row here. There is no
//! per-type branching anywhere else.
//!
//! Field lists are configuration data. They are not checked against the
//! Schema.org vocabulary.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::LdgenError;
use crate::schema_type::{SchemaType, SCHEMA_TYPE_COUNT};

/// How a field's raw input should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// Free text.
    Text,
    /// An absolute URL (or a list of them, for `sameAs`).
    Url,
    /// A number, or an ISO-8601 duration kept as text.
    Number,
    /// A calendar date or date-time, normalized to ISO-8601.
    Date,
    /// A list of values; text input is one item per line.
    Array,
    /// A nested JSON-LD object (or plain text naming it).
    Object,
}

impl ValueKind {
    /// Returns the snake_case name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Url => "url",
            Self::Number => "number",
            Self::Date => "date",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which section of a descriptor a field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldTier {
    /// Must be present and non-empty for a record to be valid.
    Required,
    /// Frequently used optional fields.
    Common,
    /// Rarely used optional fields.
    Advanced,
}

impl FieldTier {
    /// All tiers, in descriptor order.
    pub fn all() -> &'static [FieldTier] {
        &[Self::Required, Self::Common, Self::Advanced]
    }

    /// Returns the snake_case name of this tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Common => "common",
            Self::Advanced => "advanced",
        }
    }
}

impl std::fmt::Display for FieldTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "required" => Ok(Self::Required),
            "common" => Ok(Self::Common),
            "advanced" => Ok(Self::Advanced),
            other => Err(format!(
                "unknown field tier: {other:?} (expected required, common, or advanced)"
            )),
        }
    }
}

/// Field specification of one Schema.org type.
///
/// # Invariants
///
/// - `required` is non-empty.
/// - No field name appears in more than one tier.
/// - Immutable; lives in a `static` for the life of the process.
#[derive(Debug, PartialEq, Eq)]
pub struct SchemaTypeDescriptor {
    schema_type: SchemaType,
    required: &'static [&'static str],
    common: &'static [&'static str],
    advanced: &'static [&'static str],
}

impl SchemaTypeDescriptor {
    /// The type this descriptor specifies.
    pub fn schema_type(&self) -> SchemaType {
        self.schema_type
    }

    /// Required field names, in order.
    pub fn required(&self) -> &'static [&'static str] {
        self.required
    }

    /// Common optional field names, in order.
    pub fn common(&self) -> &'static [&'static str] {
        self.common
    }

    /// Advanced optional field names, in order.
    pub fn advanced(&self) -> &'static [&'static str] {
        self.advanced
    }

    /// Field names of one tier.
    pub fn tier(&self, tier: FieldTier) -> &'static [&'static str] {
        match tier {
            FieldTier::Required => self.required,
            FieldTier::Common => self.common,
            FieldTier::Advanced => self.advanced,
        }
    }

    /// Optional field names: common, then advanced.
    pub fn optional_fields(&self) -> Vec<&'static str> {
        self.fields_for_tiers(&[FieldTier::Common, FieldTier::Advanced])
    }

    /// Every declared field: required, then common, then advanced.
    pub fn fields(&self) -> Vec<&'static str> {
        self.fields_for_tiers(FieldTier::all())
    }

    /// Declared fields of the selected tiers, in descriptor order
    /// regardless of the order of `tiers`. Duplicates keep their first
    /// position.
    pub fn fields_for_tiers(&self, tiers: &[FieldTier]) -> Vec<&'static str> {
        let mut out: Vec<&'static str> = Vec::new();
        for tier in FieldTier::all() {
            if !tiers.contains(tier) {
                continue;
            }
            for name in self.tier(*tier) {
                if !out.contains(name) {
                    out.push(*name);
                }
            }
        }
        out
    }

    /// The tier a field belongs to, or `None` for undeclared fields.
    pub fn tier_of(&self, field: &str) -> Option<FieldTier> {
        FieldTier::all()
            .iter()
            .copied()
            .find(|tier| self.tier(*tier).contains(&field))
    }

    /// True when `field` is declared in any tier.
    pub fn is_declared(&self, field: &str) -> bool {
        self.tier_of(field).is_some()
    }

    /// True when `field` is required.
    pub fn is_required(&self, field: &str) -> bool {
        self.required.contains(&field)
    }

    /// Position of a declared field in [`fields`](Self::fields).
    pub fn position(&self, field: &str) -> Option<usize> {
        self.fields().iter().position(|f| *f == field)
    }

    /// Value-kind hint of a field. Undeclared fields are `Text`.
    pub fn value_kind(&self, field: &str) -> ValueKind {
        value_kind(field)
    }
}

/// Look up the descriptor for a type name.
///
/// # Errors
///
/// Returns `LdgenError::UnknownSchemaType` when `type_id` is not one of the
/// supported Schema.org type names (case-sensitive).
pub fn descriptor_for(type_id: &str) -> Result<&'static SchemaTypeDescriptor, LdgenError> {
    let schema_type: SchemaType = type_id.parse()?;
    Ok(schema_type.descriptor())
}

impl SchemaType {
    /// The catalog entry for this type.
    pub fn descriptor(&self) -> &'static SchemaTypeDescriptor {
        &CATALOG[self.index()]
    }
}

/// Value-kind hint of a field name, shared by all types.
///
/// Rules are checked in order and the first match wins; unknown names are
/// `Text`.
pub fn value_kind(field: &str) -> ValueKind {
    KIND_RULES
        .iter()
        .find(|(_, names)| names.contains(&field))
        .map(|(kind, _)| *kind)
        .unwrap_or(ValueKind::Text)
}

const KIND_RULES: &[(ValueKind, &[&str])] = &[
    (ValueKind::Url, &["url", "image", "logo", "sameAs"]),
    (
        ValueKind::Date,
        &[
            "datePublished",
            "dateModified",
            "startDate",
            "endDate",
            "birthDate",
            "foundingDate",
        ],
    ),
    (ValueKind::Number, &["wordCount", "prepTime", "cookTime"]),
    (
        ValueKind::Array,
        &["recipeIngredient", "recipeInstructions", "about", "mentions"],
    ),
    (
        ValueKind::Object,
        &["author", "organizer", "location", "offers", "address", "contactPoint"],
    ),
];

static CATALOG: [SchemaTypeDescriptor; SCHEMA_TYPE_COUNT] = [
    SchemaTypeDescriptor {
        schema_type: SchemaType::Article,
        required: &["headline", "author", "datePublished"],
        common: &["description", "url", "image", "wordCount", "articleSection", "articleBody"],
        advanced: &["about", "mentions", "isPartOf", "mainEntity", "speakable", "significantLink"],
    },
    SchemaTypeDescriptor {
        schema_type: SchemaType::WebPage,
        required: &["name", "url"],
        common: &["description", "author", "datePublished", "dateModified", "breadcrumb"],
        advanced: &["about", "mentions", "isPartOf", "mainEntity", "significantLink", "relatedLink"],
    },
    SchemaTypeDescriptor {
        schema_type: SchemaType::Person,
        required: &["name"],
        common: &["url", "image", "description", "jobTitle", "worksFor", "birthDate"],
        advanced: &["knowsAbout", "sameAs", "memberOf", "alumniOf", "award", "owns"],
    },
    SchemaTypeDescriptor {
        schema_type: SchemaType::Organization,
        required: &["name"],
        common: &["url", "logo", "description", "address", "contactPoint", "foundingDate"],
        advanced: &["sameAs", "parentOrganization", "subOrganization", "member", "owns", "sponsor"],
    },
    SchemaTypeDescriptor {
        schema_type: SchemaType::Event,
        required: &["name", "startDate", "location"],
        common: &["description", "organizer", "endDate", "eventStatus", "eventAttendanceMode"],
        advanced: &["about", "performer", "sponsor", "subEvent", "superEvent", "workPerformed"],
    },
    SchemaTypeDescriptor {
        schema_type: SchemaType::FaqPage,
        required: &["mainEntity"],
        common: &["name", "description", "url", "datePublished", "author"],
        advanced: &["about", "mentions", "isPartOf", "significantLink"],
    },
    SchemaTypeDescriptor {
        schema_type: SchemaType::Product,
        required: &["name"],
        common: &["description", "image", "brand", "offers", "review", "aggregateRating"],
        advanced: &["about", "isRelatedTo", "isSimilarTo", "category", "manufacturer", "model"],
    },
    SchemaTypeDescriptor {
        schema_type: SchemaType::Recipe,
        required: &["name", "recipeIngredient", "recipeInstructions"],
        common: &["description", "image", "author", "datePublished", "prepTime", "cookTime"],
        advanced: &[
            "about",
            "recipeCategory",
            "recipeCuisine",
            "nutrition",
            "suitableForDiet",
            "recipeYield",
        ],
    },
    SchemaTypeDescriptor {
        schema_type: SchemaType::LocalBusiness,
        required: &["name", "address"],
        common: &["description", "url", "telephone", "openingHours", "priceRange", "image"],
        advanced: &[
            "sameAs",
            "parentOrganization",
            "paymentAccepted",
            "currenciesAccepted",
            "areaServed",
        ],
    },
    SchemaTypeDescriptor {
        schema_type: SchemaType::Course,
        required: &["name", "provider"],
        common: &["description", "url", "courseCode", "instructor", "educationalLevel"],
        advanced: &[
            "about",
            "teaches",
            "coursePrerequisites",
            "hasCourseInstance",
            "aggregateRating",
        ],
    },
];
