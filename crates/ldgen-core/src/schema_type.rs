//! # Schema Type: Closed Set of Supported Schema.org Types
//!
//! Defines the `SchemaType` enum. This is the ONE definition of which
//! Schema.org types ldgen can build; the catalog table, the exporter file
//! naming, and the CLI type selector all key off it. Every `match` on
//! `SchemaType` is exhaustive, so adding a type forces the catalog to
//! supply its descriptor at compile time.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::LdgenError;

/// Total number of supported schema types.
pub const SCHEMA_TYPE_COUNT: usize = 10;

/// A supported Schema.org type.
///
/// Serializes and parses as the exact Schema.org type name
/// (`"LocalBusiness"`, `"FAQPage"`). Parsing is case-sensitive, matching
/// the `@type` value written into every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SchemaType {
    /// News, blog, or scholarly article.
    Article,
    /// A single web page.
    WebPage,
    /// A person, alive, dead, or fictional.
    Person,
    /// Company, NGO, club, or similar.
    Organization,
    /// Something happening at a time and place.
    Event,
    /// A page of frequently asked questions.
    #[serde(rename = "FAQPage")]
    FaqPage,
    /// Any offered product or service.
    Product,
    /// Instructions for preparing a dish.
    Recipe,
    /// A physical business or branch.
    LocalBusiness,
    /// An educational course.
    Course,
}

impl SchemaType {
    /// Returns all supported types in catalog order.
    pub fn all() -> &'static [SchemaType] {
        &[
            Self::Article,
            Self::WebPage,
            Self::Person,
            Self::Organization,
            Self::Event,
            Self::FaqPage,
            Self::Product,
            Self::Recipe,
            Self::LocalBusiness,
            Self::Course,
        ]
    }

    /// Returns the Schema.org type name, as written to `@type`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Article => "Article",
            Self::WebPage => "WebPage",
            Self::Person => "Person",
            Self::Organization => "Organization",
            Self::Event => "Event",
            Self::FaqPage => "FAQPage",
            Self::Product => "Product",
            Self::Recipe => "Recipe",
            Self::LocalBusiness => "LocalBusiness",
            Self::Course => "Course",
        }
    }

    /// Lowercase form of the type name, used in suggested file names
    /// (`schema_localbusiness.json`).
    pub fn slug(&self) -> String {
        self.as_str().to_ascii_lowercase()
    }

    /// Position of this type in [`SchemaType::all`].
    pub(crate) fn index(&self) -> usize {
        *self as usize
    }

    /// Comma-separated list of every supported type name.
    pub fn supported_names() -> String {
        Self::all()
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for SchemaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaType {
    type Err = LdgenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Article" => Ok(Self::Article),
            "WebPage" => Ok(Self::WebPage),
            "Person" => Ok(Self::Person),
            "Organization" => Ok(Self::Organization),
            "Event" => Ok(Self::Event),
            "FAQPage" => Ok(Self::FaqPage),
            "Product" => Ok(Self::Product),
            "Recipe" => Ok(Self::Recipe),
            "LocalBusiness" => Ok(Self::LocalBusiness),
            "Course" => Ok(Self::Course),
            other => Err(LdgenError::UnknownSchemaType(other.to_string())),
        }
    }
}
