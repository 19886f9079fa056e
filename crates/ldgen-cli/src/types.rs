//! # Types Subcommand
//!
//! Lists the supported Schema.org types, or the fields of one type with
//! their tier and value kind.

use anyhow::Result;
use clap::Args;

use ldgen_core::{descriptor_for, SchemaType, SchemaTypeDescriptor};

/// Arguments for the `ldgen types` subcommand.
#[derive(Args, Debug)]
pub struct TypesArgs {
    /// Show the fields of this type.
    #[arg(long = "type", value_name = "TYPE")]
    pub schema_type: Option<String>,
}

/// Execute the types subcommand.
pub fn run_types(args: &TypesArgs) -> Result<u8> {
    let text = match &args.schema_type {
        None => type_listing(),
        Some(type_id) => match descriptor_for(type_id) {
            Ok(descriptor) => field_listing(descriptor),
            Err(e) => {
                println!("FAIL: {e}");
                return Ok(1);
            }
        },
    };
    print!("{text}");
    Ok(0)
}

fn type_listing() -> String {
    let mut out = String::new();
    for schema_type in SchemaType::all() {
        let descriptor = schema_type.descriptor();
        out.push_str(&format!(
            "{:<14} required: {} ({} optional)\n",
            schema_type.as_str(),
            descriptor.required().join(", "),
            descriptor.optional_fields().len()
        ));
    }
    out
}

fn field_listing(descriptor: &SchemaTypeDescriptor) -> String {
    let mut out = format!("{}\n", descriptor.schema_type());
    for field in descriptor.fields() {
        let tier = descriptor
            .tier_of(field)
            .map(|t| t.as_str())
            .unwrap_or("-");
        out.push_str(&format!(
            "  {:<22} {:<9} {}\n",
            field,
            tier,
            descriptor.value_kind(field)
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_has_one_line_per_type() {
        let text = type_listing();
        assert_eq!(text.lines().count(), SchemaType::all().len());
        assert!(text.contains("Event          required: name, startDate, location"));
    }

    #[test]
    fn field_listing_shows_tier_and_kind() {
        let text = field_listing(SchemaType::Recipe.descriptor());
        assert!(text.starts_with("Recipe\n"));
        let line = text
            .lines()
            .find(|l| l.trim_start().starts_with("recipeIngredient"))
            .unwrap();
        assert!(line.contains("required"));
        assert!(line.ends_with("array"));
    }

    #[test]
    fn unknown_type_exits_one() {
        let args = TypesArgs {
            schema_type: Some("Widget".to_string()),
        };
        assert_eq!(run_types(&args).unwrap(), 1);
    }

    #[test]
    fn listing_exits_zero() {
        assert_eq!(run_types(&TypesArgs { schema_type: None }).unwrap(), 0);
    }
}
