//! # ldgen-core: Schema.org Records
//!
//! The leaf crate of the ldgen workspace. It owns the catalog of supported
//! Schema.org types and turns raw field values into validated JSON-LD
//! records, one at a time or in bulk.
//!
//! ## Key Design Principles
//!
//! 1. **One static catalog.** [`SchemaType`] is a closed enum and
//!    [`catalog`] is a single data table indexed by it. Adding a type is a
//!    data change, not new branching logic.
//!
//! 2. **Explicit session context.** The `@id` and extension policy of a
//!    form session are passed in a [`BuildContext`]; builders are pure.
//!
//! 3. **Report every problem at once.** A record missing several required
//!    fields fails with all of their names. A bulk build reports each
//!    failing row by index and keeps going.
//!
//! 4. **Deterministic output.** [`SchemaRecord`] serializes with a fixed
//!    key order: `@context`, `@type`, `@id`, declared fields in descriptor
//!    order, then extensions by name.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `ldgen-*` crates.
//! - No I/O; every operation is bounded by its input.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod bulk;
pub mod catalog;
pub mod coerce;
pub mod error;
pub mod record;
pub mod schema_type;

// Re-export primary types for ergonomic imports.
pub use bulk::{build_all, BuiltRow, BulkOutcome, BulkRecordBuilder, RowFailure};
pub use catalog::{descriptor_for, value_kind, FieldTier, SchemaTypeDescriptor, ValueKind};
pub use coerce::ObjectFallback;
pub use error::LdgenError;
pub use record::{
    build, BuildContext, ExtensionPolicy, FieldValues, RecordBuilder, SchemaRecord,
    SCHEMA_ORG_CONTEXT,
};
pub use schema_type::{SchemaType, SCHEMA_TYPE_COUNT};
