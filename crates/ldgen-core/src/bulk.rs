//! # Bulk Record Construction
//!
//! Applies the [`RecordBuilder`] to every row of an upload. Rows are
//! independent: a row that fails validation is reported with its 1-based
//! source index and processing continues with the next row. Partial
//! success is the normal outcome, not an error.

use crate::coerce::is_empty_value;
use crate::error::LdgenError;
use crate::record::{BuildContext, FieldValues, RecordBuilder, SchemaRecord};
use crate::schema_type::SchemaType;

/// A successfully built row.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltRow {
    /// 1-based index of the source row.
    pub row: usize,
    /// The record built from it.
    pub record: SchemaRecord,
}

/// A row that could not be built.
#[derive(Debug)]
pub struct RowFailure {
    /// 1-based index of the source row.
    pub row: usize,
    /// Why the row failed.
    pub error: LdgenError,
}

/// Result of a bulk build.
#[derive(Debug)]
pub struct BulkOutcome {
    schema_type: SchemaType,
    built: Vec<BuiltRow>,
    failures: Vec<RowFailure>,
    skipped: Vec<usize>,
    total: usize,
}

impl BulkOutcome {
    /// The type every row was built as.
    pub fn schema_type(&self) -> SchemaType {
        self.schema_type
    }

    /// Successful rows, in input order.
    pub fn built(&self) -> &[BuiltRow] {
        &self.built
    }

    /// Successful records, in input order.
    pub fn records(&self) -> Vec<SchemaRecord> {
        self.built.iter().map(|row| row.record.clone()).collect()
    }

    /// Consume the outcome, keeping only the successful records.
    pub fn into_records(self) -> Vec<SchemaRecord> {
        self.built.into_iter().map(|row| row.record).collect()
    }

    /// Failed rows, in input order.
    pub fn failures(&self) -> &[RowFailure] {
        &self.failures
    }

    /// 1-based indices of rows skipped because every value was empty
    /// (only with [`BulkRecordBuilder::skip_empty_rows`]).
    pub fn skipped(&self) -> &[usize] {
        &self.skipped
    }

    /// Number of input rows, including skipped ones.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of successful rows.
    pub fn succeeded(&self) -> usize {
        self.built.len()
    }

    /// Number of failed rows.
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// True when no row failed.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Builds records for every row of an upload.
#[derive(Debug, Clone)]
pub struct BulkRecordBuilder {
    builder: RecordBuilder,
    validate: bool,
    skip_empty: bool,
}

impl Default for BulkRecordBuilder {
    fn default() -> Self {
        Self::new(BuildContext::default())
    }
}

impl BulkRecordBuilder {
    /// Create a validating bulk builder.
    ///
    /// `context.id` is ignored for bulk input; each row supplies its own
    /// `@id` column.
    pub fn new(context: BuildContext) -> Self {
        Self {
            builder: RecordBuilder::new(BuildContext { id: None, ..context }),
            validate: true,
            skip_empty: false,
        }
    }

    /// Skip rows whose values are all empty instead of failing them.
    ///
    /// Spreadsheets often carry trailing blank rows; skipped rows are
    /// listed in [`BulkOutcome::skipped`].
    pub fn skip_empty_rows(mut self) -> Self {
        self.skip_empty = true;
        self
    }

    /// Accept rows that miss required fields instead of failing them.
    ///
    /// Such rows are still logged at `warn`.
    pub fn unvalidated(mut self) -> Self {
        self.validate = false;
        self
    }

    /// Build every row.
    ///
    /// # Errors
    ///
    /// Fails as a whole only with `LdgenError::UnknownSchemaType`; per-row
    /// problems are collected in [`BulkOutcome::failures`].
    pub fn build_all(&self, type_id: &str, rows: &[FieldValues]) -> Result<BulkOutcome, LdgenError> {
        let schema_type: SchemaType = type_id.parse()?;

        let mut built = Vec::new();
        let mut failures = Vec::new();
        let mut skipped = Vec::new();

        for (i, values) in rows.iter().enumerate() {
            let row = i + 1;
            if self.skip_empty && values.values().all(is_empty_value) {
                tracing::debug!(row, "skipping empty row");
                skipped.push(row);
                continue;
            }

            let result = if self.validate {
                self.builder.build(type_id, values)
            } else {
                self.builder.build_unvalidated(type_id, values)
            };

            match result {
                Ok(record) => {
                    if !self.validate && !record.is_valid() {
                        tracing::warn!(
                            row,
                            missing = ?record.missing_fields(),
                            "row accepted without required fields"
                        );
                    }
                    built.push(BuiltRow { row, record });
                }
                Err(error) => {
                    tracing::warn!(row, %error, "row failed");
                    failures.push(RowFailure { row, error });
                }
            }
        }

        tracing::info!(
            schema_type = %schema_type,
            total = rows.len(),
            built = built.len(),
            failed = failures.len(),
            skipped = skipped.len(),
            "bulk build finished"
        );

        Ok(BulkOutcome {
            schema_type,
            built,
            failures,
            skipped,
            total: rows.len(),
        })
    }
}

/// Build every row with a default, validating builder.
///
/// See [`BulkRecordBuilder::build_all`].
pub fn build_all(type_id: &str, rows: &[FieldValues]) -> Result<BulkOutcome, LdgenError> {
    BulkRecordBuilder::default().build_all(type_id, rows)
}
