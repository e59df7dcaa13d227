//! Validating constructor
//!
//! Check order, first fault wins:
//! 1. Every supplied name is a schema field (extras, in supplied order)
//! 2. Every schema field is supplied (missing, in schema order)
//! 3. Per field, in schema order: exact type, then precondition
//!
//! Forbidden behaviors:
//! - Implicit type coercion (an int is never a float)
//! - Default values
//! - Partial construction: a failed call produces no record

use std::sync::Arc;

use super::declare::RecordType;
use super::errors::{RecordError, RecordResult};
use super::instance::Record;
use super::schema::SchemaField;
use super::types::Value;
use super::values::Values;
use crate::observability;

/// Validates supplied arguments against one record type's schema.
pub struct RecordValidator<'a> {
    record_type: &'a Arc<RecordType>,
}

impl<'a> RecordValidator<'a> {
    pub fn new(record_type: &'a Arc<RecordType>) -> Self {
        Self { record_type }
    }

    /// Checks `values` without building a record.
    ///
    /// Reports the same first fault [`RecordValidator::construct`] would.
    pub fn validate(&self, values: &Values) -> RecordResult<()> {
        self.check_names(values)?;
        let schema = self.record_type.schema();
        for field in schema.fields() {
            if let Some(value) = values.get(&field.name) {
                check_value(field, value)?;
            }
        }
        Ok(())
    }

    /// Validates `values` and builds the record.
    ///
    /// # Errors
    ///
    /// - `ExtraArgument` for the first supplied name not in the schema
    /// - `MissingArgument` for the first schema field not supplied
    /// - `TypeMismatch` if a value's type is not exactly the declared type
    /// - `PreconditionViolation` if a value fails its field's predicate
    pub fn construct(&self, values: Values) -> RecordResult<Record> {
        let metrics = observability::global_metrics();
        match self.build(values) {
            Ok(record) => {
                metrics.increment_records_constructed();
                Ok(record)
            }
            Err(e) => {
                metrics.increment_records_rejected();
                Err(e)
            }
        }
    }

    fn build(&self, values: Values) -> RecordResult<Record> {
        self.check_names(&values)?;

        let schema = self.record_type.schema();
        let mut supplied = values.into_map();
        let mut stored = Vec::with_capacity(schema.len());
        for field in schema.fields() {
            let value = supplied.remove(&field.name).ok_or_else(|| {
                RecordError::missing_argument(self.record_type.name(), &field.name)
            })?;
            check_value(field, &value)?;
            stored.push(value);
        }

        Ok(Record::new(Arc::clone(self.record_type), stored))
    }

    /// Extras first, then missing fields.
    fn check_names(&self, values: &Values) -> RecordResult<()> {
        let schema = self.record_type.schema();
        let type_name = self.record_type.name();

        if let Some(extra) = values.keys().find(|k| !schema.contains(k)) {
            return Err(RecordError::extra_argument(type_name, extra));
        }
        if let Some(missing) = schema.field_names().find(|f| !values.contains_key(f)) {
            return Err(RecordError::missing_argument(type_name, missing));
        }
        Ok(())
    }
}

/// Exact type match, then precondition.
fn check_value(field: &SchemaField, value: &Value) -> RecordResult<()> {
    let actual = value.field_type();
    if actual != field.field_type {
        return Err(RecordError::TypeMismatch {
            field: field.name.clone(),
            expected: field.field_type.type_name(),
            actual: actual.type_name(),
        });
    }

    if !field.descriptor.accepts(value) {
        return Err(RecordError::PreconditionViolation {
            field: field.name.clone(),
            value: value.repr(),
        });
    }
    Ok(())
}
