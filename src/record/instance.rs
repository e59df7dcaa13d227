//! Constructed record instances
//!
//! A record is created only by the validating constructor and is read-only
//! from then on. Every schema field has exactly one stored value.

use std::fmt;
use std::sync::Arc;

use super::declare::RecordType;
use super::errors::{RecordError, RecordResult};
use super::format;
use super::schema::{Schema, SchemaField};
use super::types::{FieldType, Value};
use crate::observability;

/// An immutable, validated record
#[derive(Clone)]
pub struct Record {
    record_type: Arc<RecordType>,
    /// One value per schema field, in schema order
    values: Vec<Value>,
}

impl Record {
    pub(crate) fn new(record_type: Arc<RecordType>, values: Vec<Value>) -> Self {
        debug_assert_eq!(record_type.schema().len(), values.len());
        Self { record_type, values }
    }

    pub fn record_type(&self) -> &Arc<RecordType> {
        &self.record_type
    }

    pub fn type_name(&self) -> &str {
        self.record_type.name()
    }

    pub fn schema(&self) -> &Arc<Schema> {
        self.record_type.schema()
    }

    /// Reads a field. Always succeeds for a field in the schema.
    pub fn get(&self, field: &str) -> RecordResult<&Value> {
        self.schema()
            .position(field)
            .map(|i| &self.values[i])
            .ok_or_else(|| RecordError::UnknownField {
                type_name: self.type_name().to_string(),
                field: field.to_string(),
            })
    }

    /// Records are immutable: this always fails with `ImmutableField`.
    pub fn set(&self, field: &str, _value: impl Into<Value>) -> RecordResult<()> {
        observability::global_metrics().increment_write_attempts_rejected();
        Err(RecordError::ImmutableField {
            field: field.to_string(),
        })
    }

    pub fn get_str(&self, field: &str) -> RecordResult<&str> {
        match self.get(field)? {
            Value::Str(s) => Ok(s.as_str()),
            other => Err(self.wrong_read(field, FieldType::Str, other)),
        }
    }

    pub fn get_int(&self, field: &str) -> RecordResult<i64> {
        match self.get(field)? {
            Value::Int(i) => Ok(*i),
            other => Err(self.wrong_read(field, FieldType::Int, other)),
        }
    }

    pub fn get_float(&self, field: &str) -> RecordResult<f64> {
        match self.get(field)? {
            Value::Float(x) => Ok(*x),
            other => Err(self.wrong_read(field, FieldType::Float, other)),
        }
    }

    pub fn get_bool(&self, field: &str) -> RecordResult<bool> {
        match self.get(field)? {
            Value::Bool(b) => Ok(*b),
            other => Err(self.wrong_read(field, FieldType::Bool, other)),
        }
    }

    /// Fields and their values in schema order
    pub fn iter(&self) -> impl Iterator<Item = (&SchemaField, &Value)> {
        self.schema().fields().zip(self.values.iter())
    }

    fn wrong_read(&self, field: &str, requested: FieldType, stored: &Value) -> RecordError {
        RecordError::TypeMismatch {
            field: field.to_string(),
            expected: requested.type_name(),
            actual: stored.field_type().type_name(),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format::render(self))
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        {
            let mut map = f.debug_map();
            for (field, value) in self.iter() {
                map.entry(&field.name, value);
            }
            map.finish()?;
        }
        write!(f, " as {}", self.type_name())
    }
}
