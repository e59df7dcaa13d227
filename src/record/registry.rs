//! Named registry of declared record types
//!
//! - One entry per type name
//! - A registered type is never replaced
//! - Construction by name delegates to the validating constructor

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value as JsonValue;

use super::declare::RecordType;
use super::errors::{RecordError, RecordResult};
use super::instance::Record;
use super::values::Values;
use crate::observability::{self, Event};

/// Registry of record types indexed by name.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: BTreeMap<String, Arc<RecordType>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a declared type.
    ///
    /// # Errors
    ///
    /// `TypeAlreadyRegistered` if a type with the same name is present.
    pub fn register(&mut self, record_type: Arc<RecordType>) -> RecordResult<()> {
        let name = record_type.name().to_string();
        if self.types.contains_key(&name) {
            return Err(RecordError::TypeAlreadyRegistered { type_name: name });
        }

        observability::log_event_with_fields(Event::TypeRegistered, &[("type", name.as_str())]);
        self.types.insert(name, record_type);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Arc<RecordType>> {
        self.types.get(name)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Registered types in name order
    pub fn all_types(&self) -> impl Iterator<Item = &Arc<RecordType>> {
        self.types.values()
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Constructs a record of the named type.
    pub fn construct(&self, name: &str, values: Values) -> RecordResult<Record> {
        self.lookup(name)?.construct(values)
    }

    /// Constructs a record of the named type from a JSON object.
    pub fn construct_json(&self, name: &str, document: &JsonValue) -> RecordResult<Record> {
        self.lookup(name)?.construct_json(document)
    }

    fn lookup(&self, name: &str) -> RecordResult<&Arc<RecordType>> {
        self.types.get(name).ok_or_else(|| RecordError::UnknownType {
            type_name: name.to_string(),
        })
    }
}
