//! Resolved record schema
//!
//! A schema is the ordered, inheritance-merged field set of one record type.
//! It is built once when the type is declared and never mutated afterward.

use std::collections::HashMap;

use super::types::{FieldDescriptor, FieldType};

/// One resolved field of a schema
#[derive(Debug, Clone)]
pub struct SchemaField {
    pub name: String,
    pub descriptor: FieldDescriptor,
    /// Declared type after ancestor resolution
    pub field_type: FieldType,
}

impl SchemaField {
    /// Label shown by the formatter
    pub fn label(&self) -> &str {
        self.descriptor.display_label(&self.name)
    }
}

/// Ordered mapping from field name to descriptor and declared type
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<SchemaField>,
    index: HashMap<String, usize>,
}

impl Schema {
    /// Fields in schema order
    pub fn fields(&self) -> impl Iterator<Item = &SchemaField> {
        self.fields.iter()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&SchemaField> {
        self.index.get(name).map(|&i| &self.fields[i])
    }

    /// Position of `name` in schema order
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Descriptor set under construction, before field types are resolved.
///
/// Each entry carries the type of the declaration that last touched it; the
/// resolver passed to [`SchemaDraft::finish`] decides the effective type.
#[derive(Debug, Default)]
pub(crate) struct SchemaDraft {
    entries: Vec<(String, FieldDescriptor, FieldType)>,
    index: HashMap<String, usize>,
}

impl SchemaDraft {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends `name`, or replaces its descriptor in place if already present.
    pub(crate) fn upsert(
        &mut self,
        name: &str,
        descriptor: FieldDescriptor,
        field_type: FieldType,
    ) {
        match self.index.get(name) {
            Some(&i) => {
                self.entries[i].1 = descriptor;
                self.entries[i].2 = field_type;
            }
            None => {
                self.index.insert(name.to_string(), self.entries.len());
                self.entries.push((name.to_string(), descriptor, field_type));
            }
        }
    }

    /// Folds every field of an already-built schema into the draft.
    pub(crate) fn absorb(&mut self, schema: &Schema) {
        for field in schema.fields() {
            self.upsert(&field.name, field.descriptor.clone(), field.field_type);
        }
    }

    pub(crate) fn finish<F>(self, mut resolve: F) -> Schema
    where
        F: FnMut(&str, FieldType) -> FieldType,
    {
        let fields: Vec<SchemaField> = self
            .entries
            .into_iter()
            .map(|(name, descriptor, declared)| {
                let field_type = resolve(&name, declared);
                SchemaField {
                    name,
                    descriptor,
                    field_type,
                }
            })
            .collect();

        Schema {
            fields,
            index: self.index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_keeps_first_position() {
        let mut draft = SchemaDraft::new();
        draft.upsert("name", FieldDescriptor::new("The name"), FieldType::Str);
        draft.upsert("weight", FieldDescriptor::new("Weight"), FieldType::Float);
        draft.upsert("name", FieldDescriptor::new("Renamed"), FieldType::Str);

        let schema = draft.finish(|_, declared| declared);
        let names: Vec<_> = schema.field_names().collect();
        assert_eq!(names, vec!["name", "weight"]);
        assert_eq!(schema.get("name").unwrap().label(), "Renamed");
        assert_eq!(schema.position("weight"), Some(1));
        assert_eq!(schema.get("weight").unwrap().field_type, FieldType::Float);
    }

    #[test]
    fn test_absorb_appends_after_existing() {
        let mut base = SchemaDraft::new();
        base.upsert("a", FieldDescriptor::new("A"), FieldType::Int);
        base.upsert("b", FieldDescriptor::new("B"), FieldType::Int);
        let base = base.finish(|_, declared| declared);

        let mut draft = SchemaDraft::new();
        draft.upsert("c", FieldDescriptor::new("C"), FieldType::Int);
        draft.absorb(&base);

        let schema = draft.finish(|_, declared| declared);
        let names: Vec<_> = schema.field_names().collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_finish_resolves_each_field() {
        let mut draft = SchemaDraft::new();
        draft.upsert("age", FieldDescriptor::default(), FieldType::Str);
        draft.upsert("income", FieldDescriptor::default(), FieldType::Str);

        let schema = draft.finish(|name, declared| match name {
            "age" => FieldType::Int,
            "income" => FieldType::Float,
            _ => declared,
        });
        assert_eq!(schema.get("age").unwrap().field_type, FieldType::Int);
        assert_eq!(schema.get("income").unwrap().field_type, FieldType::Float);
        assert_eq!(schema.get("age").unwrap().label(), "age");
        assert!(schema.get("wealth").is_none());
        assert_eq!(schema.len(), 2);
    }
}
