//! Record type declaration
//!
//! A record type is declared once through [`RecordTypeBuilder`]. Building it:
//! 1. Linearizes its bases (C3), giving the ancestor order used for type resolution
//! 2. Folds each direct base's schema in, in `extends` order
//! 3. Folds the type's own fields in, in declaration order
//! 4. Resolves each field's declared type from the ancestor chain
//!
//! Name collisions update the descriptor in place and never move a field.
//!
//! Type resolution scans the type itself, then its ancestors from nearest to
//! most distant, and keeps the *last* type whose own declaration names the
//! field. A base's declared type therefore wins over a redeclaration in a
//! derived type, while the derived label and precondition win over the base's.

use std::fmt;
use std::sync::Arc;

use serde_json::Value as JsonValue;

use super::errors::{RecordError, RecordResult};
use super::instance::Record;
use super::schema::{Schema, SchemaDraft};
use super::types::{FieldDescriptor, FieldType};
use super::validator::RecordValidator;
use super::values::Values;
use crate::observability::{self, Event};

/// A field as written in one type's own declaration
#[derive(Debug, Clone)]
struct OwnField {
    name: String,
    field_type: FieldType,
    descriptor: FieldDescriptor,
}

/// A declared record type and its frozen schema.
pub struct RecordType {
    name: String,
    bases: Vec<Arc<RecordType>>,
    own_fields: Vec<OwnField>,
    /// C3 linearization without the type itself, nearest first
    ancestors: Vec<Arc<RecordType>>,
    schema: Arc<Schema>,
}

impl RecordType {
    pub fn builder(name: impl Into<String>) -> RecordTypeBuilder {
        RecordTypeBuilder {
            name: name.into(),
            bases: Vec::new(),
            fields: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The resolved schema, shared by every record of this type
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Direct bases in declaration order
    pub fn bases(&self) -> &[Arc<RecordType>] {
        &self.bases
    }

    /// Every ancestor, nearest first
    pub fn ancestors(&self) -> &[Arc<RecordType>] {
        &self.ancestors
    }

    /// Names of the fields this type declares itself
    pub fn declared_fields(&self) -> impl Iterator<Item = &str> {
        self.own_fields.iter().map(|f| f.name.as_str())
    }

    /// Type this type's own declaration gives `field`, if it declares it.
    pub fn declared_type(&self, field: &str) -> Option<FieldType> {
        self.own_fields
            .iter()
            .find(|f| f.name == field)
            .map(|f| f.field_type)
    }

    /// True if `other` is this type or one of its ancestors.
    ///
    /// Informational only: construction always requires exact value types.
    pub fn is_subtype_of(&self, other: &RecordType) -> bool {
        std::ptr::eq(self, other)
            || self
                .ancestors
                .iter()
                .any(|a| std::ptr::eq(Arc::as_ptr(a), other))
    }

    /// Validates `values` against the schema and builds a record.
    pub fn construct(self: &Arc<Self>, values: Values) -> RecordResult<Record> {
        RecordValidator::new(self).construct(values)
    }

    /// Same as [`RecordType::construct`], taking arguments from a JSON object.
    pub fn construct_json(self: &Arc<Self>, document: &JsonValue) -> RecordResult<Record> {
        self.construct(Values::from_json(document)?)
    }

    /// This type followed by its ancestors
    fn linearization(self: &Arc<Self>) -> Vec<Arc<RecordType>> {
        let mut mro = Vec::with_capacity(self.ancestors.len() + 1);
        mro.push(Arc::clone(self));
        mro.extend(self.ancestors.iter().cloned());
        mro
    }
}

impl fmt::Debug for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordType")
            .field("name", &self.name)
            .field(
                "bases",
                &self.bases.iter().map(|b| b.name()).collect::<Vec<_>>(),
            )
            .field("fields", &self.schema.field_names().collect::<Vec<_>>())
            .finish()
    }
}

/// Declarative builder for a [`RecordType`]
#[derive(Debug)]
pub struct RecordTypeBuilder {
    name: String,
    bases: Vec<Arc<RecordType>>,
    fields: Vec<OwnField>,
}

impl RecordTypeBuilder {
    /// Inherit every field of `base`. May be called more than once.
    pub fn extends(mut self, base: &Arc<RecordType>) -> Self {
        self.bases.push(Arc::clone(base));
        self
    }

    pub fn field(
        mut self,
        name: impl Into<String>,
        field_type: FieldType,
        descriptor: FieldDescriptor,
    ) -> Self {
        self.fields.push(OwnField {
            name: name.into(),
            field_type,
            descriptor,
        });
        self
    }

    /// Builds the schema and freezes the type.
    ///
    /// # Errors
    ///
    /// - `InvalidDeclaration` for an empty type or field name
    /// - `DuplicateField` if a field is declared twice in this builder
    /// - `InconsistentHierarchy` if the bases admit no linearization
    pub fn build(self) -> RecordResult<Arc<RecordType>> {
        if self.name.trim().is_empty() {
            return Err(RecordError::invalid_declaration(
                &self.name,
                "type name must not be empty",
            ));
        }

        for (i, field) in self.fields.iter().enumerate() {
            if field.name.trim().is_empty() {
                return Err(RecordError::invalid_declaration(
                    &self.name,
                    format!("field #{} has an empty name", i),
                ));
            }
            if self.fields[..i].iter().any(|f| f.name == field.name) {
                return Err(RecordError::DuplicateField {
                    type_name: self.name.clone(),
                    field: field.name.clone(),
                });
            }
        }

        let ancestors = linearize(&self.name, &self.bases)?;

        let mut draft = SchemaDraft::new();
        for base in &self.bases {
            draft.absorb(base.schema());
        }
        for field in &self.fields {
            draft.upsert(&field.name, field.descriptor.clone(), field.field_type);
        }

        let own_fields = self.fields;
        let schema = draft.finish(|name, declared| {
            let own = own_fields.iter().find(|f| f.name == name).map(|f| f.field_type);
            ancestors
                .iter()
                .rev()
                .find_map(|a| a.declared_type(name))
                .or(own)
                .unwrap_or(declared)
        });

        let field_count = schema.len().to_string();
        observability::log_event_with_fields(
            Event::TypeDeclared,
            &[("type", self.name.as_str()), ("fields", field_count.as_str())],
        );
        observability::global_metrics().increment_types_declared();

        Ok(Arc::new(RecordType {
            name: self.name,
            bases: self.bases,
            own_fields,
            ancestors,
            schema: Arc::new(schema),
        }))
    }
}

/// C3 linearization of `bases`, excluding the type being declared.
fn linearize(name: &str, bases: &[Arc<RecordType>]) -> RecordResult<Vec<Arc<RecordType>>> {
    let mut sequences: Vec<Vec<Arc<RecordType>>> =
        bases.iter().map(|b| b.linearization()).collect();
    sequences.push(bases.to_vec());

    let mut result: Vec<Arc<RecordType>> = Vec::new();
    loop {
        sequences.retain(|s| !s.is_empty());
        if sequences.is_empty() {
            return Ok(result);
        }

        // A head is a candidate when it appears in no sequence's tail.
        let next = sequences
            .iter()
            .map(|s| &s[0])
            .find(|head| {
                !sequences
                    .iter()
                    .any(|s| s[1..].iter().any(|t| Arc::ptr_eq(t, head)))
            })
            .cloned();

        let Some(next) = next else {
            return Err(RecordError::InconsistentHierarchy {
                type_name: name.to_string(),
            });
        };

        for s in sequences.iter_mut() {
            if Arc::ptr_eq(&s[0], &next) {
                s.remove(0);
            }
        }
        result.push(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::types::Precondition;

    fn named() -> Arc<RecordType> {
        RecordType::builder("Named")
            .field("name", FieldType::Str, FieldDescriptor::new("The name"))
            .build()
            .unwrap()
    }

    fn names_of(ty: &RecordType) -> Vec<&str> {
        ty.schema().field_names().collect()
    }

    #[test]
    fn test_own_fields_in_declaration_order() {
        let person = RecordType::builder("Person")
            .field("name", FieldType::Str, FieldDescriptor::new("The name"))
            .field("age", FieldType::Int, FieldDescriptor::new("The person's age"))
            .field("income", FieldType::Float, FieldDescriptor::new("The person's income"))
            .build()
            .unwrap();

        assert_eq!(names_of(&person), vec!["name", "age", "income"]);
        assert_eq!(person.schema().get("age").unwrap().field_type, FieldType::Int);
        assert!(person.bases().is_empty());
        assert!(person.ancestors().is_empty());
    }

    #[test]
    fn test_base_fields_come_first() {
        let named = named();
        let animal = RecordType::builder("Animal")
            .extends(&named)
            .field("habitat", FieldType::Str, FieldDescriptor::new("The habitat"))
            .field("weight", FieldType::Float, FieldDescriptor::new("Weight"))
            .build()
            .unwrap();
        let dog = RecordType::builder("Dog")
            .extends(&animal)
            .field("bark", FieldType::Str, FieldDescriptor::new("Sound of bark"))
            .build()
            .unwrap();

        assert_eq!(names_of(&dog), vec!["name", "habitat", "weight", "bark"]);
        let ancestors: Vec<_> = dog.ancestors().iter().map(|a| a.name()).collect();
        assert_eq!(ancestors, vec!["Animal", "Named"]);
        assert!(dog.is_subtype_of(&named));
        assert!(dog.is_subtype_of(&dog));
        assert!(!named.is_subtype_of(&dog));
        assert_eq!(dog.declared_fields().collect::<Vec<_>>(), vec!["bark"]);
    }

    #[test]
    fn test_redeclared_field_keeps_position_takes_descriptor() {
        let named = named();
        let titled = RecordType::builder("Titled")
            .extends(&named)
            .field("title", FieldType::Str, FieldDescriptor::default())
            .field(
                "name",
                FieldType::Str,
                FieldDescriptor::new("Full name")
                    .with_precondition(Precondition::str(|s| !s.is_empty())),
            )
            .build()
            .unwrap();

        assert_eq!(names_of(&titled), vec!["name", "title"]);
        let name = titled.schema().get("name").unwrap();
        assert_eq!(name.label(), "Full name");
        assert!(name.descriptor.precondition.is_some());
        // Base schema is untouched.
        assert_eq!(named.schema().get("name").unwrap().label(), "The name");
    }

    #[test]
    fn test_most_distant_declared_type_wins() {
        let base = RecordType::builder("Base")
            .field("weight", FieldType::Float, FieldDescriptor::new("Weight"))
            .build()
            .unwrap();
        let derived = RecordType::builder("Derived")
            .extends(&base)
            .field("weight", FieldType::Int, FieldDescriptor::new("Weight (whole kg)"))
            .build()
            .unwrap();

        let weight = derived.schema().get("weight").unwrap();
        assert_eq!(weight.field_type, FieldType::Float);
        assert_eq!(weight.label(), "Weight (whole kg)");
        assert_eq!(derived.declared_type("weight"), Some(FieldType::Int));
    }

    #[test]
    fn test_multiple_bases_merge_in_order() {
        let named = named();
        let left = RecordType::builder("Left")
            .extends(&named)
            .field("left", FieldType::Int, FieldDescriptor::default())
            .build()
            .unwrap();
        let right = RecordType::builder("Right")
            .extends(&named)
            .field("right", FieldType::Bool, FieldDescriptor::default())
            .build()
            .unwrap();
        let both = RecordType::builder("Both")
            .extends(&left)
            .extends(&right)
            .field("own", FieldType::Str, FieldDescriptor::default())
            .build()
            .unwrap();

        assert_eq!(names_of(&both), vec!["name", "left", "right", "own"]);
        let ancestors: Vec<_> = both.ancestors().iter().map(|a| a.name()).collect();
        assert_eq!(ancestors, vec!["Left", "Right", "Named"]);
    }

    #[test]
    fn test_inconsistent_hierarchy_rejected() {
        let named = named();
        let animal = RecordType::builder("Animal").extends(&named).build().unwrap();

        // Named before its own subtype cannot be linearized.
        let err = RecordType::builder("Broken")
            .extends(&named)
            .extends(&animal)
            .build()
            .unwrap_err();
        assert_eq!(err.code(), "RECORD_INCONSISTENT_HIERARCHY");

        let err = RecordType::builder("Twice")
            .extends(&named)
            .extends(&named)
            .build()
            .unwrap_err();
        assert_eq!(err.code(), "RECORD_INCONSISTENT_HIERARCHY");
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let err = RecordType::builder("Person")
            .field("age", FieldType::Int, FieldDescriptor::default())
            .field("age", FieldType::Int, FieldDescriptor::default())
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            RecordError::DuplicateField {
                type_name: "Person".into(),
                field: "age".into(),
            }
        );
    }

    #[test]
    fn test_empty_names_rejected() {
        let err = RecordType::builder("  ").build().unwrap_err();
        assert_eq!(err.code(), "RECORD_INVALID_DECLARATION");

        let err = RecordType::builder("Person")
            .field("", FieldType::Int, FieldDescriptor::default())
            .build()
            .unwrap_err();
        assert_eq!(err.code(), "RECORD_INVALID_DECLARATION");
    }

    #[test]
    fn test_empty_type_is_allowed() {
        let marker = RecordType::builder("Marker").build().unwrap();
        assert!(marker.schema().is_empty());
    }
}
