//! Record value and field declaration types
//!
//! Supported field types:
//! - str: UTF-8 string
//! - int: 64-bit signed integer
//! - float: 64-bit floating point
//! - bool: Boolean
//!
//! Type matching is exact. An int never satisfies a float field and vice versa.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Declared type of a record field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// UTF-8 string
    Str,
    /// 64-bit signed integer
    Int,
    /// 64-bit floating point
    Float,
    /// Boolean
    Bool,
}

impl FieldType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::Str => "str",
            FieldType::Int => "int",
            FieldType::Float => "float",
            FieldType::Bool => "bool",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// A field value supplied at construction
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Value {
    /// Returns the exact runtime type of this value
    pub fn field_type(&self) -> FieldType {
        match self {
            Value::Str(_) => FieldType::Str,
            Value::Int(_) => FieldType::Int,
            Value::Float(_) => FieldType::Float,
            Value::Bool(_) => FieldType::Bool,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Renders the value as a Rust literal: `"JAMES"`, `34`, `24000.0`, `true`.
    pub fn repr(&self) -> String {
        match self {
            Value::Str(s) => format!("{:?}", s),
            Value::Int(i) => i.to_string(),
            Value::Float(x) => format!("{:?}", x),
            Value::Bool(b) => b.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// Predicate a field value must satisfy at construction.
///
/// Evaluated once, on the exact supplied value, after the type check passed.
#[derive(Clone)]
pub struct Precondition(Arc<dyn Fn(&Value) -> bool + Send + Sync>);

impl Precondition {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(predicate))
    }

    /// Predicate over int values; any other value fails it.
    pub fn int<F>(predicate: F) -> Self
    where
        F: Fn(i64) -> bool + Send + Sync + 'static,
    {
        Self::new(move |v| v.as_int().map_or(false, &predicate))
    }

    /// Predicate over float values; any other value fails it.
    pub fn float<F>(predicate: F) -> Self
    where
        F: Fn(f64) -> bool + Send + Sync + 'static,
    {
        Self::new(move |v| v.as_float().map_or(false, &predicate))
    }

    /// Predicate over str values; any other value fails it.
    pub fn str<F>(predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self::new(move |v| v.as_str().map_or(false, &predicate))
    }

    /// Predicate over bool values; any other value fails it.
    pub fn bool<F>(predicate: F) -> Self
    where
        F: Fn(bool) -> bool + Send + Sync + 'static,
    {
        Self::new(move |v| v.as_bool().map_or(false, &predicate))
    }

    pub fn check(&self, value: &Value) -> bool {
        (self.0)(value)
    }
}

impl fmt::Debug for Precondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Precondition(..)")
    }
}

/// Label and optional precondition of one field
#[derive(Debug, Clone, Default)]
pub struct FieldDescriptor {
    /// Display label; the field name is shown when empty
    pub label: String,
    pub precondition: Option<Precondition>,
}

impl FieldDescriptor {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            precondition: None,
        }
    }

    pub fn with_precondition(mut self, precondition: Precondition) -> Self {
        self.precondition = Some(precondition);
        self
    }

    /// Returns the label, or `field_name` when no label was given
    pub fn display_label<'a>(&'a self, field_name: &'a str) -> &'a str {
        if self.label.is_empty() {
            field_name
        } else {
            &self.label
        }
    }

    /// Returns true if there is no precondition or `value` satisfies it
    pub fn accepts(&self, value: &Value) -> bool {
        self.precondition.as_ref().map_or(true, |p| p.check(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_type_names() {
        assert_eq!(FieldType::Str.type_name(), "str");
        assert_eq!(FieldType::Int.type_name(), "int");
        assert_eq!(FieldType::Float.type_name(), "float");
        assert_eq!(FieldType::Bool.type_name(), "bool");
    }

    #[test]
    fn test_field_type_serde_names() {
        assert_eq!(serde_json::to_string(&FieldType::Float).unwrap(), "\"float\"");
        let parsed: FieldType = serde_json::from_str("\"str\"").unwrap();
        assert_eq!(parsed, FieldType::Str);
    }

    #[test]
    fn test_value_types_are_exact() {
        assert_eq!(Value::from(34).field_type(), FieldType::Int);
        assert_eq!(Value::from(34.0).field_type(), FieldType::Float);
        assert_eq!(Value::from("34").field_type(), FieldType::Str);
        assert_eq!(Value::from(true).field_type(), FieldType::Bool);
        assert_eq!(Value::from(34).as_float(), None);
    }

    #[test]
    fn test_repr() {
        assert_eq!(Value::from("JAMES").repr(), "\"JAMES\"");
        assert_eq!(Value::from("it's \"x\"").repr(), "\"it's \\\"x\\\"\"");
        assert_eq!(Value::from(34).repr(), "34");
        assert_eq!(Value::from(-1i64).repr(), "-1");
        assert_eq!(Value::from(24000.0).repr(), "24000.0");
        assert_eq!(Value::from(0.5).repr(), "0.5");
        assert_eq!(Value::from(false).repr(), "false");
    }

    #[test]
    fn test_typed_preconditions() {
        let age = Precondition::int(|x| (0..=150).contains(&x));
        assert!(age.check(&Value::Int(150)));
        assert!(!age.check(&Value::Int(151)));
        assert!(!age.check(&Value::Str("150".into())));

        let habitat = Precondition::str(|s| ["air", "land", "water"].contains(&s));
        assert!(habitat.check(&Value::from("land")));
        assert!(!habitat.check(&Value::from("space")));

        let weight = Precondition::float(|x| x >= 0.0);
        assert!(weight.check(&Value::Float(0.0)));
        assert!(!weight.check(&Value::Float(-0.1)));
    }

    #[test]
    fn test_descriptor_label_defaults_to_name() {
        let unlabeled = FieldDescriptor::default();
        assert_eq!(unlabeled.display_label("bark"), "bark");

        let labeled = FieldDescriptor::new("Sound of bark");
        assert_eq!(labeled.display_label("bark"), "Sound of bark");
    }

    #[test]
    fn test_descriptor_without_precondition_accepts_anything() {
        let d = FieldDescriptor::new("x");
        assert!(d.accepts(&Value::Int(-5)));

        let d = d.with_precondition(Precondition::bool(|b| b));
        assert!(d.accepts(&Value::Bool(true)));
        assert!(!d.accepts(&Value::Bool(false)));
    }
}
