//! Supplied construction arguments
//!
//! `Values` keeps arguments in insertion order so that an extra argument is
//! reported as the caller wrote it. Keys are unique: inserting an existing key
//! replaces its value in place.

use std::collections::HashMap;

use serde_json::Value as JsonValue;

use super::errors::{RecordError, RecordResult};
use super::types::Value;

/// Ordered name -> value map passed to a record constructor
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Values {
    entries: Vec<(String, Value)>,
    index: HashMap<String, usize>,
}

impl Values {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Inserts `value`, returning the value it replaced.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let name = name.into();
        let value = value.into();
        match self.index.get(&name) {
            Some(&i) => Some(std::mem::replace(&mut self.entries[i].1, value)),
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, value));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.index.get(name).map(|&i| &self.entries[i].1)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Argument names in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Converts a JSON object into arguments.
    ///
    /// Strings map to `str`, integers that fit in i64 to `int`, other numbers
    /// to `float`, booleans to `bool`. No other JSON kind is accepted.
    /// Keys are taken in the JSON map's iteration order (sorted by name).
    pub fn from_json(document: &JsonValue) -> RecordResult<Self> {
        let object = document.as_object().ok_or_else(|| RecordError::UnsupportedValue {
            field: "$root".to_string(),
            kind: json_kind(document),
        })?;

        let mut values = Values::new();
        for (key, raw) in object {
            let value = match raw {
                JsonValue::String(s) => Value::Str(s.clone()),
                JsonValue::Bool(b) => Value::Bool(*b),
                JsonValue::Number(n) => {
                    if let Some(i) = n.as_i64() {
                        Value::Int(i)
                    } else if n.is_f64() {
                        match n.as_f64() {
                            Some(x) => Value::Float(x),
                            None => return Err(unsupported(key, raw)),
                        }
                    } else {
                        // u64 beyond i64::MAX
                        return Err(unsupported(key, raw));
                    }
                }
                _ => return Err(unsupported(key, raw)),
            };
            values.insert(key.as_str(), value);
        }
        Ok(values)
    }

    pub(crate) fn into_map(self) -> HashMap<String, Value> {
        self.entries.into_iter().collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Values
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = Values::new();
        for (k, v) in iter {
            values.insert(k, v);
        }
        values
    }
}

fn unsupported(field: &str, raw: &JsonValue) -> RecordError {
    RecordError::UnsupportedValue {
        field: field.to_string(),
        kind: json_kind(raw),
    }
}

/// Returns the JSON kind name for error messages.
fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(n) => {
            if n.is_f64() {
                "float"
            } else {
                "int"
            }
        }
        JsonValue::String(_) => "str",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
