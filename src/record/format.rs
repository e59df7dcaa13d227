//! Canonical record rendering
//!
//! ```text
//! Person(
//!   # The name
//!   name="JAMES"
//!
//!   # The person's age
//!   age=34
//! )
//! ```
//!
//! Fields follow schema order. A blank line separates field blocks, with none
//! after the last. Output is a pure function of the record.

use super::instance::Record;

/// Renders `record` in canonical form.
pub fn render(record: &Record) -> String {
    let mut out = String::with_capacity(32 + record.schema().len() * 48);
    out.push_str(record.type_name());
    out.push_str("(\n");

    for (i, (field, value)) in record.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str("  # ");
        out.push_str(field.label());
        out.push('\n');
        out.push_str("  ");
        out.push_str(&field.name);
        out.push('=');
        out.push_str(&value.repr());
        out.push('\n');
    }

    out.push(')');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::declare::RecordType;
    use crate::record::types::{FieldDescriptor, FieldType};
    use crate::record::values::Values;

    #[test]
    fn test_render_person() {
        let person = RecordType::builder("Person")
            .field("name", FieldType::Str, FieldDescriptor::new("The name"))
            .field("age", FieldType::Int, FieldDescriptor::new("The person's age"))
            .field("income", FieldType::Float, FieldDescriptor::new("The person's income"))
            .build()
            .unwrap();
        let james = person
            .construct(
                Values::new()
                    .with("name", "JAMES")
                    .with("age", 34)
                    .with("income", 24000.0),
            )
            .unwrap();

        let expected = "Person(\n  # The name\n  name=\"JAMES\"\n\n  # The person's age\n  age=34\n\n  # The person's income\n  income=24000.0\n)";
        assert_eq!(render(&james), expected);
        assert_eq!(james.to_string(), expected);
    }

    #[test]
    fn test_empty_label_shows_field_name() {
        let flag = RecordType::builder("Flag")
            .field("on", FieldType::Bool, FieldDescriptor::default())
            .build()
            .unwrap();
        let record = flag.construct(Values::new().with("on", true)).unwrap();
        assert_eq!(render(&record), "Flag(\n  # on\n  on=true\n)");
    }

    #[test]
    fn test_render_empty_record() {
        let marker = RecordType::builder("Marker").build().unwrap();
        let record = marker.construct(Values::new()).unwrap();
        assert_eq!(render(&record), "Marker(\n)");
    }
}
