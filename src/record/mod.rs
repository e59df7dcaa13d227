//! Record subsystem
//!
//! Declarative record types with validated construction and read-only access.
//!
//! # Design Principles
//!
//! - Schemas are built once per type and shared by every record
//! - Derived types append their fields after their bases' fields
//! - Construction checks extras, then missing fields, then each field's exact
//!   type and precondition; the first fault aborts it
//! - No coercion, no defaults, no partial records
//! - Records are immutable and render deterministically
//!
//! # Usage
//!
//! ```
//! use recordkit::record::{FieldDescriptor, FieldType, Precondition, RecordType, Values};
//!
//! let person = RecordType::builder("Person")
//!     .field("name", FieldType::Str, FieldDescriptor::new("The name"))
//!     .field(
//!         "age",
//!         FieldType::Int,
//!         FieldDescriptor::new("The person's age")
//!             .with_precondition(Precondition::int(|x| (0..=150).contains(&x))),
//!     )
//!     .build()?;
//!
//! let james = person.construct(Values::new().with("name", "JAMES").with("age", 34))?;
//! assert_eq!(james.get_int("age")?, 34);
//! assert!(james.set("age", 35).is_err());
//! # Ok::<(), recordkit::record::RecordError>(())
//! ```

mod declare;
mod errors;
mod format;
mod instance;
mod registry;
mod schema;
mod types;
mod validator;
mod values;

pub use declare::{RecordType, RecordTypeBuilder};
pub use errors::{ErrorKind, RecordError, RecordResult};
pub use format::render;
pub use instance::Record;
pub use registry::TypeRegistry;
pub use schema::{Schema, SchemaField};
pub use types::{FieldDescriptor, FieldType, Precondition, Value};
pub use validator::RecordValidator;
pub use values::Values;
