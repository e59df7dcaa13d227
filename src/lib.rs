//! recordkit - Declarative, strictly validated, immutable record types
//!
//! - [`record`]: type declaration, validating construction, read-only access, rendering
//! - [`observability`]: JSON line logging and counters
//! - [`config`]: environment-backed settings

pub mod config;
pub mod observability;
pub mod record;

pub use record::{
    FieldDescriptor, FieldType, Precondition, Record, RecordError, RecordResult, RecordType,
    Values,
};
