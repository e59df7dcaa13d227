//! Record error types
//!
//! Error kinds:
//! - Argument: extra, missing or unreadable arguments
//! - TypeMismatch: value type differs from the declared field type
//! - PreconditionViolation: value rejected by the field predicate
//! - ImmutableField: write attempt after construction
//! - Declaration: malformed record type declaration
//! - Registry: unknown or duplicate registered type
//!
//! Every fault is returned to the caller. Nothing is recovered internally.

use std::fmt;

use thiserror::Error;

/// Coarse classification of a [`RecordError`], for branching without string matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Extra, missing or unusable construction argument
    Argument,
    /// Supplied value's exact type differs from the declared type
    TypeMismatch,
    /// Supplied value failed the field precondition
    PreconditionViolation,
    /// Write attempted on a constructed record
    ImmutableField,
    /// Record type declaration rejected
    Declaration,
    /// Type registry lookup or insert rejected
    Registry,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Argument => "ARGUMENT",
            ErrorKind::TypeMismatch => "TYPE_MISMATCH",
            ErrorKind::PreconditionViolation => "PRECONDITION_VIOLATION",
            ErrorKind::ImmutableField => "IMMUTABLE_FIELD",
            ErrorKind::Declaration => "DECLARATION",
            ErrorKind::Registry => "REGISTRY",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Record errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("{type_name}: '{field}' is an extra argument")]
    ExtraArgument { type_name: String, field: String },

    #[error("{type_name}: '{field}' is missing")]
    MissingArgument { type_name: String, field: String },

    #[error("field '{field}': expected {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("field '{field}': value {value} does not satisfy the precondition")]
    PreconditionViolation { field: String, value: String },

    #[error("field '{field}' is read only and cannot be set")]
    ImmutableField { field: String },

    #[error("{type_name} has no field '{field}'")]
    UnknownField { type_name: String, field: String },

    #[error("field '{field}': unsupported value of kind {kind}")]
    UnsupportedValue { field: String, kind: &'static str },

    #[error("invalid declaration of '{type_name}': {reason}")]
    InvalidDeclaration { type_name: String, reason: String },

    #[error("{type_name} declares field '{field}' more than once")]
    DuplicateField { type_name: String, field: String },

    #[error("cannot linearize the bases of '{type_name}'")]
    InconsistentHierarchy { type_name: String },

    #[error("record type '{type_name}' not found")]
    UnknownType { type_name: String },

    #[error("record type '{type_name}' is already registered")]
    TypeAlreadyRegistered { type_name: String },
}

impl RecordError {
    /// Returns the error kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            RecordError::ExtraArgument { .. }
            | RecordError::MissingArgument { .. }
            | RecordError::UnknownField { .. }
            | RecordError::UnsupportedValue { .. } => ErrorKind::Argument,
            RecordError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            RecordError::PreconditionViolation { .. } => ErrorKind::PreconditionViolation,
            RecordError::ImmutableField { .. } => ErrorKind::ImmutableField,
            RecordError::InvalidDeclaration { .. }
            | RecordError::DuplicateField { .. }
            | RecordError::InconsistentHierarchy { .. } => ErrorKind::Declaration,
            RecordError::UnknownType { .. } | RecordError::TypeAlreadyRegistered { .. } => {
                ErrorKind::Registry
            }
        }
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            RecordError::ExtraArgument { .. } => "RECORD_EXTRA_ARGUMENT",
            RecordError::MissingArgument { .. } => "RECORD_MISSING_ARGUMENT",
            RecordError::TypeMismatch { .. } => "RECORD_TYPE_MISMATCH",
            RecordError::PreconditionViolation { .. } => "RECORD_PRECONDITION_VIOLATION",
            RecordError::ImmutableField { .. } => "RECORD_IMMUTABLE_FIELD",
            RecordError::UnknownField { .. } => "RECORD_UNKNOWN_FIELD",
            RecordError::UnsupportedValue { .. } => "RECORD_UNSUPPORTED_VALUE",
            RecordError::InvalidDeclaration { .. } => "RECORD_INVALID_DECLARATION",
            RecordError::DuplicateField { .. } => "RECORD_DUPLICATE_FIELD",
            RecordError::InconsistentHierarchy { .. } => "RECORD_INCONSISTENT_HIERARCHY",
            RecordError::UnknownType { .. } => "RECORD_UNKNOWN_TYPE",
            RecordError::TypeAlreadyRegistered { .. } => "RECORD_TYPE_ALREADY_REGISTERED",
        }
    }

    /// Returns the offending field name, if the error concerns one
    pub fn field(&self) -> Option<&str> {
        match self {
            RecordError::ExtraArgument { field, .. }
            | RecordError::MissingArgument { field, .. }
            | RecordError::TypeMismatch { field, .. }
            | RecordError::PreconditionViolation { field, .. }
            | RecordError::ImmutableField { field }
            | RecordError::UnknownField { field, .. }
            | RecordError::UnsupportedValue { field, .. }
            | RecordError::DuplicateField { field, .. } => Some(field),
            _ => None,
        }
    }

    pub(crate) fn extra_argument(type_name: &str, field: &str) -> Self {
        RecordError::ExtraArgument {
            type_name: type_name.to_string(),
            field: field.to_string(),
        }
    }

    pub(crate) fn missing_argument(type_name: &str, field: &str) -> Self {
        RecordError::MissingArgument {
            type_name: type_name.to_string(),
            field: field.to_string(),
        }
    }

    pub(crate) fn invalid_declaration(type_name: &str, reason: impl Into<String>) -> Self {
        RecordError::InvalidDeclaration {
            type_name: type_name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for record operations
pub type RecordResult<T> = Result<T, RecordError>;
