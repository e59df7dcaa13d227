//! Observable record subsystem events

use std::fmt;

use super::Severity;

/// Lifecycle events emitted by the record subsystem.
///
/// Construction faults are returned to the caller and counted, never logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A record type's schema was built
    TypeDeclared,
    /// A record type was added to a registry
    TypeRegistered,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::TypeDeclared => "TYPE_DECLARED",
            Event::TypeRegistered => "TYPE_REGISTERED",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Event::TypeDeclared | Event::TypeRegistered => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
