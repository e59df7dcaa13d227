//! Observability for the record subsystem
//!
//! - Structured JSON line logging, filtered by [`crate::config`]
//! - Lifecycle events for type declaration and registration
//! - Atomic counters for constructions and rejected writes
//!
//! Observability is read-only: it never changes the outcome of an operation.

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};

use std::sync::OnceLock;

use crate::config;

static GLOBAL_METRICS: OnceLock<MetricsRegistry> = OnceLock::new();

/// Process-wide counters updated by the record subsystem
pub fn global_metrics() -> &'static MetricsRegistry {
    GLOBAL_METRICS.get_or_init(MetricsRegistry::new)
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    if !config::current().log_declarations {
        return;
    }
    Logger::log(event.severity(), event.as_str(), fields);
}

/// Log a lifecycle event
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}
