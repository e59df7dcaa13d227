//! Record subsystem counters
//!
//! - Counters only, monotonic
//! - Thread-safe, `Relaxed` atomics
//! - Construction may run on many threads at once

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for declarations, constructions and rejected writes
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    types_declared: AtomicU64,
    records_constructed: AtomicU64,
    records_rejected: AtomicU64,
    write_attempts_rejected: AtomicU64,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_types_declared(&self) {
        self.types_declared.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_records_constructed(&self) {
        self.records_constructed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_records_rejected(&self) {
        self.records_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_write_attempts_rejected(&self) {
        self.write_attempts_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            types_declared: self.types_declared.load(Ordering::Relaxed),
            records_constructed: self.records_constructed.load(Ordering::Relaxed),
            records_rejected: self.records_rejected.load(Ordering::Relaxed),
            write_attempts_rejected: self.write_attempts_rejected.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of all counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub types_declared: u64,
    pub records_constructed: u64,
    pub records_rejected: u64,
    pub write_attempts_rejected: u64,
}
