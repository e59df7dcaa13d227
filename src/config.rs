//! Runtime configuration
//!
//! Read from the environment once and cached for the process lifetime:
//! - `RECORDKIT_LOG_LEVEL`: trace | info | warn | error | fatal (default warn)
//! - `RECORDKIT_LOG_DECLARATIONS`: set to `0` or `false` to silence type declaration events
//!
//! Unknown values fall back to the defaults. An embedding application may
//! install its own config with [`init`] before the first event is logged.

use std::sync::OnceLock;

use crate::observability::Severity;

/// Environment variable selecting the minimum log severity
pub const LOG_LEVEL_ENV: &str = "RECORDKIT_LOG_LEVEL";

/// Environment variable toggling declaration events
pub const LOG_DECLARATIONS_ENV: &str = "RECORDKIT_LOG_DECLARATIONS";

static CURRENT: OnceLock<RecordConfig> = OnceLock::new();

/// Logging configuration for the record subsystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordConfig {
    /// Events below this severity are dropped.
    pub log_level: Severity,
    /// Whether type declaration and registration emit events.
    pub log_declarations: bool,
}

impl Default for RecordConfig {
    fn default() -> Self {
        Self {
            log_level: Severity::Warn,
            log_declarations: true,
        }
    }
}

impl RecordConfig {
    /// Config with every event enabled.
    pub fn verbose() -> Self {
        Self {
            log_level: Severity::Trace,
            log_declarations: true,
        }
    }

    /// Config with logging silenced except for fatal events.
    pub fn quiet() -> Self {
        Self {
            log_level: Severity::Fatal,
            log_declarations: false,
        }
    }

    /// Build config from the process environment.
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var(LOG_LEVEL_ENV).ok().as_deref(),
            std::env::var(LOG_DECLARATIONS_ENV).ok().as_deref(),
        )
    }

    fn from_vars(level: Option<&str>, declarations: Option<&str>) -> Self {
        let defaults = Self::default();
        Self {
            log_level: level
                .and_then(Severity::parse)
                .unwrap_or(defaults.log_level),
            log_declarations: declarations
                .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false"))
                .unwrap_or(defaults.log_declarations),
        }
    }

    /// Returns true if an event of `severity` passes the filter.
    pub fn allows(&self, severity: Severity) -> bool {
        severity >= self.log_level
    }
}

/// Process-wide config, read from the environment on first use.
pub fn current() -> &'static RecordConfig {
    CURRENT.get_or_init(RecordConfig::from_env)
}

/// Installs the process-wide config.
///
/// # Errors
///
/// Returns `config` back if a config is already in effect, either installed
/// earlier or read from the environment by [`current`].
pub fn init(config: RecordConfig) -> Result<(), RecordConfig> {
    CURRENT.set(config)
}
