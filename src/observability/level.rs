//! Severity levels for call-log lines.

use std::fmt;

/// Severity at which a line is emitted.
///
/// Parsing is lenient: anything that is not a recognized level name falls
/// back to [`Severity::Info`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Severity {
    /// Debugging information
    Debug,
    /// General information
    #[default]
    Info,
    /// Warning messages
    Warn,
    /// Error messages
    Error,
}

impl Severity {
    /// Parse a level name, falling back to `Info` for unrecognized input.
    ///
    /// Accepts the names case-insensitively, plus `WARNING` and the numeric
    /// values conventionally used for these levels (10, 20, 30, 40).
    pub fn parse(level: &str) -> Self {
        match level.trim().to_lowercase().as_str() {
            "debug" | "10" => Severity::Debug,
            "info" | "20" => Severity::Info,
            "warn" | "warning" | "30" => Severity::Warn,
            "error" | "40" => Severity::Error,
            _ => Severity::Info,
        }
    }

    /// The `tracing` level this severity is emitted at.
    pub fn as_tracing(self) -> tracing::Level {
        match self {
            Severity::Debug => tracing::Level::DEBUG,
            Severity::Info => tracing::Level::INFO,
            Severity::Warn => tracing::Level::WARN,
            Severity::Error => tracing::Level::ERROR,
        }
    }

    /// Filter directive enabling this severity and everything above it.
    pub fn directive(self) -> &'static str {
        match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
        }
    }
}

impl From<&str> for Severity {
    fn from(level: &str) -> Self {
        Severity::parse(level)
    }
}

impl From<tracing::Level> for Severity {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE | tracing::Level::DEBUG => Severity::Debug,
            tracing::Level::INFO => Severity::Info,
            tracing::Level::WARN => Severity::Warn,
            tracing::Level::ERROR => Severity::Error,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(level_name(&self.as_tracing()))
    }
}

/// Upper-case level name as it appears in a formatted line.
pub(crate) fn level_name(level: &tracing::Level) -> &'static str {
    match *level {
        tracing::Level::TRACE => "TRACE",
        tracing::Level::DEBUG => "DEBUG",
        tracing::Level::INFO => "INFO",
        tracing::Level::WARN => "WARNING",
        tracing::Level::ERROR => "ERROR",
    }
}
