//! Logger handles and the once-only process-wide setup.

use crate::observability::error::LoggingError;
use crate::observability::format::build_subscriber;
use crate::observability::level::Severity;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use tracing::Subscriber;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

/// Name reported for handles created without one.
pub const ROOT_LOGGER: &str = "root";

/// Outcome of the first setup: the applied settings, or `None` when a host
/// subscriber was already installed and kept.
static CONFIGURED: OnceLock<Option<LogSettings>> = OnceLock::new();

/// Process-wide logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Minimum severity that is written.
    pub level: Severity,
    /// Append lines to this file instead of stderr.
    pub log_file: Option<PathBuf>,
    /// Let `RUST_LOG` override `level` when it is set. Off by default.
    pub honor_rust_log: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: Severity::Info,
            log_file: None,
            honor_rust_log: false,
        }
    }
}

impl LogSettings {
    /// Settings with the given threshold and defaults otherwise.
    pub fn with_level(level: impl Into<Severity>) -> Self {
        Self {
            level: level.into(),
            ..Self::default()
        }
    }

    pub(crate) fn env_filter(&self) -> EnvFilter {
        let configured = || EnvFilter::new(self.level.directive());
        if self.honor_rust_log {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| configured())
        } else {
            configured()
        }
    }

    pub(crate) fn make_writer(&self) -> Result<BoxMakeWriter, LoggingError> {
        let Some(path) = &self.log_file else {
            return Ok(BoxMakeWriter::new(std::io::stderr));
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| LoggingError::log_file(path, e))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| LoggingError::log_file(path, e))?;

        Ok(BoxMakeWriter::new(Mutex::new(file)))
    }
}

/// Apply the process-wide logging setup.
///
/// Only the first successful call has any effect; it returns `Ok(true)`.
/// Every later call returns `Ok(false)` and leaves the existing setup alone.
/// If the host application already installed a global `tracing` subscriber,
/// that subscriber is kept, the call returns `Ok(false)` and
/// [`configured_settings`] stays `None`.
///
/// # Errors
///
/// Returns an error if the configured log file cannot be opened. Nothing is
/// applied in that case, so a later call may still succeed.
pub fn init_logging(settings: &LogSettings) -> Result<bool, LoggingError> {
    if CONFIGURED.get().is_some() {
        return Ok(false);
    }

    let writer = settings.make_writer()?;
    let mut applied = false;
    CONFIGURED.get_or_init(|| {
        applied = install(build_subscriber(settings.env_filter(), writer));
        applied.then(|| settings.clone())
    });

    Ok(applied)
}

/// Settings in effect from the first [`init_logging`] call.
///
/// `None` before any setup, and when a host subscriber was kept instead.
pub fn configured_settings() -> Option<&'static LogSettings> {
    CONFIGURED.get().and_then(Option::as_ref)
}

/// Install `subscriber` globally; `false` if another one was already set.
fn install<S>(subscriber: S) -> bool
where
    S: Subscriber + Send + Sync + 'static,
{
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::debug!("global subscriber already installed; keeping it");
        return false;
    }
    true
}

/// Apply `settings`, falling back to stderr output if the log file is unusable.
fn ensure_configured(settings: &LogSettings) {
    if let Err(e) = init_logging(settings) {
        eprintln!("Warning: {}; logging to stderr instead", e);
        let fallback = LogSettings {
            log_file: None,
            ..settings.clone()
        };
        // stderr output cannot fail to open
        let _ = init_logging(&fallback);
    }
}

/// Handle through which lines are emitted.
///
/// A handle is only a name; lines go to whichever `tracing` subscriber is
/// active. Handles obtained from [`get_logger`] or a [`LoggerProvider`]
/// guarantee the process-wide setup has been applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Logger {
    name: Option<String>,
}

impl Logger {
    /// Create a raw handle without touching the global setup.
    pub fn new(name: Option<&str>) -> Self {
        Self {
            name: name.map(str::to_string),
        }
    }

    /// Handle name, `root` when unnamed.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(ROOT_LOGGER)
    }

    /// Emit `message` at `level`.
    pub fn log(&self, level: Severity, message: &str) {
        let name = self.name();
        match level {
            Severity::Debug => tracing::debug!(logger = name, "{}", message),
            Severity::Info => tracing::info!(logger = name, "{}", message),
            Severity::Warn => tracing::warn!(logger = name, "{}", message),
            Severity::Error => tracing::error!(logger = name, "{}", message),
        }
    }

    /// Emit a debug line.
    pub fn debug(&self, message: &str) {
        self.log(Severity::Debug, message);
    }

    /// Emit an info line.
    pub fn info(&self, message: &str) {
        self.log(Severity::Info, message);
    }

    /// Emit a warning line.
    pub fn warn(&self, message: &str) {
        self.log(Severity::Warn, message);
    }

    /// Emit an error line.
    pub fn error(&self, message: &str) {
        self.log(Severity::Error, message);
    }

    /// Report a failure raised by instrumented code, at error level.
    pub fn exception(&self, message: &str) {
        self.error(message);
    }
}

/// Hands out named loggers after applying the process-wide setup.
///
/// Constructing a provider applies its settings if no setup has been applied
/// yet; otherwise the existing setup is kept.
#[derive(Debug, Clone)]
pub struct LoggerProvider {
    settings: LogSettings,
}

impl LoggerProvider {
    /// Provider with the default settings (INFO, stderr).
    pub fn new() -> Self {
        Self::with_settings(LogSettings::default())
    }

    /// Provider that applies `settings` if it is the first to configure.
    pub fn with_settings(settings: LogSettings) -> Self {
        ensure_configured(&settings);
        Self { settings }
    }

    /// Get a handle with the given name.
    pub fn get_logger(&self, name: Option<&str>) -> Logger {
        ensure_configured(&self.settings);
        Logger::new(name)
    }

    /// Settings this provider was created with.
    ///
    /// These are only in effect if this provider was the first to configure;
    /// see [`configured_settings`].
    pub fn settings(&self) -> &LogSettings {
        &self.settings
    }
}

impl Default for LoggerProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Get a logger from the default provider.
pub fn get_logger(name: Option<&str>) -> Logger {
    LoggerProvider::new().get_logger(name)
}

/// The unnamed logger from the default provider.
pub fn default_logger() -> Logger {
    get_logger(None)
}

/// Where an instrumented call gets its logger from.
#[derive(Debug, Clone, Default)]
pub enum LoggerSource {
    /// The process-wide default logger.
    #[default]
    Default,
    /// A specific handle, used as is.
    Handle(Logger),
    /// A provider; the logger is named after the instrumented function.
    Provider(LoggerProvider),
}

impl LoggerSource {
    /// Resolve the logger for a call to `function`.
    pub fn resolve(&self, function: &str) -> Logger {
        match self {
            LoggerSource::Default => default_logger(),
            LoggerSource::Handle(logger) => logger.clone(),
            LoggerSource::Provider(provider) => provider.get_logger(Some(function)),
        }
    }
}

impl From<Logger> for LoggerSource {
    fn from(logger: Logger) -> Self {
        LoggerSource::Handle(logger)
    }
}

impl From<LoggerProvider> for LoggerSource {
    fn from(provider: LoggerProvider) -> Self {
        LoggerSource::Provider(provider)
    }
}

impl From<&LoggerProvider> for LoggerSource {
    fn from(provider: &LoggerProvider) -> Self {
        LoggerSource::Provider(provider.clone())
    }
}
