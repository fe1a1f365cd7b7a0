//! Logger provider for instrumented code.
//!
//! Lines are emitted through `tracing` and rendered by a subscriber that is
//! installed once per process, the first time a logger is requested:
//!
//! ```text
//! [2024-05-01 09:30:12] INFO     message
//! ```
//!
//! # Example
//!
//! ```no_run
//! use call_log::observability::{get_logger, LoggerProvider, LogSettings, Severity};
//!
//! // First request applies the default setup (INFO, stderr)
//! let logger = get_logger(Some("ingest"));
//! logger.info("starting");
//!
//! // Later providers reuse that setup; their own settings are ignored
//! let provider = LoggerProvider::with_settings(LogSettings::with_level(Severity::Debug));
//! provider.get_logger(Some("ingest")).debug("not shown, threshold is still INFO");
//! ```

pub mod error;
pub mod format;
pub mod level;
pub mod logger;

// Re-export main types for convenience
pub use error::LoggingError;
pub use format::{build_subscriber, LineFormat, MemoryWriter, TIMESTAMP_FORMAT};
pub use level::Severity;
pub use logger::{
    configured_settings, default_logger, get_logger, init_logging, LogSettings, Logger,
    LoggerProvider, LoggerSource, ROOT_LOGGER,
};
