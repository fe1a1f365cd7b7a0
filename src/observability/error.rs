//! Error types for logger setup.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while applying the process-wide logging setup.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The configured log file (or its directory) could not be opened.
    #[error("failed to open log file {}: {source}", .path.display())]
    LogFile {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

impl LoggingError {
    /// Create a LogFile error for the given path.
    pub fn log_file(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::LogFile {
            path: path.into(),
            source,
        }
    }
}
