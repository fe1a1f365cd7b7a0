//! Error types for the decorators module.

use thiserror::Error;

/// Outcome of a none-guard inspection that did not produce a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuardError {
    /// The guarded function returned `None`.
    #[error("'{function}(...)' returned None (exit code {code})")]
    NoneReturned {
        /// Name of the guarded function.
        function: String,
        /// Status the process exits with.
        code: i32,
    },
}

impl GuardError {
    /// Create a NoneReturned error for the given function.
    pub fn none_returned(function: impl Into<String>, code: i32) -> Self {
        Self::NoneReturned {
            function: function.into(),
            code,
        }
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            GuardError::NoneReturned { code, .. } => *code,
        }
    }
}
