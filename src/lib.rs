//! call-log - call-logging wrappers and a once-configured process-wide logger
//!
//! call-log provides a set of feature-gated modules for instrumenting
//! function calls:
//!
//! - **`observability`** - Logger provider with a fixed timestamped line format
//! - **`decorators`** - Call-logging and none-guard wrappers
//! - **`config`** - TOML and environment configuration
//!
//! # Features
//!
//! Enable the features you need in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! call-log = { version = "0.1", features = ["decorators"] }
//! # Or enable everything:
//! call-log = { version = "0.1", features = ["all"] }
//! ```
//!
//! # Example: Logging a call
//!
//! ```ignore
//! use call_log::prelude::*;
//! use call_log::signature;
//!
//! let add = CallLog::new()
//!     .description("adding")
//!     .wrap(signature!(add(a, b)), |(a, b): (i32, i32)| a + b);
//!
//! // [2024-05-01 09:30:12] INFO     adding: add(a=1, b=2)
//! // [2024-05-01 09:30:12] INFO     adding: add(a=1, b=2) completed successfully!
//! assert_eq!(add.call((1, 2)), 3);
//! ```
//!
//! # Example: Using the config feature
//!
//! ```ignore
//! use call_log::config::ConfigurationLoader;
//! use std::path::Path;
//!
//! let loader = ConfigurationLoader::new(Some(Path::new("config/call_log.toml"))).unwrap();
//! loader.init_logging().unwrap();
//!
//! let fetch = loader.exit_on_none().wrap(signature!(fetch(id)), |(id,): (u32,)| Some(id));
//! ```

#![warn(missing_docs)]

/// Configuration management (enabled with the `config` feature)
#[cfg(feature = "config")]
pub mod config;

/// Logger provider (enabled with the `observability` feature)
#[cfg(feature = "observability")]
pub mod observability;

/// Call-logging and none-guard wrappers (enabled with the `decorators` feature)
#[cfg(feature = "decorators")]
pub mod decorators;

/// Prelude module for convenient imports
pub mod prelude {
    #[cfg(feature = "config")]
    pub use crate::config::{Configuration, ConfigurationLoader, EnvironmentLoader};

    #[cfg(feature = "observability")]
    pub use crate::observability::{
        default_logger, get_logger, LogSettings, Logger, LoggerProvider, LoggerSource, Severity,
    };

    #[cfg(feature = "decorators")]
    pub use crate::decorators::{
        exit_on_none, CallLog, ExitOnNone, FnSignature, Kwargs, NONE_EXIT_CODE,
    };
}
