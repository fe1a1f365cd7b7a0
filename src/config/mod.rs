//! Configuration management for call logging.
//!
//! This module provides configuration loading through TOML files and
//! environment variable overrides via `.env` files.
//!
//! # Example
//!
//! ```no_run
//! use call_log::config::{ConfigurationLoader, EnvironmentLoader};
//! use std::path::Path;
//!
//! let mut loader = ConfigurationLoader::new(Some(Path::new("config/call_log.toml"))).unwrap();
//! EnvironmentLoader::new(Some(Path::new(".env"))).apply(&mut loader.config.logging);
//!
//! println!("Log level: {}", loader.config.logging.log_level);
//! ```

pub mod config;
pub mod environment;

// Re-export main types for convenience
pub use self::config::{
    CallLogConfig, Configuration, ConfigurationLoader, ExitOnNoneConfig, LoggingConfig,
};
pub use self::environment::{EnvironmentLoader, LOG_FILE_VAR, LOG_LEVEL_VAR};
