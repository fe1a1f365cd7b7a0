//! Environment variable loading and management.
//!
//! Environment values override the `[logging]` section of the TOML file.

use crate::config::LoggingConfig;
use std::env;
use std::path::Path;

/// Overrides `logging.log_level`.
pub const LOG_LEVEL_VAR: &str = "CALL_LOG_LEVEL";

/// Overrides `logging.log_file`.
pub const LOG_FILE_VAR: &str = "CALL_LOG_FILE";

/// Loads environment variables from .env file and system environment.
#[derive(Debug, Clone)]
pub struct EnvironmentLoader {
    env_file: Option<String>,
}

impl EnvironmentLoader {
    /// Initialize the environment loader.
    ///
    /// # Arguments
    /// * `env_file` - Path to a .env file to load. Without one, only the
    ///   process environment is consulted.
    pub fn new(env_file: Option<&Path>) -> Self {
        // Only load a .env file if an explicit path was provided, so unit
        // tests never pick up a stray repository .env.
        if let Some(path) = env_file.filter(|p| p.exists()) {
            if let Err(e) = dotenv::from_path(path) {
                eprintln!("Warning: Failed to load .env file: {}", e);
            }
        }

        Self {
            env_file: env_file.map(|p| p.to_string_lossy().to_string()),
        }
    }

    /// The .env file this loader was created with, if any.
    pub fn env_file(&self) -> Option<&str> {
        self.env_file.as_deref()
    }

    /// Log level override from the environment.
    pub fn log_level(&self) -> Option<String> {
        non_empty_var(LOG_LEVEL_VAR)
    }

    /// Log file override from the environment.
    pub fn log_file(&self) -> Option<String> {
        non_empty_var(LOG_FILE_VAR)
    }

    /// Apply environment overrides to a logging section.
    pub fn apply(&self, logging: &mut LoggingConfig) {
        if let Some(level) = self.log_level() {
            logging.log_level = level;
        }
        if let Some(file) = self.log_file() {
            logging.log_file = Some(file);
        }
    }
}

impl Default for EnvironmentLoader {
    fn default() -> Self {
        Self::new(None)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_from_environment() {
        env::remove_var(LOG_LEVEL_VAR);
        env::remove_var(LOG_FILE_VAR);
        let env_loader = EnvironmentLoader::default();
        assert_eq!(env_loader.log_level(), None);

        let mut logging = LoggingConfig::default();
        env_loader.apply(&mut logging);
        assert_eq!(logging, LoggingConfig::default());

        env::set_var(LOG_LEVEL_VAR, "DEBUG");
        env::set_var(LOG_FILE_VAR, "/tmp/override.log");
        env_loader.apply(&mut logging);
        assert_eq!(logging.log_level, "DEBUG");
        assert_eq!(logging.log_file.as_deref(), Some("/tmp/override.log"));

        env::set_var(LOG_LEVEL_VAR, "  ");
        assert_eq!(env_loader.log_level(), None);

        env::remove_var(LOG_LEVEL_VAR);
        env::remove_var(LOG_FILE_VAR);
    }

    #[test]
    fn test_env_file_loading() {
        let env_loader = EnvironmentLoader::new(None);
        assert!(env_loader.env_file().is_none());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "CALL_LOG_TEST_FROM_DOTENV=loaded\n").unwrap();

        let env_loader = EnvironmentLoader::new(Some(path.as_path()));
        assert!(env_loader.env_file().unwrap().ends_with(".env"));
        assert_eq!(
            env::var("CALL_LOG_TEST_FROM_DOTENV").as_deref(),
            Ok("loaded")
        );
    }
}
