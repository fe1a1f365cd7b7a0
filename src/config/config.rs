//! TOML configuration parsing and management.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub call_log: CallLogConfig,
    #[serde(default)]
    pub exit_on_none: ExitOnNoneConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum level written (DEBUG, INFO, WARN, ERROR)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Append to this file instead of stderr
    #[serde(default)]
    pub log_file: Option<String>,
    /// Let RUST_LOG override `log_level` (off unless enabled)
    #[serde(default)]
    pub honor_rust_log: bool,
}

fn default_log_level() -> String {
    "INFO".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_file: None,
            honor_rust_log: false,
        }
    }
}

/// Default options for call-logging wrappers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallLogConfig {
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub trim: bool,
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for CallLogConfig {
    fn default() -> Self {
        Self {
            description: None,
            trim: true,
            level: default_log_level(),
        }
    }
}

/// Default options for none-guard wrappers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExitOnNoneConfig {
    #[serde(default = "default_exit_description")]
    pub description: String,
    #[serde(default = "default_exit_level")]
    pub level: String,
}

fn default_exit_description() -> String {
    "EXITING".to_string()
}

fn default_exit_level() -> String {
    "ERROR".to_string()
}

impl Default for ExitOnNoneConfig {
    fn default() -> Self {
        Self {
            description: default_exit_description(),
            level: default_exit_level(),
        }
    }
}

/// Loads and manages TOML configuration.
#[derive(Debug)]
pub struct ConfigurationLoader {
    pub config_path: PathBuf,
    pub config: Configuration,
}

impl ConfigurationLoader {
    /// Initialize configuration loader.
    ///
    /// # Arguments
    /// * `config_path` - Path to TOML config file. If None, uses `config/call_log.toml`;
    ///   a missing file means the default configuration.
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        let config_path = config_path
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("config/call_log.toml"));

        let config = if config_path.exists() {
            Self::load_config(&config_path)?
        } else {
            Self::get_default_config()
        };

        Ok(Self {
            config_path,
            config,
        })
    }

    /// Create a configuration loader from a pre-parsed Configuration.
    pub fn from_config(config: Configuration) -> Self {
        Self {
            config_path: PathBuf::from("config/call_log.toml"),
            config,
        }
    }

    /// Load configuration from TOML file.
    fn load_config(path: &Path) -> Result<Configuration> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
    }

    /// Get default configuration.
    fn get_default_config() -> Configuration {
        Configuration::default()
    }

    /// Get string configuration value.
    pub fn get_string(&self, key: &str) -> Option<String> {
        match key {
            "logging.log_level" => Some(self.config.logging.log_level.clone()),
            "logging.log_file" => self.config.logging.log_file.clone(),
            "call_log.description" => self.config.call_log.description.clone(),
            "call_log.level" => Some(self.config.call_log.level.clone()),
            "exit_on_none.description" => Some(self.config.exit_on_none.description.clone()),
            "exit_on_none.level" => Some(self.config.exit_on_none.level.clone()),
            _ => None,
        }
    }

    /// Get boolean configuration value.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match key {
            "logging.honor_rust_log" => Some(self.config.logging.honor_rust_log),
            "call_log.trim" => Some(self.config.call_log.trim),
            _ => None,
        }
    }
}

#[cfg(feature = "observability")]
impl ConfigurationLoader {
    /// Process-wide logging settings described by the `[logging]` section.
    pub fn log_settings(&self) -> crate::observability::LogSettings {
        let logging = &self.config.logging;
        crate::observability::LogSettings {
            level: crate::observability::Severity::parse(&logging.log_level),
            log_file: logging.log_file.as_ref().map(PathBuf::from),
            honor_rust_log: logging.honor_rust_log,
        }
    }

    /// Apply the `[logging]` section as the process-wide setup.
    ///
    /// Returns `false` if another setup was already applied.
    pub fn init_logging(&self) -> Result<bool> {
        crate::observability::init_logging(&self.log_settings())
            .context("Failed to apply logging configuration")
    }

    /// A provider handing out loggers under the `[logging]` settings.
    pub fn logger_provider(&self) -> crate::observability::LoggerProvider {
        crate::observability::LoggerProvider::with_settings(self.log_settings())
    }
}

#[cfg(feature = "decorators")]
impl ConfigurationLoader {
    /// Call-logging options from the `[call_log]` section.
    pub fn call_log(&self) -> crate::decorators::CallLog {
        let section = &self.config.call_log;
        let options = crate::decorators::CallLog::new()
            .trim(section.trim)
            .level(section.level.as_str());
        match &section.description {
            Some(description) => options.description(description.clone()),
            None => options,
        }
    }

    /// None-guard options from the `[exit_on_none]` section.
    pub fn exit_on_none(&self) -> crate::decorators::ExitOnNone {
        let section = &self.config.exit_on_none;
        crate::decorators::ExitOnNone::new()
            .description(section.description.clone())
            .level(section.level.as_str())
    }
}
