//! Configuration management for panql
//!
//! This module provides configuration for the I/O and rendering layers with
//! support for:
//! - Environment variables
//! - YAML/TOML configuration files
//! - Configuration validation
//!
//! The expression compiler itself has no settings.

use crate::core::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod loader;
pub mod validation;

/// Main configuration structure for panql
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanqlConfig {
    /// CSV reading and writing
    pub csv: CsvConfig,
    /// HTML table rendering
    pub html: HtmlConfig,
    /// Logging settings for embedding applications
    pub logging: LoggingConfig,
}

/// CSV configuration section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvConfig {
    /// Field delimiter (single ASCII character)
    pub delimiter: char,
    /// Whether the first record holds column names
    pub has_header: bool,
    /// Infer int/float/bool column types instead of keeping strings
    pub infer_types: bool,
}

/// HTML rendering configuration section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HtmlConfig {
    /// Maximum number of body rows rendered before truncating
    pub max_rows: usize,
    /// CSS class put on the `<table>` element
    pub table_class: String,
    /// Render the row position as a leading column
    pub show_index: bool,
}

/// Logging configuration section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error, off)
    pub level: String,
}

impl Default for PanqlConfig {
    fn default() -> Self {
        Self {
            csv: CsvConfig::default(),
            html: HtmlConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            has_header: true,
            infer_types: true,
        }
    }
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            max_rows: 60,
            table_class: "panql-table".to_string(),
            show_index: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// The configured level as a `log` filter
    pub fn level_filter(&self) -> Result<log::LevelFilter> {
        self.level.parse().map_err(|_| {
            Error::ConfigurationError(format!("Invalid log level: {}", self.level))
        })
    }
}

impl PanqlConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        loader::load_from_env()
    }

    /// Load configuration from a file (YAML or TOML)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        loader::load_from_file(path.as_ref())
    }

    /// Load configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        loader::load_from_yaml(yaml)
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml: &str) -> Result<Self> {
        loader::load_from_toml(toml)
    }

    /// Load configuration with precedence: defaults -> file -> env
    pub fn load_with_precedence<P: AsRef<Path>>(config_file: Option<P>) -> Result<Self> {
        loader::load_with_precedence(config_file)
    }

    /// Validate configuration and return errors if invalid
    pub fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }

    /// Save configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        loader::save_to_file(self, path.as_ref())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            Error::ConfigurationError(format!("Failed to serialize config to YAML: {}", e))
        })
    }

    /// Convert to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| {
            Error::ConfigurationError(format!("Failed to serialize config to TOML: {}", e))
        })
    }

    /// Merge another configuration into this one.
    ///
    /// Every setting of `other` that differs from the default wins.
    pub fn merge(&mut self, other: &Self) {
        let defaults = PanqlConfig::default();

        if other.csv.delimiter != defaults.csv.delimiter {
            self.csv.delimiter = other.csv.delimiter;
        }
        if other.csv.has_header != defaults.csv.has_header {
            self.csv.has_header = other.csv.has_header;
        }
        if other.csv.infer_types != defaults.csv.infer_types {
            self.csv.infer_types = other.csv.infer_types;
        }

        if other.html.max_rows != defaults.html.max_rows {
            self.html.max_rows = other.html.max_rows;
        }
        if other.html.table_class != defaults.html.table_class {
            self.html.table_class = other.html.table_class.clone();
        }
        if other.html.show_index != defaults.html.show_index {
            self.html.show_index = other.html.show_index;
        }

        if other.logging.level != defaults.logging.level {
            self.logging.level = other.logging.level.clone();
        }
    }
}
