//! Configuration loading utilities
//!
//! This module handles loading configuration from various sources with proper
//! precedence and validation.

use super::*;
use crate::core::error::{Error, Result};
use std::env;
use std::fs;
use std::path::Path;

/// Load configuration from environment variables
pub fn load_from_env() -> Result<PanqlConfig> {
    let mut config = PanqlConfig::default();

    // CSV configuration
    if let Ok(delimiter) = env::var("PANQL_CSV_DELIMITER") {
        let mut chars = delimiter.chars();
        config.csv.delimiter = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => {
                return Err(Error::ConfigurationError(format!(
                    "Invalid PANQL_CSV_DELIMITER: expected one character, got {:?}",
                    delimiter
                )))
            }
        };
    }

    if let Ok(has_header) = env::var("PANQL_CSV_HAS_HEADER") {
        config.csv.has_header = has_header.parse().map_err(|e| {
            Error::ConfigurationError(format!("Invalid PANQL_CSV_HAS_HEADER: {}", e))
        })?;
    }

    if let Ok(infer) = env::var("PANQL_CSV_INFER_TYPES") {
        config.csv.infer_types = infer.parse().map_err(|e| {
            Error::ConfigurationError(format!("Invalid PANQL_CSV_INFER_TYPES: {}", e))
        })?;
    }

    // HTML configuration
    if let Ok(max_rows) = env::var("PANQL_HTML_MAX_ROWS") {
        config.html.max_rows = max_rows.parse().map_err(|e| {
            Error::ConfigurationError(format!("Invalid PANQL_HTML_MAX_ROWS: {}", e))
        })?;
    }

    // Logging configuration
    if let Ok(log_level) = env::var("PANQL_LOG_LEVEL").or_else(|_| env::var("RUST_LOG")) {
        config.logging.level = log_level;
    }

    Ok(config)
}

/// Load configuration from a file (YAML or TOML based on extension)
pub fn load_from_file(path: &Path) -> Result<PanqlConfig> {
    if !path.exists() {
        return Err(Error::ConfigurationError(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        Error::ConfigurationError(format!(
            "Failed to read config file {}: {}",
            path.display(),
            e
        ))
    })?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => load_from_yaml(&contents),
        Some("toml") => load_from_toml(&contents),
        Some(ext) => Err(Error::ConfigurationError(format!(
            "Unsupported config file format: {}",
            ext
        ))),
        None => {
            // Try to parse as YAML first, then TOML
            load_from_yaml(&contents).or_else(|_| load_from_toml(&contents))
        }
    }
}

/// Load configuration from YAML string
pub fn load_from_yaml(yaml: &str) -> Result<PanqlConfig> {
    serde_yaml::from_str(yaml)
        .map_err(|e| Error::ConfigurationError(format!("Failed to parse YAML config: {}", e)))
}

/// Load configuration from TOML string
pub fn load_from_toml(toml: &str) -> Result<PanqlConfig> {
    toml::from_str(toml)
        .map_err(|e| Error::ConfigurationError(format!("Failed to parse TOML config: {}", e)))
}

/// Load configuration with precedence: defaults -> file -> environment
pub fn load_with_precedence<P: AsRef<Path>>(config_file: Option<P>) -> Result<PanqlConfig> {
    let mut config = PanqlConfig::default();

    if let Some(file_path) = config_file {
        let file_config = load_from_file(file_path.as_ref())?;
        config.merge(&file_config);
    }

    // Environment has the highest precedence
    let env_config = load_from_env()?;
    config.merge(&env_config);

    config.validate()?;

    Ok(config)
}

/// Save configuration to a file
pub fn save_to_file(config: &PanqlConfig, path: &Path) -> Result<()> {
    let contents = match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => config.to_yaml()?,
        Some("toml") => config.to_toml()?,
        Some(ext) => {
            return Err(Error::ConfigurationError(format!(
                "Unsupported config file format: {}",
                ext
            )))
        }
        None => config.to_yaml()?,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::ConfigurationError(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    fs::write(path, contents).map_err(|e| {
        Error::ConfigurationError(format!(
            "Failed to write config file {}: {}",
            path.display(),
            e
        ))
    })
}
