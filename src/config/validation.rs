//! Configuration validation utilities

use super::*;
use crate::core::error::{Error, Result};

/// Validate the entire configuration
pub fn validate_config(config: &PanqlConfig) -> Result<()> {
    validate_csv_config(&config.csv)?;
    validate_html_config(&config.html)?;
    validate_log_level(&config.logging.level)?;

    Ok(())
}

/// Validate CSV configuration
pub fn validate_csv_config(config: &CsvConfig) -> Result<()> {
    let delimiter = config.delimiter;

    if !delimiter.is_ascii() {
        return Err(Error::ConfigurationError(format!(
            "CSV delimiter must be an ASCII character, got {:?}",
            delimiter
        )));
    }

    if matches!(delimiter, '"' | '\n' | '\r') {
        return Err(Error::ConfigurationError(format!(
            "CSV delimiter cannot be {:?}",
            delimiter
        )));
    }

    Ok(())
}

/// Validate HTML configuration
pub fn validate_html_config(config: &HtmlConfig) -> Result<()> {
    if config.max_rows == 0 {
        return Err(Error::ConfigurationError(
            "max_rows must be greater than 0".to_string(),
        ));
    }

    let class_ok = config
        .table_class
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == ' ');
    if !class_ok {
        return Err(Error::ConfigurationError(format!(
            "Invalid table class: {}",
            config.table_class
        )));
    }

    Ok(())
}

/// Validate log level
pub fn validate_log_level(level: &str) -> Result<()> {
    match level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" | "off" => Ok(()),
        _ => Err(Error::ConfigurationError(format!(
            "Invalid log level: {}",
            level
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_csv_config() {
        let mut config = CsvConfig::default();
        assert!(validate_csv_config(&config).is_ok());

        config.delimiter = ';';
        assert!(validate_csv_config(&config).is_ok());

        config.delimiter = '"';
        assert!(validate_csv_config(&config).is_err());

        config.delimiter = '¦';
        assert!(validate_csv_config(&config).is_err());
    }

    #[test]
    fn test_validate_html_config() {
        let mut config = HtmlConfig::default();
        assert!(validate_html_config(&config).is_ok());

        config.max_rows = 0;
        assert!(validate_html_config(&config).is_err());

        config.max_rows = 10;
        config.table_class = "bad\"class".to_string();
        assert!(validate_html_config(&config).is_err());
    }

    #[test]
    fn test_validate_log_level() {
        assert!(validate_log_level("debug").is_ok());
        assert!(validate_log_level("WARN").is_ok());
        assert!(validate_log_level("verbose").is_err());
    }
}
