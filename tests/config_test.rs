//! Configuration system tests

use panql::config::loader::*;
use panql::config::validation::*;
use panql::config::*;
use std::env;
use tempfile::tempdir;

#[test]
fn test_default_config() {
    let config = PanqlConfig::default();

    // Validate default values
    assert_eq!(config.csv.delimiter, ',');
    assert!(config.csv.has_header);
    assert!(config.csv.infer_types);
    assert_eq!(config.html.max_rows, 60);
    assert_eq!(config.logging.level, "info");

    assert!(validate_config(&config).is_ok());
}

#[test]
fn test_config_serialization() {
    let config = PanqlConfig::default();

    // Test YAML serialization
    let yaml = config.to_yaml().unwrap();
    assert!(yaml.contains("csv:"));
    assert!(yaml.contains("html:"));
    assert!(yaml.contains("logging:"));

    // Test TOML serialization
    let toml = config.to_toml().unwrap();
    assert!(toml.contains("[csv]"));
    assert!(toml.contains("[html]"));

    assert_eq!(PanqlConfig::from_yaml(&yaml).unwrap(), config);
    assert_eq!(PanqlConfig::from_toml(&toml).unwrap(), config);
}

#[test]
fn test_partial_yaml_uses_defaults() {
    let yaml = r#"
csv:
  delimiter: ";"
html:
  max_rows: 5
"#;
    let config = load_from_yaml(yaml).unwrap();

    assert_eq!(config.csv.delimiter, ';');
    assert!(config.csv.has_header);
    assert_eq!(config.html.max_rows, 5);
    assert_eq!(config.html.table_class, "panql-table");
}

#[test]
fn test_partial_toml() {
    let toml = r#"
[logging]
level = "debug"
"#;
    let config = load_from_toml(toml).unwrap();
    assert_eq!(config.logging.level, "debug");
    assert_eq!(
        config.logging.level_filter().unwrap(),
        log::LevelFilter::Debug
    );
}

#[test]
fn test_invalid_documents() {
    assert!(load_from_yaml("csv: [1, 2").is_err());
    assert!(load_from_toml("[csv\nkey").is_err());
}

#[test]
fn test_file_round_trip() {
    let dir = tempdir().unwrap();

    let mut config = PanqlConfig::default();
    config.html.show_index = true;
    config.csv.delimiter = '\t';

    for name in ["config.yaml", "config.toml", "nested/config.yml"] {
        let path = dir.path().join(name);
        config.save_to_file(&path).unwrap();
        assert_eq!(PanqlConfig::from_file(&path).unwrap(), config);
    }

    let unsupported = dir.path().join("config.json");
    assert!(config.save_to_file(&unsupported).is_err());
    assert!(PanqlConfig::from_file(dir.path().join("absent.yaml")).is_err());
}

#[test]
fn test_merge_prefers_non_default_values() {
    let mut base = PanqlConfig::default();
    base.html.max_rows = 10;

    let mut other = PanqlConfig::default();
    other.csv.has_header = false;

    base.merge(&other);
    assert_eq!(base.html.max_rows, 10);
    assert!(!base.csv.has_header);
}

#[test]
fn test_validation_errors() {
    let mut config = PanqlConfig::default();
    config.html.max_rows = 0;
    assert!(config.validate().is_err());

    let mut config = PanqlConfig::default();
    config.logging.level = "loud".to_string();
    assert!(config.validate().is_err());

    let mut config = PanqlConfig::default();
    config.csv.delimiter = '\n';
    assert!(validate_csv_config(&config.csv).is_err());
}

// All environment handling lives in one test so parallel tests do not race
#[test]
fn test_environment_and_precedence() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("panql.yaml");
    std::fs::write(&path, "html:\n  max_rows: 7\n  table_class: report\n").unwrap();

    env::set_var("PANQL_HTML_MAX_ROWS", "25");
    env::set_var("PANQL_CSV_DELIMITER", "|");
    env::set_var("PANQL_LOG_LEVEL", "warn");

    let from_env = load_from_env().unwrap();
    assert_eq!(from_env.html.max_rows, 25);
    assert_eq!(from_env.csv.delimiter, '|');
    assert_eq!(from_env.logging.level, "warn");

    let config = load_with_precedence(Some(&path)).unwrap();
    // Environment wins over the file, the file wins over defaults
    assert_eq!(config.html.max_rows, 25);
    assert_eq!(config.html.table_class, "report");
    assert_eq!(config.csv.delimiter, '|');

    env::set_var("PANQL_HTML_MAX_ROWS", "many");
    assert!(load_from_env().is_err());

    env::set_var("PANQL_HTML_MAX_ROWS", "25");
    env::set_var("PANQL_CSV_DELIMITER", "||");
    assert!(load_from_env().is_err());

    env::remove_var("PANQL_HTML_MAX_ROWS");
    env::remove_var("PANQL_CSV_DELIMITER");

    let config = load_with_precedence(None::<&str>).unwrap();
    assert_eq!(config.html.max_rows, 60);

    env::remove_var("PANQL_LOG_LEVEL");
}
