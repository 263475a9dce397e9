use std::path::PathBuf;

use crate::config::{Config, LoggingConfig, DEFAULT_TIME_FORMAT};
use crate::core::render::PageOptions;

use super::test_utils::create_minimal_config;

/// Test config default values
/// Verifies that Config::default() returns expected values
#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.get_directory(), PathBuf::from("."));
    assert_eq!(config.get_pattern(), "zipios*");
    assert!(!config.is_verbose_default());
    assert_eq!(config.get_time_format(), DEFAULT_TIME_FORMAT);
}

/// Test that a config without any section reproduces the stock page
#[test]
fn test_minimal_config_page_options() {
    let config = create_minimal_config();
    assert_eq!(config.page_options(), PageOptions::default());
}

/// Test logging section without verbose flag
#[test]
fn test_logging_without_verbose() {
    let config = Config {
        logging: Some(LoggingConfig {
            verbose: None,
            time_format: Some("[hour]:[minute]".to_string()),
        }),
        ..Config::default()
    };

    assert!(!config.is_verbose_default());
    assert_eq!(config.get_time_format(), "[hour]:[minute]");
}

/// Test tilde expansion of the indexed directory
#[test]
fn test_directory_tilde_expansion() {
    let config = Config {
        directory: Some(PathBuf::from("~/coverage")),
        ..Config::default()
    };

    if let Some(home) = dirs::home_dir() {
        assert_eq!(config.get_directory(), home.join("coverage"));
    }
}

/// Test that plain paths are kept as-is
#[test]
fn test_directory_plain_path() {
    let config = Config {
        directory: Some(PathBuf::from("/var/www/zipios/dev")),
        ..Config::default()
    };

    assert_eq!(config.get_directory(), PathBuf::from("/var/www/zipios/dev"));
}

/// Test config validation
#[test]
fn test_config_validate() {
    assert!(Config::default().validate().is_ok());

    let bad_pattern = Config {
        pattern: Some("zipios[".to_string()),
        ..Config::default()
    };
    assert!(bad_pattern.validate().is_err());

    let empty_pattern = Config {
        pattern: Some(String::new()),
        ..Config::default()
    };
    assert!(empty_pattern.validate().is_err());

    let bad_time_format = Config {
        logging: Some(LoggingConfig {
            verbose: None,
            time_format: Some("[not-a-component]".to_string()),
        }),
        ..Config::default()
    };
    assert!(bad_time_format.validate().is_err());
}

/// Test config schema generation
#[test]
fn test_json_schema() {
    let schema = Config::json_schema().unwrap();
    assert!(schema.contains("\"pattern\""));
    assert!(schema.contains("\"escape_names\""));
}
