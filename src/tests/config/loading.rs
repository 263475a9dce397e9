use anyhow::Result;
use std::path::PathBuf;
use tokio::fs;

use crate::config::Config;

use super::test_utils::{create_basic_config, create_temp_dir};

/// Test config loading and saving
/// Verifies that configurations can be saved and loaded correctly
#[tokio::test]
async fn test_config_load_and_save() -> Result<()> {
    let temp_dir = create_temp_dir();
    let config_path = temp_dir.path().join("config.toml");
    let config = create_basic_config();

    config.save_to_file(&config_path).await?;

    let loaded_config = Config::load_from_file(&config_path).await?;
    assert_eq!(
        loaded_config.get_directory(),
        PathBuf::from("/srv/zipios/coverage")
    );
    assert_eq!(loaded_config.get_pattern(), "zipios-*");
    assert!(loaded_config.is_verbose_default());

    Ok(())
}

/// Test loading a hand written TOML file
#[tokio::test]
async fn test_config_load_from_toml() -> Result<()> {
    let temp_dir = create_temp_dir();
    let config_path = temp_dir.path().join("devindex.toml");
    let content = r#"
        directory = "/var/www/dev"
        pattern = "zipios-2*"

        [page]
        heading = "Zipios 2.x coverage"
        escape_names = false

        [logging]
        verbose = true
        time_format = "[hour]:[minute]:[second]"
    "#;
    fs::write(&config_path, content).await?;

    let config = Config::load_from_file(&config_path).await?;
    assert_eq!(config.get_directory(), PathBuf::from("/var/www/dev"));
    assert_eq!(config.get_pattern(), "zipios-2*");
    assert_eq!(config.page_options().heading, "Zipios 2.x coverage");
    assert!(!config.page_options().escape_names);
    assert_eq!(config.get_time_format(), "[hour]:[minute]:[second]");

    Ok(())
}

/// Test that an invalid pattern in the file is rejected on load
#[tokio::test]
async fn test_config_load_rejects_invalid_pattern() -> Result<()> {
    let temp_dir = create_temp_dir();
    let config_path = temp_dir.path().join("devindex.toml");
    fs::write(&config_path, "pattern = \"zipios[\"\n").await?;

    let err = Config::load_from_file(&config_path).await.unwrap_err();
    assert!(format!("{err:#}").contains("Invalid config file"));

    Ok(())
}

/// Test that malformed TOML is reported with the file name
#[tokio::test]
async fn test_config_load_malformed() -> Result<()> {
    let temp_dir = create_temp_dir();
    let config_path = temp_dir.path().join("broken.toml");
    fs::write(&config_path, "pattern = [unterminated").await?;

    let err = Config::load_from_file(&config_path).await.unwrap_err();
    assert!(err.to_string().contains("broken.toml"));

    Ok(())
}

/// Test loading a missing file
#[tokio::test]
async fn test_config_load_missing_file() {
    let temp_dir = create_temp_dir();
    let result = Config::load_from_file(temp_dir.path().join("nope.toml")).await;
    assert!(result.is_err());
}

/// Test config paths discovery
/// Verifies that config file paths are discovered correctly
#[test]
fn test_config_paths() {
    let paths = Config::get_config_paths();
    assert!(!paths.is_empty());
    assert_eq!(paths[0], PathBuf::from("devindex.toml"));
    assert_eq!(paths[1], PathBuf::from(".devindex.toml"));
    assert!(paths
        .iter()
        .any(|p| p.ends_with(PathBuf::from("devindex").join("config.toml"))));
}

/// Test that a relative directory is resolved against the config file location
#[tokio::test]
async fn test_relative_directory_resolved_against_config_file() -> Result<()> {
    let temp_dir = create_temp_dir();
    let config_dir = temp_dir.path().join(".config").join("devindex");
    fs::create_dir_all(&config_dir).await?;
    let config_path = config_dir.join("config.toml");
    fs::write(&config_path, "directory = \"results\"\n").await?;

    let config = Config::load_from_file(&config_path).await?;
    assert_eq!(config.get_directory(), config_dir.join("results"));

    Ok(())
}

/// Test that a relative directory set in code stays relative to the current directory
#[test]
fn test_relative_directory_in_code_stays_relative() {
    let config = Config {
        directory: Some(PathBuf::from("results")),
        ..Config::default()
    };
    assert_eq!(config.get_directory(), PathBuf::from("results"));
}
