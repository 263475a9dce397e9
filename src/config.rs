use anyhow::{Context, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::core::listing::{parse_pattern, DEFAULT_PATTERN};
use crate::core::render::{
    PageOptions, DEFAULT_HEADING, DEFAULT_HOME_TITLE, DEFAULT_HOME_URL, DEFAULT_LOGO,
    DEFAULT_TITLE,
};

pub const DEFAULT_TIME_FORMAT: &str = "[year]-[month]-[day] [hour]:[minute]:[second]";

/// Configuration for devindex
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct Config {
    /// Directory whose entries are indexed (defaults to the current directory)
    pub directory: Option<PathBuf>,

    /// Glob pattern selecting the indexed entries
    pub pattern: Option<String>,

    /// Page layout configuration
    pub page: Option<PageConfig>,

    /// Logging configuration
    pub logging: Option<LoggingConfig>,
}

/// Page layout configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct PageConfig {
    /// Document title
    pub title: Option<String>,

    /// Text of the `<h1>` heading
    pub heading: Option<String>,

    /// Target of the logo link (empty string renders the logo without a link)
    pub home_url: Option<String>,

    /// Tooltip of the logo link
    pub home_title: Option<String>,

    /// Logo image source (empty string disables the banner)
    pub logo: Option<String>,

    /// Escape entry names before embedding them in the page
    pub escape_names: Option<bool>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct LoggingConfig {
    /// Enable verbose logging by default
    pub verbose: Option<bool>,

    /// Time format for log timestamps (uses time crate format syntax)
    pub time_format: Option<String>,
}

impl Config {
    /// Load configuration from file
    pub async fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .await
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let mut config: Config = toml::from_str(&content).with_context(|| {
            format!(
                "Failed to parse config file as TOML: {}",
                path.as_ref().display()
            )
        })?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.as_ref().display()))?;

        config.directory = config
            .directory
            .map(|dir| Self::resolve_against(&dir, path.as_ref()));

        Ok(config)
    }

    /// Try to load configuration from standard locations
    pub async fn load() -> Result<Self> {
        for path in Self::get_config_paths() {
            if path.exists() {
                return Self::load_from_file(&path).await;
            }
        }

        // Return default config if no config file found
        Ok(Self::default())
    }

    /// Get potential configuration file paths in order of preference
    pub fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. Current directory
        paths.push(PathBuf::from("devindex.toml"));
        paths.push(PathBuf::from(".devindex.toml"));

        // 2. User config directory
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("devindex").join("config.toml"));
            paths.push(config_dir.join("devindex.toml"));
        }

        // 3. User home directory
        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".config").join("devindex").join("config.toml"));
            paths.push(home_dir.join(".devindex.toml"));
        }

        paths
    }

    /// Check values that deserialize fine but cannot be used
    pub fn validate(&self) -> Result<()> {
        if let Some(pattern) = &self.pattern {
            parse_pattern(pattern)?;
        }

        if let Some(time_format) = self.logging.as_ref().and_then(|l| l.time_format.as_ref()) {
            time::format_description::parse_owned::<1>(time_format)
                .map_err(|e| anyhow::anyhow!("Invalid time_format '{time_format}': {e}"))?;
        }

        Ok(())
    }

    /// Get the indexed directory, with `~` and environment variables expanded
    pub fn get_directory(&self) -> PathBuf {
        match &self.directory {
            Some(path) => Self::expand_path(path),
            None => PathBuf::from("."),
        }
    }

    /// Relative directories in a config file are relative to that file
    fn resolve_against(directory: &Path, config_path: &Path) -> PathBuf {
        let expanded = Self::expand_path(directory);
        if expanded.is_absolute() {
            return expanded;
        }

        match config_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.join(expanded),
            _ => expanded,
        }
    }

    fn expand_path(path: &Path) -> PathBuf {
        let Some(path_str) = path.to_str() else {
            return path.to_path_buf();
        };

        match shellexpand::full(path_str) {
            Ok(expanded) => PathBuf::from(expanded.as_ref()),
            Err(_) => PathBuf::from(shellexpand::tilde(path_str).as_ref()),
        }
    }

    /// Get the glob pattern selecting the indexed entries
    pub fn get_pattern(&self) -> String {
        self.pattern
            .clone()
            .unwrap_or_else(|| DEFAULT_PATTERN.to_string())
    }

    /// Resolve the page settings, falling back to the stock layout
    pub fn page_options(&self) -> PageOptions {
        let page = self.page.clone().unwrap_or_default();

        PageOptions {
            title: page.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            heading: page.heading.unwrap_or_else(|| DEFAULT_HEADING.to_string()),
            home_url: non_empty(page.home_url, DEFAULT_HOME_URL),
            home_title: page
                .home_title
                .unwrap_or_else(|| DEFAULT_HOME_TITLE.to_string()),
            logo: non_empty(page.logo, DEFAULT_LOGO),
            escape_names: page.escape_names.unwrap_or(true),
        }
    }

    /// Check if verbose logging is enabled by default
    pub fn is_verbose_default(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    /// Get the time format for log timestamps
    pub fn get_time_format(&self) -> String {
        self.logging
            .as_ref()
            .and_then(|l| l.time_format.clone())
            .unwrap_or_else(|| DEFAULT_TIME_FORMAT.to_string())
    }

    /// JSON schema of the configuration file
    pub fn json_schema() -> Result<String> {
        let schema = schemars::schema_for!(Config);
        serde_json::to_string_pretty(&schema).context("Failed to serialize config schema")
    }

    /// Save configuration to file
    pub async fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        // Create parent directories if they don't exist
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)
                .await
                .context("Failed to create config directory")?;
        }

        fs::write(path.as_ref(), content)
            .await
            .context("Failed to write config file")?;

        Ok(())
    }
}

/// Unset means the default, an empty string means disabled
fn non_empty(value: Option<String>, default: &str) -> Option<String> {
    match value {
        None => Some(default.to_string()),
        Some(v) if v.is_empty() => None,
        Some(v) => Some(v),
    }
}
