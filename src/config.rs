use config::{Config as ConfigBuilder, ConfigError, Environment, File, FileFormat};
use dailymenu_menu::MenuCatalog;
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

/// Compiled-in defaults, including the built-in candidate lists.
const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
    /// Candidate lists keyed by category ("breakfast", "easy_lunch", ...).
    #[serde(default)]
    pub menu: HashMap<String, Vec<String>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// File holding the persisted history and daily snapshot.
    #[serde(default = "default_state_path")]
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_state_path(),
        }
    }
}

fn default_state_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("dailymenu")
        .join("state.json")
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DAILYMENU__STORAGE__PATH, etc.)
    /// 2. Config file specified by path
    /// 3. Compiled-in defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        // Load config file if path provided or DAILYMENU_CONFIG_PATH env var set
        let config_file_path = config_path
            .or_else(|| env::var("DAILYMENU_CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/dailymenu.toml".to_string());

        // Try to load config file (optional - ignore if not found)
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        // Override with environment variables (DAILYMENU__STORAGE__PATH, etc.)
        builder = builder.add_source(
            Environment::with_prefix("DAILYMENU")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.storage.path.as_os_str().is_empty() {
            return Err("storage.path must not be empty".to_string());
        }
        if self.menu.keys().any(|key| key.trim().is_empty()) {
            return Err("menu categories must have non-empty names".to_string());
        }
        Ok(())
    }

    /// The candidate lists as the core's catalog type.
    pub fn catalog(&self) -> MenuCatalog {
        MenuCatalog::from(self.menu.clone())
    }
}
