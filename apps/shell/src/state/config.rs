//! # Configuration State
//!
//! Explorer settings, loaded once at startup from a TOML file.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. TOML Config File                                                   │
//! │     ~/.config/product-explorer/explorer.toml (Linux)                   │
//! │     ~/Library/Application Support/com.explorer.product-explorer/       │
//! │       explorer.toml (macOS)                                            │
//! │                                                                         │
//! │  2. Default Values                                                     │
//! │     fakestoreapi.com, 1h revalidation, platform data dir for the db    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [catalog]
//! base_url = "https://fakestoreapi.com"
//! revalidate_secs = 3600
//!
//! [storage]
//! favorites_key = "product-favorites"
//!
//! [logging]
//! filter = "info,explorer=debug,sqlx=warn"
//! ```

use directories::ProjectDirs;
use explorer_catalog::CatalogConfig;
use explorer_db::DEFAULT_FAVORITES_KEY;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

const CONFIG_FILE: &str = "explorer.toml";
const DATABASE_FILE: &str = "explorer.db";

// =============================================================================
// Errors
// =============================================================================

/// Failures loading, saving or validating [`ShellConfig`].
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read or write config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid catalog configuration: {0}")]
    Catalog(#[from] explorer_catalog::ConfigError),

    #[error("Invalid {field}: {reason}")]
    Invalid { field: String, reason: String },

    #[error("Could not determine the platform config directory")]
    NoProjectDirs,
}

pub type SettingsResult<T> = Result<T, SettingsError>;

// =============================================================================
// Sections
// =============================================================================

/// Where favorites are stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// SQLite file. `None` uses the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,

    /// Key under which the favorites array is stored.
    #[serde(default = "default_favorites_key")]
    pub favorites_key: String,
}

fn default_favorites_key() -> String {
    DEFAULT_FAVORITES_KEY.to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            database_path: None,
            favorites_key: default_favorites_key(),
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `tracing_subscriber::EnvFilter` directive string.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "info,explorer=debug,sqlx=warn".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            filter: default_log_filter(),
        }
    }
}

// =============================================================================
// Shell Config
// =============================================================================

/// Complete explorer configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

impl ShellConfig {
    /// `explorer.toml` in the platform config directory.
    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// `explorer.db` in the platform data directory.
    pub fn default_database_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.data_dir().join(DATABASE_FILE))
    }

    /// Loads configuration from `config_path` (or the default location).
    ///
    /// A missing file is not an error: defaults are used.
    pub fn load(config_path: Option<PathBuf>) -> SettingsResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading explorer config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Loads config or returns defaults if loading fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load explorer config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to `config_path` (or the default location).
    pub fn save(&self, config_path: Option<PathBuf>) -> SettingsResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(SettingsError::NoProjectDirs)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Explorer config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> SettingsResult<()> {
        self.catalog.validate()?;

        if self.storage.favorites_key.trim().is_empty() {
            return Err(SettingsError::Invalid {
                field: "storage.favorites_key".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        if let Err(e) = tracing_subscriber::EnvFilter::try_new(&self.logging.filter) {
            return Err(SettingsError::Invalid {
                field: "logging.filter".to_string(),
                reason: e.to_string(),
            });
        }

        Ok(())
    }

    /// The database file to open.
    pub fn database_path(&self) -> SettingsResult<PathBuf> {
        match &self.storage.database_path {
            Some(path) => Ok(path.clone()),
            None => Self::default_database_path().ok_or(SettingsError::NoProjectDirs),
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "explorer", "product-explorer")
}

// =============================================================================
// Unit Tests
// =============================================================================
