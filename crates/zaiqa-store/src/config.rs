//! # Store Configuration
//!
//! Configuration for the order store service.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     ZAIQA_PROGRESSION_INTERVAL_MS=500                                  │
//! │     ZAIQA_DATA_DIR=/tmp/zaiqa                                          │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/zaiqa/store.toml (Linux)                                 │
//! │     ~/Library/Application Support/com.zaiqa.zaiqa/store.toml (macOS)   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     3 s progression interval, resume on load, platform data dir        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # store.toml
//! [timers]
//! progression_interval_ms = 3000
//! resume_on_load = true
//!
//! [storage]
//! # data_dir = "/var/lib/zaiqa"   # platform app-data dir when unset
//! storage_key = "restaurant-storage"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::state::STORAGE_KEY;

// =============================================================================
// Timer Settings
// =============================================================================

/// Order progression timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerSettings {
    /// Delay between automatic status advances (milliseconds).
    /// Default: 3000
    #[serde(default = "default_progression_interval_ms")]
    pub progression_interval_ms: u64,

    /// Restart progression for non-terminal orders when state loads.
    /// Default: true
    #[serde(default = "default_resume_on_load")]
    pub resume_on_load: bool,
}

fn default_progression_interval_ms() -> u64 {
    3000
}

fn default_resume_on_load() -> bool {
    true
}

impl Default for TimerSettings {
    fn default() -> Self {
        TimerSettings {
            progression_interval_ms: default_progression_interval_ms(),
            resume_on_load: default_resume_on_load(),
        }
    }
}

// =============================================================================
// Storage Settings
// =============================================================================

/// Where and under which key the state document lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Data directory override. Platform app-data dir when unset.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Key the state document is stored under.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

fn default_storage_key() -> String {
    STORAGE_KEY.to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            data_dir: None,
            storage_key: default_storage_key(),
        }
    }
}

// =============================================================================
// Main Store Configuration
// =============================================================================

/// Complete store configuration.
///
/// ## Example Config File
/// ```toml
/// [timers]
/// progression_interval_ms = 3000
/// resume_on_load = true
///
/// [storage]
/// storage_key = "restaurant-storage"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Progression timing.
    #[serde(default)]
    pub timers: TimerSettings,

    /// Persistence location and key.
    #[serde(default)]
    pub storage: StorageSettings,
}

impl StoreConfig {
    /// Creates a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (store.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        let mut config = Self::default();

        // Try to load from config file
        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading store config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        // Override with environment variables
        config.apply_env_overrides();

        // Validate the configuration
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns defaults if loading fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load store config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> StoreResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| StoreError::ConfigSaveFailed("No config path available".into()))?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| StoreError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Store config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> StoreResult<()> {
        if self.timers.progression_interval_ms == 0 {
            return Err(StoreError::InvalidConfig(
                "progression_interval_ms must be greater than 0".into(),
            ));
        }

        if self.storage.storage_key.trim().is_empty() {
            return Err(StoreError::InvalidConfig(
                "storage_key must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(ms) = std::env::var("ZAIQA_PROGRESSION_INTERVAL_MS") {
            if let Ok(parsed) = ms.parse::<u64>() {
                debug!(
                    interval_ms = parsed,
                    "Overriding progression interval from environment"
                );
                self.timers.progression_interval_ms = parsed;
            }
        }

        if let Ok(resume) = std::env::var("ZAIQA_RESUME_ON_LOAD") {
            match resume.to_lowercase().as_str() {
                "1" | "true" | "yes" => self.timers.resume_on_load = true,
                "0" | "false" | "no" => self.timers.resume_on_load = false,
                _ => warn!(value = %resume, "Unknown ZAIQA_RESUME_ON_LOAD value"),
            }
        }

        if let Ok(dir) = std::env::var("ZAIQA_DATA_DIR") {
            debug!(dir = %dir, "Overriding data directory from environment");
            self.storage.data_dir = Some(PathBuf::from(dir));
        }

        if let Ok(key) = std::env::var("ZAIQA_STORAGE_KEY") {
            self.storage.storage_key = key;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "zaiqa", "zaiqa")
            .map(|dirs| dirs.config_dir().join("store.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Returns the progression delay as a [`Duration`].
    pub fn progression_interval(&self) -> Duration {
        Duration::from_millis(self.timers.progression_interval_ms)
    }

    /// Returns the storage key for the state document.
    pub fn storage_key(&self) -> &str {
        &self.storage.storage_key
    }
}
