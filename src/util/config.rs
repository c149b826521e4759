use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use serde_json::Error as SerdeError;
use tracing::{debug, warn};

use crate::domain::{OverridePolicy, PricingEngine, DEFAULT_PER_POINT_RATE};

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "RankBoost";
const APP_NAME: &str = "RankBoostPricing";

/// Overrides `store.base_url` when set.
pub const STORE_URL_ENV: &str = "RANK_BOOST_STORE_URL";

const DEFAULT_STORE_URL: &str = "http://127.0.0.1:8080/api/";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_STORE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub store: StoreConfig,
    pub per_point_rate: f64,
    pub override_policy: OverridePolicy,
    /// Directory for file-backed rank records.
    pub data_dir: Option<PathBuf>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            per_point_rate: DEFAULT_PER_POINT_RATE,
            override_policy: OverridePolicy::default(),
            data_dir: None,
        }
    }
}

impl PricingConfig {
    pub fn engine(&self) -> PricingEngine {
        PricingEngine::new(self.per_point_rate, self.override_policy)
    }

    fn apply_env(mut self) -> Self {
        if let Ok(url) = std::env::var(STORE_URL_ENV) {
            if !url.trim().is_empty() {
                self.store.base_url = url;
            }
        }
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config directory unavailable")]
    StorageUnavailable,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] SerdeError),
}

pub fn config_file() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join("config.json"))
}

/// Loads the config from the platform config dir; defaults when absent or unreadable.
pub fn load_config() -> PricingConfig {
    let config = match config_file() {
        Some(path) => match read_config(&path) {
            Ok(config) => config,
            Err(ConfigError::Io(err)) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "[config] No config file, using defaults");
                PricingConfig::default()
            }
            Err(err) => {
                warn!(path = %path.display(), "[config] Failed to load config: {err}");
                PricingConfig::default()
            }
        },
        None => PricingConfig::default(),
    };
    config.apply_env()
}

pub fn read_config(path: &Path) -> Result<PricingConfig, ConfigError> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

pub fn save_config(config: &PricingConfig) -> Result<(), ConfigError> {
    let path = config_file().ok_or(ConfigError::StorageUnavailable)?;
    write_config(&path, config)
}

pub fn write_config(path: &Path, config: &PricingConfig) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json)?;
    Ok(())
}
