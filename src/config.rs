//! Configuration file handling.
//!
//! Settings live in `~/.airdash/config.toml`. Every field is optional and
//! falls back to the built-in default; command-line flags override both.

use crate::types::{AirdashError, Result};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Published airline on-time performance sample
pub const DEFAULT_DATASET_URL: &str = "https://cf-courses-data.s3.us.cloud-object-storage.appdomain.cloud/IBMDeveloperSkillsNetwork-DV0101EN-SkillsNetwork/Data%20Files/airline_data.csv";

/// Year shown when the dashboard opens
pub const DEFAULT_YEAR: i32 = 2010;

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub dataset: DatasetConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// Where the dataset comes from and how long a download stays fresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    #[serde(default = "default_url")]
    pub url: String,

    /// Hours before a cached download is refreshed
    #[serde(default = "default_cache_ttl_hours")]
    pub cache_ttl_hours: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            cache_ttl_hours: default_cache_ttl_hours(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_url() -> String {
    DEFAULT_DATASET_URL.to_string()
}

fn default_cache_ttl_hours() -> u64 {
    168 // one week; the published file rarely changes
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// Dashboard display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_year")]
    pub default_year: i32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_year: default_year(),
        }
    }
}

fn default_year() -> i32 {
    DEFAULT_YEAR
}

/// airdash state directory (`~/.airdash`)
pub fn airdash_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new()
        .ok_or_else(|| AirdashError::Config("Cannot determine home directory".into()))?;
    Ok(base_dirs.home_dir().join(".airdash"))
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            AirdashError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
            .map_err(|e| AirdashError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load an explicit config file, or the default one if it exists.
    /// A missing default file is not an error.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match airdash_dir() {
            Ok(dir) => {
                let path = dir.join("config.toml");
                if path.exists() {
                    Self::load(&path)
                } else {
                    Ok(Self::default())
                }
            }
            Err(_) => Ok(Self::default()),
        }
    }

    /// Cache TTL in seconds
    pub fn cache_ttl_secs(&self) -> i64 {
        (self.dataset.cache_ttl_hours.saturating_mul(3600)).min(i64::MAX as u64) as i64
    }
}
