// Configuration management for the grid tracker

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::clients::coingecko::DEFAULT_BASE_URL;
use crate::core::types::{
    DEFAULT_BUY_THRESHOLD, DEFAULT_CAPITAL, DEFAULT_GRID_SIZE, DEFAULT_POLL_INTERVAL_SECS,
    DEFAULT_SELL_THRESHOLD, DEFAULT_VS_CURRENCY,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    pub capital: f64,
    pub grid_size: usize,
    pub buy_threshold: f64,
    pub sell_threshold: f64,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    #[serde(default = "default_vs_currency")]
    pub vs_currency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_asset_list_file")]
    pub asset_list_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub enable_price_logging: bool,
    pub enable_event_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub tracker: TrackerConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

// Default value functions
fn default_poll_interval() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}
fn default_vs_currency() -> String {
    DEFAULT_VS_CURRENCY.to_string()
}
fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_request_timeout() -> u64 {
    10
}
fn default_asset_list_file() -> String {
    "list.json".to_string()
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            capital: DEFAULT_CAPITAL,
            grid_size: DEFAULT_GRID_SIZE,
            buy_threshold: DEFAULT_BUY_THRESHOLD,
            sell_threshold: DEFAULT_SELL_THRESHOLD,
            poll_interval_secs: default_poll_interval(),
            vs_currency: default_vs_currency(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
            asset_list_file: default_asset_list_file(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_price_logging: true,
            enable_event_logging: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tracker: TrackerConfig::default(),
            api: ApiConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::FileRead(e.to_string()))?;

        let config: Config =
            toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;

        fs::write(path, content).map_err(|e| ConfigError::FileWrite(e.to_string()))?;

        Ok(())
    }

    /// Load configuration from file, or create default if file doesn't exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            let config = Self::default();
            config.to_file(&path)?;
            println!("📁 Created default config file: {}", path.as_ref().display());
            Ok(config)
        }
    }

    /// Validate configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        if self.tracker.capital <= 0.0 || !self.tracker.capital.is_finite() {
            return Err(ConfigError::Validation(
                "capital must be positive".to_string(),
            ));
        }

        if self.tracker.grid_size == 0 {
            return Err(ConfigError::Validation(
                "grid_size must be greater than 0".to_string(),
            ));
        }

        if !(0.0..1.0).contains(&self.tracker.buy_threshold) || self.tracker.buy_threshold == 0.0 {
            return Err(ConfigError::Validation(
                "buy_threshold must be between 0 and 1 (exclusive)".to_string(),
            ));
        }

        if !(0.0..1.0).contains(&self.tracker.sell_threshold) || self.tracker.sell_threshold == 0.0
        {
            return Err(ConfigError::Validation(
                "sell_threshold must be between 0 and 1 (exclusive)".to_string(),
            ));
        }

        if self.tracker.poll_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "poll_interval_secs must be greater than 0".to_string(),
            ));
        }

        if self.tracker.vs_currency.trim().is_empty() {
            return Err(ConfigError::Validation(
                "vs_currency must not be empty".to_string(),
            ));
        }

        if self.api.request_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.api.asset_list_file.trim().is_empty() {
            return Err(ConfigError::Validation(
                "asset_list_file must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(String),

    #[error("Failed to write config file: {0}")]
    FileWrite(String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Failed to serialize config: {0}")]
    Serialize(String),

    #[error("Configuration validation error: {0}")]
    Validation(String),
}
