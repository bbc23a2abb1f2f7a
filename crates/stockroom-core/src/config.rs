//! Configuration loading for the stockroom apps.
//!
//! Loads a TOML file with the following structure:
//!
//! ```toml
//! [store]
//! url = "https://api.sheetbest.com/sheets/<sheet-id>"
//! # Column the store keys replace/delete calls on (default "compositeId")
//! key_field = "compositeId"
//!
//! [[users]]
//! username = "meera"
//! password = "shop-owner"
//! role = "owner"
//!
//! [[users]]
//! username = "dev"
//! password = "floor"
//! role = "user"
//! ```
//!
//! The path is `$STOCKROOM_CONFIG` when set, otherwise
//! `<platform config dir>/stockroom/stockroom.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::access::{AccessPolicy, UserEntry};
use crate::error::ConfigError;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "STOCKROOM_CONFIG";

/// Application configuration: where the row store lives and who may log in.
#[derive(Debug, Clone, Deserialize)]
pub struct StockroomConfig {
    pub store: StoreConfig,
    #[serde(default)]
    pub users: Vec<UserEntry>,
}

/// Remote row store location.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the row collection.
    pub url: String,
    /// Column replace/delete calls address rows by.
    #[serde(default = "default_key_field")]
    pub key_field: String,
}

fn default_key_field() -> String {
    "compositeId".to_string()
}

impl StockroomConfig {
    /// Load from `$STOCKROOM_CONFIG` or the platform default path.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| Self::default_path());
        Self::load_from(&path)
    }

    /// The platform default config location.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("stockroom")
            .join("stockroom.toml")
    }

    /// Load and validate a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_toml(&raw)
    }

    /// Parse and validate a TOML string.
    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the loaded values before anything uses them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.store.url.trim();
        if url.is_empty() {
            return Err(ConfigError::Invalid("store.url must not be empty".to_string()));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "store.url must be an http(s) URL, got {url}"
            )));
        }
        if self.store.key_field.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "store.key_field must not be empty".to_string(),
            ));
        }
        if self.users.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one [[users]] entry is required".to_string(),
            ));
        }
        for user in &self.users {
            if user.username.trim().is_empty() || user.password.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "user entry '{}' needs both username and password",
                    user.username
                )));
            }
        }
        Ok(())
    }

    /// The access policy configured in this file.
    pub fn access_policy(&self) -> AccessPolicy {
        AccessPolicy::new(self.users.clone())
    }
}
