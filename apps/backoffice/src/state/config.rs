//! # Configuration State
//!
//! Application configuration loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`JIKO_*`)
//! 2. Config file (`jiko.toml` in the platform config dir, or `JIKO_CONFIG`)
//! 3. Defaults (this file)
//!
//! ## Example `jiko.toml`
//! ```toml
//! store_name = "Mama Oliech"
//! currency_code = "KES"
//! currency_symbol = "KSh"
//! default_vat_rate = 0.16
//! log_filter = "info,jiko=debug,sqlx=warn"
//!
//! [storage]
//! backend = "sqlite"
//! path = "/var/lib/jiko/jiko.db"
//! ```
//!
//! Configuration is read-only after load, so no mutex needed.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use directories::ProjectDirs;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use jiko_core::money::Money;
use jiko_core::types::VatRate;
use jiko_core::validation::validate_vat_rate;

/// Default tracing filter when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LOG_FILTER: &str = "info,jiko=debug,sqlx=warn";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Invalid value for {key} ({value}): {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(key: &str, value: impl ToString, reason: impl ToString) -> Self {
        ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Where collections are stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum StorageConfig {
    /// Lost on exit. Demos and tests.
    Memory,

    /// SQLite file, created if missing.
    Sqlite { path: PathBuf },
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig::Sqlite {
            path: default_database_path(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Shown on receipts and the dashboard header
    pub store_name: String,

    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// VAT rate pre-filled for new menu items
    pub default_vat_rate: VatRate,

    pub storage: StorageConfig,

    /// `tracing_subscriber::EnvFilter` directives
    pub log_filter: String,
}

impl Default for AppConfig {
    /// ## Default Values
    /// - Store: "Jiko Kitchen"
    /// - Currency: KES (KSh)
    /// - VAT: 16%
    /// - Storage: SQLite under the platform data dir
    fn default() -> Self {
        AppConfig {
            store_name: "Jiko Kitchen".to_string(),
            currency_code: "KES".to_string(),
            currency_symbol: "KSh".to_string(),
            default_vat_rate: VatRate::default(),
            storage: StorageConfig::default(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    /// Defaults, then the config file if there is one, then `JIKO_*`
    /// variables; validated before it is returned.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os("JIKO_CONFIG")
            .map(PathBuf::from)
            .or_else(default_config_path);

        let mut config = match path {
            Some(path) if path.exists() => AppConfig::from_file(&path)?,
            _ => AppConfig::default(),
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&raw).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Applies environment overrides read through `var`.
    ///
    /// ## Environment Variables
    /// - `JIKO_STORE_NAME`: Override store name
    /// - `JIKO_CURRENCY`: Override currency code
    /// - `JIKO_VAT_RATE`: Default VAT in percent (e.g., "16")
    /// - `JIKO_STORAGE`: `memory` or `sqlite`
    /// - `JIKO_DB_PATH`: SQLite file (implies `sqlite`)
    /// - `JIKO_LOG`: Tracing filter
    pub fn apply_env<F>(&mut self, var: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(store_name) = var("JIKO_STORE_NAME") {
            self.store_name = store_name;
        }

        if let Some(currency) = var("JIKO_CURRENCY") {
            self.currency_code = currency.trim().to_uppercase();
        }

        if let Some(raw) = var("JIKO_VAT_RATE") {
            let percent = Decimal::from_str(raw.trim())
                .map_err(|_| ConfigError::invalid("JIKO_VAT_RATE", &raw, "not a number"))?;
            self.default_vat_rate = VatRate::new(percent / Decimal::from(100));
        }

        if let Some(raw) = var("JIKO_STORAGE") {
            self.storage = match raw.trim().to_lowercase().as_str() {
                "memory" => StorageConfig::Memory,
                "sqlite" => match &self.storage {
                    StorageConfig::Sqlite { .. } => self.storage.clone(),
                    StorageConfig::Memory => StorageConfig::default(),
                },
                _ => {
                    return Err(ConfigError::invalid(
                        "JIKO_STORAGE",
                        &raw,
                        "expected memory or sqlite",
                    ))
                }
            };
        }

        if let Some(path) = var("JIKO_DB_PATH") {
            self.storage = StorageConfig::Sqlite {
                path: PathBuf::from(path),
            };
        }

        if let Some(filter) = var("JIKO_LOG") {
            self.log_filter = filter;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store_name.trim().is_empty() {
            return Err(ConfigError::invalid("store_name", "", "must not be empty"));
        }

        if self.currency_code.len() != 3 || !self.currency_code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::invalid(
                "currency_code",
                &self.currency_code,
                "expected a three-letter ISO 4217 code",
            ));
        }

        validate_vat_rate(self.default_vat_rate)
            .map_err(|e| ConfigError::invalid("default_vat_rate", self.default_vat_rate, e))?;

        if let StorageConfig::Sqlite { path } = &self.storage {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::invalid("storage.path", "", "must not be empty"));
            }
        }

        Ok(())
    }

    /// Formats an amount with the configured symbol.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = AppConfig::default();
    /// assert_eq!(config.format_currency(Money::from_major(522)), "KSh 522.00");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let value = amount.amount();
        format!(
            "{}{} {:.2}",
            if value.is_sign_negative() && !value.is_zero() { "-" } else { "" },
            self.currency_symbol,
            value.abs()
        )
    }
}

/// `jiko.toml` in the platform config directory.
///
/// - **Linux**: `~/.config/jiko-pos/jiko.toml`
/// - **macOS**: `~/Library/Application Support/com.jiko.pos/jiko.toml`
/// - **Windows**: `%APPDATA%\jiko\pos\config\jiko.toml`
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "jiko", "pos").map(|dirs| dirs.config_dir().join("jiko.toml"))
}

fn default_database_path() -> PathBuf {
    ProjectDirs::from("com", "jiko", "pos")
        .map(|dirs| dirs.data_dir().join("jiko.db"))
        .unwrap_or_else(|| PathBuf::from("jiko.db"))
}
