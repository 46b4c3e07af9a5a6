//! Application configuration
//!
//! Loaded from a TOML file. Every section and field has a default, so a
//! partial file (or none at all) still yields a runnable configuration.
//!
//! ```toml
//! [server]
//! api_port = 8080
//!
//! [database]
//! url = "sqlite:///var/lib/airhotel/airhotel.db?mode=rwc"
//!
//! [reservations]
//! default_currency = "EUR"
//! no_show_grace_days = 1
//! max_stay_nights = 30
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::DEFAULT_MAX_STAY_NIGHTS;

/// Environment variable holding an explicit config path
pub const CONFIG_ENV: &str = "AIRHOTEL_CONFIG";

const MAX_NO_SHOW_GRACE_DAYS: i64 = 365;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSection,
    pub logging: LoggingConfig,
    pub security: SecurityConfig,
    pub reservations: ReservationsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub api_host: String,
    pub api_port: u16,
    /// Seconds to wait for in-flight work on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_host: "0.0.0.0".to_string(),
            api_port: 8080,
            shutdown_timeout: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: String,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: "sqlite://./airhotel.db?mode=rwc".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// EnvFilter directive, e.g. "info" or "airhotel=debug,sea_orm=warn"
    pub level: String,
    /// "text" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "change-me-in-production".to_string(),
            jwt_expiration_hours: 24,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReservationsConfig {
    /// Currency used when a booking does not name one
    pub default_currency: String,
    pub no_show_sweep_enabled: bool,
    pub no_show_sweep_interval_secs: u64,
    /// Days after check-in before a Confirmed reservation becomes a no-show
    pub no_show_grace_days: i64,
    /// Longest stay a booking or date change may request
    pub max_stay_nights: i32,
}

impl Default for ReservationsConfig {
    fn default() -> Self {
        Self {
            default_currency: "USD".to_string(),
            no_show_sweep_enabled: true,
            no_show_sweep_interval_secs: 3600,
            no_show_grace_days: 1,
            max_stay_nights: DEFAULT_MAX_STAY_NIGHTS,
        }
    }
}

impl AppConfig {
    /// Read and validate the config file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&raw).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let currency = &self.reservations.default_currency;
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(ConfigError::Invalid(format!(
                "reservations.default_currency must be a 3-letter upper-case code, got {:?}",
                currency
            )));
        }
        if self.security.jwt_secret.is_empty() {
            return Err(ConfigError::Invalid("security.jwt_secret is empty".into()));
        }
        if self.security.jwt_expiration_hours <= 0 {
            return Err(ConfigError::Invalid(
                "security.jwt_expiration_hours must be positive".into(),
            ));
        }
        if self.reservations.no_show_sweep_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "reservations.no_show_sweep_interval_secs must be positive".into(),
            ));
        }
        if !(0..=MAX_NO_SHOW_GRACE_DAYS).contains(&self.reservations.no_show_grace_days) {
            return Err(ConfigError::Invalid(format!(
                "reservations.no_show_grace_days must be between 0 and {}",
                MAX_NO_SHOW_GRACE_DAYS
            )));
        }
        if self.reservations.max_stay_nights < 1 {
            return Err(ConfigError::Invalid(
                "reservations.max_stay_nights must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// `$AIRHOTEL_CONFIG`, else `~/.config/airhotel/config.toml`, else
/// `./config.toml` when no home directory is known.
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return PathBuf::from(path);
    }
    dirs_next::config_dir()
        .map(|dir| dir.join("airhotel").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}
