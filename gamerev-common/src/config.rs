//! Configuration loading and resolution
//!
//! Settings are resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (`GAMEREV_*`, wired through clap's `env`)
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing TOML file at the default location is not an error; the service
//! starts on compiled defaults.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 5000;

/// Default bind host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Origins of the development client allowed by CORS
pub const DEFAULT_CORS_ORIGINS: [&str; 3] = [
    "http://localhost:5173",
    "http://localhost:5174",
    "http://localhost:5175",
];

/// Bootstrap configuration loaded from TOML file
///
/// Every field is optional; whatever is missing falls through to the
/// compiled defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Address to bind the HTTP server on
    #[serde(default)]
    pub host: Option<String>,

    /// HTTP server port
    #[serde(default)]
    pub port: Option<u16>,

    /// Path to the SQLite document database
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Origins allowed to call the API from a browser
    #[serde(default)]
    pub cors_origins: Option<Vec<String>>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default)]
    pub level: Option<String>,
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database_path: Option<PathBuf>,
    pub log_level: Option<String>,
    /// Explicit config file; must exist when given
    pub config_file: Option<PathBuf>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub cors_origins: Vec<String>,
    pub log_level: String,
}

impl ServiceConfig {
    /// Resolve configuration from overrides, TOML file and defaults
    pub fn resolve(overrides: ConfigOverrides) -> Result<Self> {
        let toml_config = match &overrides.config_file {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                load_toml_config(path)?
            }
            None => match default_config_path() {
                Some(path) if path.exists() => load_toml_config(&path)?,
                Some(path) => {
                    debug!("No config file at {}, using defaults", path.display());
                    TomlConfig::default()
                }
                None => TomlConfig::default(),
            },
        };

        Ok(Self::merge(overrides, toml_config))
    }

    /// Merge overrides over a loaded TOML config over compiled defaults
    pub fn merge(overrides: ConfigOverrides, toml_config: TomlConfig) -> Self {
        Self {
            host: overrides
                .host
                .or(toml_config.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: overrides.port.or(toml_config.port).unwrap_or(DEFAULT_PORT),
            database_path: overrides
                .database_path
                .or(toml_config.database_path)
                .unwrap_or_else(default_database_path),
            cors_origins: toml_config.cors_origins.unwrap_or_else(|| {
                DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect()
            }),
            log_level: overrides
                .log_level
                .or(toml_config.logging.level)
                .unwrap_or_else(|| "info".to_string()),
        }
    }

    /// `host:port` string for binding the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    let config = toml::from_str::<TomlConfig>(&content)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
    info!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Default configuration file location (`<config dir>/gamerev/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("gamerev").join("config.toml"))
}

/// OS-dependent default database location
pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("gamerev"))
        .unwrap_or_else(|| PathBuf::from("./gamerev_data"))
        .join("gamerev.db")
}
