//! Configuration module for the school records backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

/// Where entity collections are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// One JSON file per entity under the data directory
    Json,
    /// In-process only, nothing survives a restart
    Memory,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(StorageBackend::Json),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(ConfigError::InvalidStorage(other.to_string())),
        }
    }
}

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidBindAddr(String),
    InvalidStorage(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidBindAddr(value) => {
                write!(f, "Invalid SCHOOL_BIND_ADDR format: {}", value)
            }
            ConfigError::InvalidStorage(value) => {
                write!(f, "Invalid SCHOOL_STORAGE '{}' (expected json or memory)", value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding one `<entity>.json` file per collection
    pub data_dir: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Storage backend for the collections
    pub storage: StorageBackend,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let data_dir = env::var("SCHOOL_DATA_DIR")
            .unwrap_or_else(|_| "./data".to_string())
            .into();

        let bind_addr = env::var("SCHOOL_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3333".to_string());
        let bind_addr = bind_addr
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr(bind_addr))?;

        let log_level = env::var("SCHOOL_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let storage = env::var("SCHOOL_STORAGE")
            .map(|value| value.parse::<StorageBackend>())
            .unwrap_or(Ok(StorageBackend::Json))?;

        Ok(Self {
            data_dir,
            bind_addr,
            log_level,
            storage,
        })
    }
}
