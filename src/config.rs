//! Service configuration.
//!
//! Resolved in three layers: built-in defaults, an optional TOML file named by
//! `QUILL_CONFIG`, then individual `QUILL_*` environment overrides.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_VAR: &str = "QUILL_CONFIG";
pub const BIND_VAR: &str = "QUILL_BIND";
pub const DATABASE_URL_VAR: &str = "QUILL_DATABASE_URL";
pub const REQUEST_TIMEOUT_VAR: &str = "QUILL_REQUEST_TIMEOUT_MS";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// Store location, e.g. `memory://quill`.
    pub database_url: String,
    /// Upper bound on any single store call made while serving a request.
    pub request_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            database_url: "memory://quill".to_owned(),
            request_timeout_ms: 5_000,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for {name}: {value:?}")]
    InvalidVar { name: &'static str, value: String },
}

impl Config {
    /// Loads configuration from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let base = match std::env::var_os(CONFIG_FILE_VAR) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        base.with_overrides(|name| std::env::var(name).ok())
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Parses a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Applies `QUILL_*` overrides, reading each variable through `lookup`.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(value) = lookup(BIND_VAR) {
            self.bind_addr = value
                .parse()
                .map_err(|_| ConfigError::InvalidVar { name: BIND_VAR, value })?;
        }
        if let Some(value) = lookup(DATABASE_URL_VAR) {
            self.database_url = value;
        }
        if let Some(value) = lookup(REQUEST_TIMEOUT_VAR) {
            self.request_timeout_ms = value
                .parse()
                .map_err(|_| ConfigError::InvalidVar { name: REQUEST_TIMEOUT_VAR, value })?;
        }
        Ok(self)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
