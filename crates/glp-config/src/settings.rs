//! Client configuration.
//!
//! `AppConfig` is deserialized from TOML. Every section has defaults, so an
//! empty document yields a working in-memory setup.
//!
//! Example:
//! ```toml
//! [backend]
//! kind = "http"
//! base_url = "https://api.example.com/v1"
//! timeout_secs = 10
//!
//! [countdown]
//! refresh_secs = 60
//! ```

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use glp_contracts::error::{GlpError, GlpResult};

use crate::catalog::MedicationCatalog;

/// The configuration shipped with the client.
pub const DEFAULT_CONFIG: &str = include_str!("../defaults/client.toml");

/// Which backend adapter to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    #[default]
    Memory,
    Http,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub kind: BackendKind,
    /// Required when `kind = "http"`.
    pub base_url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: BackendKind::Memory,
            base_url: None,
            timeout_secs: 15,
        }
    }
}

/// Settings for the in-memory adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Simulated per-call latency. Zero disables it.
    pub latency_ms: u64,
    /// Seed a handful of sample alerts for every new user.
    pub sample_alerts: bool,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self { latency_ms: 0, sample_alerts: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountdownConfig {
    pub refresh_secs: u64,
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self { refresh_secs: 60 }
    }
}

/// The top-level client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub memory: MemoryConfig,
    pub countdown: CountdownConfig,
    /// Replaces the embedded medication catalog when set.
    pub catalog_path: Option<PathBuf>,
}

impl AppConfig {
    /// Parse `s` as TOML and validate it.
    ///
    /// Returns `GlpError::ConfigError` if the TOML is malformed or the values
    /// are inconsistent (e.g. an HTTP backend without a base URL).
    pub fn from_toml_str(s: &str) -> GlpResult<Self> {
        let config: AppConfig = toml::from_str(s).map_err(|e| GlpError::ConfigError {
            reason: format!("failed to parse client config TOML: {}", e),
        })?;
        config.validate()?;
        debug!(backend = ?config.backend.kind, "client configuration loaded");
        Ok(config)
    }

    /// Read and parse the file at `path`.
    pub fn from_file(path: &Path) -> GlpResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| GlpError::ConfigError {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// The embedded default configuration.
    pub fn builtin() -> GlpResult<Self> {
        Self::from_toml_str(DEFAULT_CONFIG)
    }

    fn validate(&self) -> GlpResult<()> {
        if self.backend.kind == BackendKind::Http {
            match self.backend.base_url.as_deref() {
                None => {
                    return Err(GlpError::ConfigError {
                        reason: "backend.base_url is required when backend.kind = \"http\"".to_string(),
                    })
                }
                Some(url) if !(url.starts_with("http://") || url.starts_with("https://")) => {
                    return Err(GlpError::ConfigError {
                        reason: format!("backend.base_url '{}' must start with http:// or https://", url),
                    })
                }
                Some(_) => {}
            }
        }
        if self.backend.timeout_secs == 0 {
            return Err(GlpError::ConfigError {
                reason: "backend.timeout_secs must be greater than zero".to_string(),
            });
        }
        if self.countdown.refresh_secs == 0 {
            return Err(GlpError::ConfigError {
                reason: "countdown.refresh_secs must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.backend.timeout_secs)
    }

    pub fn memory_latency(&self) -> Duration {
        Duration::from_millis(self.memory.latency_ms)
    }

    pub fn countdown_refresh(&self) -> Duration {
        Duration::from_secs(self.countdown.refresh_secs)
    }

    /// The catalog at `catalog_path`, or the embedded one.
    pub fn load_catalog(&self) -> GlpResult<MedicationCatalog> {
        match &self.catalog_path {
            Some(path) => MedicationCatalog::from_file(path),
            None => MedicationCatalog::builtin(),
        }
    }
}
