use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::adapters::session::file_session_store::{DEFAULT_STORAGE_KEY, FileSessionStore};
use crate::core::errors::{AdtrailError, Result};

/// Backend used when neither the config file nor `--api-url` names one.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Top-level adtrail configuration read from `config.toml`.
///
/// Every section is optional; a missing file behaves like an empty one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub session: SessionSection,
    #[serde(default)]
    pub export: ExportSection,
}

impl AppConfig {
    /// Load the configuration.
    ///
    /// An explicit `path` must exist. Without one, the default location
    /// is read if present and defaults are used otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => {
                if !p.exists() {
                    return Err(AdtrailError::InvalidConfig {
                        detail: format!("config file not found: {}", p.display()),
                    });
                }
                p.to_path_buf()
            }
            None => match Self::default_path() {
                Some(p) if p.exists() => p,
                _ => return Ok(Self::default()),
            },
        };

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = toml::from_str(&content).map_err(|e| AdtrailError::InvalidConfig {
            detail: format!("Failed to parse {}: {e}", config_path.display()),
        })?;

        if config.api.timeout_secs == 0 {
            return Err(AdtrailError::InvalidConfig {
                detail: "api.timeout_secs must be greater than zero".into(),
            });
        }
        if config.session.storage_key.trim().is_empty() {
            return Err(AdtrailError::InvalidConfig {
                detail: "session.storage_key must not be empty".into(),
            });
        }

        tracing::debug!(path = %config_path.display(), "loaded configuration");
        Ok(config)
    }

    /// Default location: `<config_dir>/adtrail/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("adtrail").join("config.toml"))
    }

    /// API base URL: the override when given, else the configured one.
    pub fn api_url(&self, cli_override: Option<&str>) -> String {
        cli_override
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(self.api.base_url.as_str())
            .trim_end_matches('/')
            .to_string()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    /// Session file: the configured path, else the default location.
    pub fn session_path(&self) -> Option<PathBuf> {
        self.session
            .file
            .clone()
            .or_else(FileSessionStore::default_path)
    }

    /// Directory export files are written to (current directory by default).
    pub fn export_dir(&self) -> PathBuf {
        self.export
            .directory
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// The `[api]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSection {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// The `[session]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionSection {
    pub file: Option<PathBuf>,
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            file: None,
            storage_key: default_storage_key(),
        }
    }
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

/// The `[export]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportSection {
    pub directory: Option<PathBuf>,
}
