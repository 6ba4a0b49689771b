//! Lookup server configuration (dtool.json + environment)

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Key holding the lookup server URL, in dtool.json and the environment
pub const SERVER_URL_KEY: &str = "DTOOL_LOOKUP_SERVER_URL";

/// Key holding the lookup server bearer token
pub const SERVER_TOKEN_KEY: &str = "DTOOL_LOOKUP_SERVER_TOKEN";

/// Key holding the request timeout in seconds
pub const SERVER_TIMEOUT_KEY: &str = "DTOOL_LOOKUP_SERVER_TIMEOUT";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Subset of dtool.json we read. Unknown keys (storage broker settings etc.)
/// are ignored.
#[derive(Debug, Default, Deserialize)]
struct DtoolConfigFile {
    #[serde(rename = "DTOOL_LOOKUP_SERVER_URL", default)]
    server_url: Option<String>,

    #[serde(rename = "DTOOL_LOOKUP_SERVER_TOKEN", default)]
    token: Option<String>,

    #[serde(rename = "DTOOL_LOOKUP_SERVER_TIMEOUT", default)]
    timeout_secs: Option<u64>,
}

/// Connection settings for the lookup server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupConfig {
    /// Base URL, without trailing slash
    pub server_url: Option<String>,

    /// Bearer token
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            server_url: None,
            token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl LookupConfig {
    /// Default location of the dtool config file (~/.config/dtool/dtool.json)
    pub fn default_path() -> Option<PathBuf> {
        directories::BaseDirs::new()
            .map(|dirs| dirs.home_dir().join(".config").join("dtool").join("dtool.json"))
    }

    /// Resolve configuration: defaults, then the config file, then the
    /// environment.
    ///
    /// An explicitly given path must exist; the default path is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => {
                    tracing::debug!("No dtool config file found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load config from a dtool.json file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(path.display().to_string(), e.to_string()))?;

        tracing::debug!("Loaded dtool config from {}", path.display());
        Self::from_json(&contents)
    }

    /// Load config from dtool.json contents
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let file: DtoolConfigFile = serde_json::from_str(json)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        let mut config = Self::default();
        if let Some(url) = file.server_url {
            config.server_url = Some(normalize_url(&url));
        }
        if file.token.is_some() {
            config.token = file.token;
        }
        if let Some(timeout) = file.timeout_secs {
            config.timeout_secs = timeout;
        }

        Ok(config)
    }

    /// Override settings from environment-style lookups. Empty values are
    /// treated as unset.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(SERVER_URL_KEY) {
            self.server_url = Some(normalize_url(&url));
        }
        if let Some(token) = get(SERVER_TOKEN_KEY) {
            self.token = Some(token);
        }
        if let Some(timeout) = get(SERVER_TIMEOUT_KEY) {
            self.timeout_secs = timeout
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(SERVER_TIMEOUT_KEY.to_string(), timeout))?;
        }

        Ok(())
    }

    /// Server URL, or an error naming the setting to provide
    pub fn require_server_url(&self) -> Result<&str, ConfigError> {
        self.server_url.as_deref().ok_or(ConfigError::MissingServerUrl)
    }
}

fn normalize_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Config error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {0}: {1}")]
    IoError(String, String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid value for {0}: {1:?}")]
    InvalidValue(String, String),

    #[error("No lookup server configured. Set DTOOL_LOOKUP_SERVER_URL in dtool.json or the environment.")]
    MissingServerUrl,
}
