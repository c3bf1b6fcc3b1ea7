//! App configuration: an optional RON file plus environment overrides.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use veracity_core::InputMode;
use veracity_engine::{PredictSettings, DEFAULT_API_BASE};
use veracity_logging::veracity_info;

pub const CONFIG_FILENAME: &str = "veracity.ron";
pub const ENV_CONFIG_PATH: &str = "VERACITY_CONFIG";
pub const ENV_API_BASE: &str = "VERACITY_API_BASE";
pub const ENV_REQUEST_TIMEOUT: &str = "VERACITY_REQUEST_TIMEOUT_SECS";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartMode {
    #[default]
    Text,
    Url,
}

impl From<StartMode> for InputMode {
    fn from(mode: StartMode) -> Self {
        match mode {
            StartMode::Text => InputMode::Text,
            StartMode::Url => InputMode::Url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_response_bytes: u64,
    pub log_to_file: bool,
    pub start_mode: StartMode,
}

impl Default for AppConfig {
    fn default() -> Self {
        let settings = PredictSettings::default();
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            connect_timeout_secs: settings.connect_timeout.as_secs(),
            request_timeout_secs: settings.request_timeout.as_secs(),
            max_response_bytes: settings.max_bytes,
            log_to_file: true,
            start_mode: StartMode::Text,
        }
    }
}

impl AppConfig {
    /// Loads from `$VERACITY_CONFIG` or `./veracity.ron`, then applies
    /// environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os(ENV_CONFIG_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));
        let mut config = Self::from_file(&path)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// A missing file yields defaults; an unreadable or malformed one is an error.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let config: Self = ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        veracity_info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(base) = lookup(ENV_API_BASE).filter(|v| !v.trim().is_empty()) {
            self.api_base = base.trim().to_string();
        }
        if let Some(raw) = lookup(ENV_REQUEST_TIMEOUT) {
            self.request_timeout_secs =
                raw.trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue {
                        key: ENV_REQUEST_TIMEOUT,
                        value: raw.clone(),
                    })?;
        }
        self.validate()
    }

    /// A zero timeout would fail every request immediately.
    fn validate(&self) -> Result<(), ConfigError> {
        for (key, secs) in [
            ("connect_timeout_secs", self.connect_timeout_secs),
            ("request_timeout_secs", self.request_timeout_secs),
        ] {
            if secs == 0 {
                return Err(ConfigError::InvalidValue {
                    key,
                    value: secs.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn predict_settings(&self) -> PredictSettings {
        PredictSettings {
            api_base: self.api_base.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_response_bytes,
        }
    }
}
