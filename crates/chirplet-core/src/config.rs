//! # Estimator Configuration
//!
//! YAML settings for the estimator and its logging. Every field has a
//! default, so a file only needs the values it changes:
//!
//! ```yaml
//! estimator:
//!   alpha1_grid: { max: 4.0, points: 256 }
//! logging:
//!   level: debug
//! ```
//!
//! [`ChirpletConfig::load`] takes the first file that exists from:
//!
//! | Order | Location                                  |
//! |-------|-------------------------------------------|
//! | 1     | `$CHIRPLET_CONFIG`                        |
//! | 2     | `./chirplet.yaml`                         |
//! | 3     | per-user config dir (`directories`)       |
//! | 4     | `/etc/chirplet/config.yaml`               |
//!
//! and falls back to the built-in defaults when none does.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::grid::GridSpec;
use crate::logging::LogConfig;
use crate::time::DEFAULT_SPACING_TOLERANCE;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "CHIRPLET_CONFIG";

/// Configuration failure
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// File could not be read or written
    Io { path: PathBuf, message: String },
    /// YAML syntax or shape error
    Yaml(String),
    /// Well-formed YAML with an unusable value
    Invalid { field: &'static str, reason: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io { path, message } => {
                write!(f, "config file {}: {}", path.display(), message)
            }
            ConfigError::Yaml(message) => write!(f, "malformed config: {}", message),
            ConfigError::Invalid { field, reason } => {
                write!(f, "invalid config value `{}`: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Where a loaded configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// File named by `$CHIRPLET_CONFIG`
    Env(PathBuf),
    /// First existing file on the search path
    File(PathBuf),
    /// No file found
    Defaults,
}

/// Settings of [`ParameterEstimator`](crate::estimator::ParameterEstimator)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Chirp-rate candidates (stage 4)
    pub alpha2_grid: GridSpec,
    /// Bandwidth factor candidates (stage 5)
    pub alpha1_grid: GridSpec,
    /// Bandwidth factor held fixed during the chirp-rate sweep
    pub chirp_search_alpha1: f64,
    /// Relative tolerance on uniform time spacing
    pub spacing_tolerance: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            alpha2_grid: GridSpec::default(),
            alpha1_grid: GridSpec::default(),
            chirp_search_alpha1: 1.0,
            spacing_tolerance: DEFAULT_SPACING_TOLERANCE,
        }
    }
}

impl EstimatorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let grids = [
            ("alpha2_grid", &self.alpha2_grid),
            ("alpha1_grid", &self.alpha1_grid),
        ];
        for (field, grid) in grids {
            grid.validate().map_err(|e| ConfigError::Invalid {
                field,
                reason: e.to_string(),
            })?;
        }

        if !self.chirp_search_alpha1.is_finite() {
            return Err(ConfigError::Invalid {
                field: "chirp_search_alpha1",
                reason: format!("must be finite, got {}", self.chirp_search_alpha1),
            });
        }

        // NaN fails this too
        if !(self.spacing_tolerance >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "spacing_tolerance",
                reason: format!("must be >= 0, got {}", self.spacing_tolerance),
            });
        }

        Ok(())
    }
}

/// Top-level configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChirpletConfig {
    pub version: String,
    pub estimator: EstimatorConfig,
    pub logging: LogConfig,
}

impl Default for ChirpletConfig {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            estimator: EstimatorConfig::default(),
            logging: LogConfig::default(),
        }
    }
}

impl ChirpletConfig {
    /// Load from the search path, falling back to defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::discover().map(|(config, _)| config)
    }

    /// Like [`load`](Self::load), also reporting which file was used.
    pub fn discover() -> Result<(Self, ConfigSource), ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from) {
            if path.is_file() {
                let config = Self::load_from(&path)?;
                return Ok((config, ConfigSource::Env(path)));
            }
            tracing::warn!(path = %path.display(), "{} names a missing file", CONFIG_ENV_VAR);
        }

        match Self::config_search_paths().into_iter().find(|p| p.is_file()) {
            Some(path) => {
                let config = Self::load_from(&path)?;
                Ok((config, ConfigSource::File(path)))
            }
            None => {
                tracing::debug!("no config file found, using defaults");
                Ok((Self::default(), ConfigSource::Defaults))
            }
        }
    }

    /// Read, parse and validate one file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config = Self::parse(&text)?;
        config.validate()?;
        tracing::info!(path = %path.display(), "loaded chirplet config");
        Ok(config)
    }

    /// Parse YAML text. Values are not validated.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::Yaml(e.to_string()))
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::Yaml(e.to_string()))
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let text = self.to_yaml()?;
        std::fs::write(path, text).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// File locations tried by [`load`](Self::load) after `$CHIRPLET_CONFIG`.
    pub fn config_search_paths() -> Vec<PathBuf> {
        let user = directories::ProjectDirs::from("", "", "chirplet")
            .map(|dirs| dirs.config_dir().join("config.yaml"));

        std::iter::once(PathBuf::from("chirplet.yaml"))
            .chain(user)
            .chain(std::iter::once(PathBuf::from("/etc/chirplet/config.yaml")))
            .collect()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.estimator.validate()
    }

    /// Defaults rendered as YAML, a starting point for a config file.
    pub fn example_yaml() -> String {
        Self::default().to_yaml().unwrap_or_default()
    }
}
