//! Configuration loading and typed config structures for the simulator.
//!
//! The optional configuration file is `invasion-config.yaml` in the
//! working directory. Every field has a default, so an empty or absent
//! file yields the same run as the bare command line. Command-line flags
//! are merged on top by the binary.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Environment variable overriding `simulation.seed`.
pub const SEED_ENV_VAR: &str = "INVASION_SEED";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The seed override is not an unsigned integer.
    #[error("invalid seed override {value:?}")]
    InvalidSeed {
        /// The rejected value.
        value: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
///
/// Mirrors the structure of `invasion-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SimulationConfig {
    /// Run parameters.
    #[serde(default)]
    pub simulation: RunConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `INVASION_SEED`, when set, overrides `simulation.seed`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::InvalidSeed`] if the seed override is malformed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.simulation.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// An empty document yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }
}

/// Run parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RunConfig {
    /// Number of aliens spawned during preparation.
    #[serde(default = "default_aliens")]
    pub aliens: u32,

    /// Maximum number of steps to simulate.
    #[serde(default = "default_max_steps")]
    pub max_steps: u64,

    /// Path of the map file.
    #[serde(default = "default_map_file")]
    pub map_file: PathBuf,

    /// Seed for the random source. A fresh one is drawn when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl RunConfig {
    /// Override the seed with `INVASION_SEED` when it is set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSeed`] if the variable is not a `u64`.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_seed_override(std::env::var(SEED_ENV_VAR).ok().as_deref())
    }

    /// Override the seed with `value` when present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSeed`] if `value` is not a `u64`.
    pub fn apply_seed_override(&mut self, value: Option<&str>) -> Result<(), ConfigError> {
        if let Some(raw) = value {
            let seed = raw.trim().parse().map_err(|_parse| ConfigError::InvalidSeed {
                value: raw.to_owned(),
            })?;
            self.seed = Some(seed);
        }
        Ok(())
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            aliens: default_aliens(),
            max_steps: default_max_steps(),
            map_file: default_map_file(),
            seed: None,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

const fn default_aliens() -> u32 {
    5
}

const fn default_max_steps() -> u64 {
    10_000
}

fn default_map_file() -> PathBuf {
    PathBuf::from("map.txt")
}

fn default_log_level() -> String {
    "warn".to_owned()
}
