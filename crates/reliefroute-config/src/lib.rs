//! Configuration system for ReliefRoute.
//!
//! Load engine configuration from TOML or YAML files to tune the demand
//! predictor and the alert thresholds without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use reliefroute_config::EngineConfig;
//!
//! let config = EngineConfig::from_toml_str(r#"
//!     random_seed = 7
//!
//!     [predictor]
//!     epochs = 250
//!     learning_rate = 0.005
//!
//!     [alerts]
//!     low_stock_threshold = 50.0
//! "#).unwrap();
//!
//! assert_eq!(config.effective_seed(), Some(7));
//! assert_eq!(config.predictor.epochs, 250);
//! assert_eq!(config.predictor.safety_buffer, 1.1);
//! assert_eq!(config.alerts.demand_spike_ratio, 1.5);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use reliefroute_config::EngineConfig;
//!
//! let config = EngineConfig::load("reliefroute.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(test)]
mod tests;

/// Seed used in reproducible mode when no explicit seed is configured.
pub const DEFAULT_REPRODUCIBLE_SEED: u64 = 0;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EngineConfig {
    /// Environment mode affecting reproducibility.
    #[serde(default)]
    pub environment_mode: EnvironmentMode,

    /// Random seed for reproducible weight initialization.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Demand predictor configuration.
    #[serde(default)]
    pub predictor: PredictorConfig,

    /// Alert threshold configuration.
    #[serde(default)]
    pub alerts: AlertConfig,
}

impl EngineConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads and validates configuration from a file.
    ///
    /// Files ending in `.yaml` or `.yml` are read as YAML, anything else as TOML.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, cannot be parsed, or holds
    /// out-of-range values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));
        let config = if is_yaml {
            Self::from_yaml_file(path)?
        } else {
            Self::from_toml_file(path)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Sets the environment mode.
    pub fn with_environment_mode(mut self, mode: EnvironmentMode) -> Self {
        self.environment_mode = mode;
        self
    }

    /// Sets the number of training epochs.
    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.predictor.epochs = epochs;
        self
    }

    /// Sets the SGD learning rate.
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.predictor.learning_rate = learning_rate;
        self
    }

    /// Sets the low-stock alert threshold.
    pub fn with_low_stock_threshold(mut self, threshold: f64) -> Self {
        self.alerts.low_stock_threshold = threshold;
        self
    }

    /// Returns the seed the predictor should use, if any.
    ///
    /// An explicit `random_seed` always wins. Reproducible mode without a
    /// seed falls back to [`DEFAULT_REPRODUCIBLE_SEED`].
    ///
    /// # Examples
    ///
    /// ```
    /// use reliefroute_config::{EngineConfig, EnvironmentMode};
    ///
    /// assert_eq!(EngineConfig::new().effective_seed(), None);
    ///
    /// let config = EngineConfig::new().with_environment_mode(EnvironmentMode::Reproducible);
    /// assert_eq!(config.effective_seed(), Some(0));
    /// ```
    pub fn effective_seed(&self) -> Option<u64> {
        match (self.random_seed, self.environment_mode) {
            (Some(seed), _) => Some(seed),
            (None, EnvironmentMode::Reproducible) => Some(DEFAULT_REPRODUCIBLE_SEED),
            (None, EnvironmentMode::NonReproducible) => None,
        }
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.predictor.validate()?;
        self.alerts.validate()
    }
}

/// Environment mode affecting reproducibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentMode {
    /// Weights are initialized from OS entropy unless a seed is given.
    #[default]
    NonReproducible,

    /// Weights are always initialized from a fixed seed.
    Reproducible,
}

/// Demand predictor configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct PredictorConfig {
    /// Number of passes over the training rows.
    pub epochs: usize,

    /// SGD step size.
    pub learning_rate: f64,

    /// Multiplier applied to non-negative predictions.
    pub safety_buffer: f64,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            epochs: 100,
            learning_rate: 0.01,
            safety_buffer: 1.1,
        }
    }
}

impl PredictorConfig {
    /// Checks that epochs is at least 1, the learning rate is positive and
    /// the safety buffer is non-negative. All floats must be finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.epochs == 0 {
            return Err(ConfigError::Invalid("predictor.epochs must be at least 1".into()));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "predictor.learning_rate must be positive, got {}",
                self.learning_rate
            )));
        }
        if !(self.safety_buffer.is_finite() && self.safety_buffer >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "predictor.safety_buffer must be non-negative, got {}",
                self.safety_buffer
            )));
        }
        Ok(())
    }
}

/// Alert threshold configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct AlertConfig {
    /// Items below this quantity raise a low-inventory alert.
    pub low_stock_threshold: f64,

    /// Demand above `average × ratio` raises a demand-spike alert.
    pub demand_spike_ratio: f64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            low_stock_threshold: 100.0,
            demand_spike_ratio: 1.5,
        }
    }
}

impl AlertConfig {
    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.low_stock_threshold.is_finite() && self.low_stock_threshold >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "alerts.low_stock_threshold must be non-negative, got {}",
                self.low_stock_threshold
            )));
        }
        if !(self.demand_spike_ratio.is_finite() && self.demand_spike_ratio > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "alerts.demand_spike_ratio must be positive, got {}",
                self.demand_spike_ratio
            )));
        }
        Ok(())
    }
}
