//! Configuration system for rota.
//!
//! Load scoring configuration from TOML or YAML to tune constraint weights
//! and runtime assertions without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use rota_config::{EnvironmentMode, ScoringConfig};
//!
//! let config = ScoringConfig::from_toml_str(r#"
//!     environment_mode = "full_assert"
//!
//!     [constraint_weights]
//!     "Desired day for employee" = 2
//!     "Undesired day for employee" = 0
//! "#).unwrap();
//!
//! assert_eq!(config.environment_mode, EnvironmentMode::FullAssert);
//! assert_eq!(config.weight_multiplier("Desired day for employee"), 2);
//! assert_eq!(config.weight_multiplier("Required skill"), 1);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use rota_config::ScoringConfig;
//!
//! let config = ScoringConfig::load("scoring.toml").unwrap_or_default();
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;


/// Largest accepted weight multiplier.
///
/// A match weighs at most the minutes of one shift, so a bounded multiplier
/// keeps every single contribution well inside `i64`.
pub const MAX_WEIGHT_MULTIPLIER: i64 = 1_000_000;

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

/// Scoring configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ScoringConfig {
    /// Environment mode controlling runtime score assertions.
    #[serde(default)]
    pub environment_mode: EnvironmentMode,

    /// Weight multiplier per constraint name. Missing names default to 1.
    #[serde(default)]
    pub constraint_weights: BTreeMap<String, i64>,
}

impl ScoringConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML, or fails
    /// [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the environment mode.
    pub fn with_environment_mode(mut self, mode: EnvironmentMode) -> Self {
        self.environment_mode = mode;
        self
    }

    /// Sets the weight multiplier for a constraint.
    pub fn with_constraint_weight(mut self, name: impl Into<String>, multiplier: i64) -> Self {
        self.constraint_weights.insert(name.into(), multiplier);
        self
    }

    /// Returns the weight multiplier for a constraint, 1 when not configured.
    pub fn weight_multiplier(&self, name: &str) -> i64 {
        self.constraint_weights.get(name).copied().unwrap_or(1)
    }

    /// Checks that every configured multiplier lies in
    /// `0..=MAX_WEIGHT_MULTIPLIER`.
    ///
    /// Constraint names are checked against the catalog by the scoring crate.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, &multiplier) in &self.constraint_weights {
            if !(0..=MAX_WEIGHT_MULTIPLIER).contains(&multiplier) {
                return Err(ConfigError::Invalid(format!(
                    "weight multiplier for '{}' must be between 0 and {}, got {}",
                    name, MAX_WEIGHT_MULTIPLIER, multiplier
                )));
            }
        }
        Ok(())
    }
}

/// Environment mode affecting runtime assertions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentMode {
    /// No assertions, minimal overhead.
    #[default]
    NonReproducible,

    /// Deterministic behavior without assertions.
    Reproducible,

    /// After every move, checks the running score against the match ledger.
    FastAssert,

    /// After every move, checks the running score against a full recalculation.
    FullAssert,
}

impl EnvironmentMode {
    /// Returns true if moves are followed by any score assertion.
    pub fn is_asserted(&self) -> bool {
        matches!(self, EnvironmentMode::FastAssert | EnvironmentMode::FullAssert)
    }
}
