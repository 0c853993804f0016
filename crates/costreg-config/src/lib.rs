//! Configuration system for costreg.
//!
//! Load intersection settings from TOML or YAML to tune how cost automata
//! are combined without code changes.
//!
//! # Examples
//!
//! ```
//! use costreg_config::CostRegConfig;
//!
//! let config = CostRegConfig::from_toml_str(r#"
//!     log_filter = "costreg_automaton=debug"
//!
//!     [intersection]
//!     minimize_each_fold = false
//!     marker_capacity = 1024
//! "#).unwrap();
//!
//! assert!(!config.intersection.minimize_each_fold);
//! assert_eq!(config.intersection.marker_capacity, 1024);
//! assert_eq!(config.intersection.marker_ceiling, u32::MAX);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use costreg_config::CostRegConfig;
//!
//! let config = CostRegConfig::load("costreg.toml").unwrap_or_default();
//! assert!(config.intersection.minimize_each_fold);
//! ```

use std::path::Path;

use costreg_core::Symbol;
use serde::{Deserialize, Serialize};
use thiserror::Error;

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

/// Top-level costreg configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CostRegConfig {
    /// Intersection settings.
    #[serde(default)]
    pub intersection: IntersectionConfig,

    /// `tracing` filter directive used by the console initializer.
    #[serde(default)]
    pub log_filter: Option<String>,
}

impl CostRegConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML, or fails
    /// [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::from_toml_file(path)?;
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

    /// Sets the intersection configuration.
    pub fn with_intersection(mut self, intersection: IntersectionConfig) -> Self {
        self.intersection = intersection;
        self
    }

    /// Sets the log filter directive.
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = Some(filter.into());
        self
    }

    /// Checks cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.intersection.validate()
    }
}

/// Settings of the cost automaton intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct IntersectionConfig {
    /// Minimize the running product after each pairwise fold.
    ///
    /// When false, the product is only trimmed of useless states.
    pub minimize_each_fold: bool,

    /// First marker id issued; later ids count downward.
    pub marker_ceiling: Symbol,

    /// Maximum number of markers one intersection may issue.
    pub marker_capacity: u32,
}

impl Default for IntersectionConfig {
    fn default() -> Self {
        Self {
            minimize_each_fold: true,
            marker_ceiling: Symbol::MAX,
            marker_capacity: 1 << 16,
        }
    }
}

impl IntersectionConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_minimize_each_fold(mut self, minimize: bool) -> Self {
        self.minimize_each_fold = minimize;
        self
    }

    pub fn with_marker_ceiling(mut self, ceiling: Symbol) -> Self {
        self.marker_ceiling = ceiling;
        self
    }

    pub fn with_marker_capacity(mut self, capacity: u32) -> Self {
        self.marker_capacity = capacity;
        self
    }

    /// Lowest marker id this configuration may issue.
    pub fn marker_floor(&self) -> Symbol {
        self.marker_ceiling
            .saturating_sub(self.marker_capacity.saturating_sub(1))
    }

    /// Rejects an empty marker pool or one reaching below symbol 0.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.marker_capacity == 0 {
            return Err(ConfigError::Invalid(
                "marker_capacity must be positive".to_string(),
            ));
        }
        if self.marker_capacity > self.marker_ceiling {
            return Err(ConfigError::Invalid(format!(
                "marker_capacity {} exceeds marker_ceiling {}",
                self.marker_capacity, self.marker_ceiling
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
