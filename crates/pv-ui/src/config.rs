//! Page view configuration

use std::path::Path;
use serde::{Serialize, Deserialize};
use thiserror::Error;

/// Errors that can occur while loading a configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Page view configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageViewConfig {
    /// Fraction of the page width a drag must cover to commit on release
    pub commit_fraction: f32,

    /// Horizontal release speed (points per second) that commits regardless
    /// of distance
    pub fling_velocity: f32,

    /// Distance a drag travels before it picks a direction
    pub drag_slop: f32,

    /// Smallest height the widget allocates
    pub min_height: f32,

    /// Draw edge hints for the neighbouring pages
    pub show_indicator: bool,
}

impl Default for PageViewConfig {
    fn default() -> Self {
        Self {
            commit_fraction: 0.35,
            fling_velocity: 500.0,
            drag_slop: 6.0,
            min_height: 120.0,
            show_indicator: true,
        }
    }
}

impl PageViewConfig {
    /// Parse and validate a JSON configuration. Missing fields keep their
    /// defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that every field is in range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.commit_fraction > 0.0 && self.commit_fraction <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "commit_fraction must be in (0, 1], got {}",
                self.commit_fraction
            )));
        }
        if !(self.fling_velocity > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "fling_velocity must be positive, got {}",
                self.fling_velocity
            )));
        }
        if !(self.drag_slop >= 0.0) || !(self.min_height >= 0.0) {
            return Err(ConfigError::Invalid(
                "drag_slop and min_height must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}
