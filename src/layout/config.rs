//! Configuration for the layout engine

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use super::axis::Justification;

/// Errors that can occur when loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Configuration options for layout computation
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Natural size of a `box` with no explicit width/height (width, height)
    pub default_box_size: (f64, f64),

    /// Justification for containers that do not set `justify`
    pub default_justification: Justification,

    /// Vertical space between independent top-level trees
    pub root_spacing: f64,

    /// Slack allowed before the lint pass reports gaps or overflow
    pub tolerance: f64,
}

/// TOML file layout: everything lives under a `[layout]` table
#[derive(Deserialize)]
struct TomlConfig {
    #[serde(default)]
    layout: LayoutConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            default_box_size: (40.0, 20.0),
            default_justification: Justification::Start,
            root_spacing: 10.0,
            tolerance: 1e-6,
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load configuration from a TOML string; missing keys keep their defaults
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;
        Ok(parsed.layout)
    }

    /// Set the default box size
    pub fn with_box_size(mut self, width: f64, height: f64) -> Self {
        self.default_box_size = (width, height);
        self
    }

    /// Set the default container justification
    pub fn with_justification(mut self, justification: Justification) -> Self {
        self.default_justification = justification;
        self
    }

    /// Set the spacing between top-level trees
    pub fn with_root_spacing(mut self, spacing: f64) -> Self {
        self.root_spacing = spacing;
        self
    }

    /// Set the lint tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}
