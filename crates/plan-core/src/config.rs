//! Engine presentation settings loaded from YAML.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default chart palette; breakdown entries index into it by position.
pub const DEFAULT_PALETTE: [&str; 8] = [
    "#0088FE", "#00C49F", "#FFBB28", "#FF8042", "#8884D8", "#82CA9D", "#FFC658", "#8DD1E1",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("palette must contain at least one colour")]
    EmptyPalette,
}

/// Settings shared by the analytics engine and its consumers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Colours assigned to category breakdown entries.
    pub palette: Vec<String>,
    /// Category substituted for items with a blank category.
    pub uncategorized_label: String,
    /// Prefix used when formatting money in messages.
    pub currency_symbol: String,
    /// Timeline length for generated scenarios that don't specify one.
    pub default_timeline_length: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            uncategorized_label: "Uncategorized".to_string(),
            currency_symbol: "$".to_string(),
            default_timeline_length: 12,
        }
    }
}

impl EngineConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: EngineConfig = serde_yaml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and validate a YAML config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        Ok(())
    }

    /// Number of palette slots, never zero.
    pub fn palette_size(&self) -> usize {
        self.palette.len().max(1)
    }

    /// Category label with the blank-category fallback applied.
    pub fn category_label<'a>(&'a self, category: &'a str) -> &'a str {
        if category.trim().is_empty() {
            &self.uncategorized_label
        } else {
            category
        }
    }
}
