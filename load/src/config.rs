use std::path::Path;

use serde::Deserialize;

use crate::error::{LoadError, Result};

/// Ingestion settings. Every field has a default, so a config file only needs
/// the keys it wants to change.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoadConfig {
    /// Reviewer keys start with this prefix; product keys must not.
    pub reviewer_prefix: String,
    /// Lowest accepted rating. Must be at least 1: a zero rating has no
    /// finite transformed cost in the weighted path search.
    pub min_rating: u32,
    /// Highest accepted rating.
    pub max_rating: u32,
    /// Drop out-of-range ratings (with a warning) instead of failing the load.
    pub skip_invalid: bool,
    /// Fail the load if the in-memory graph exceeds this many megabytes.
    pub max_memory_mb: Option<usize>,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            reviewer_prefix: "A".to_string(),
            min_rating: 1,
            max_rating: 5,
            skip_invalid: false,
            max_memory_mb: None,
        }
    }
}

impl LoadConfig {
    /// Read a JSON config file, filling unset keys with defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: LoadConfig = serde_json::from_str(&text).map_err(LoadError::ConfigParse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_rating == 0 {
            return Err(LoadError::Config("min_rating must be at least 1".into()));
        }
        if self.min_rating > self.max_rating {
            return Err(LoadError::Config(format!(
                "min_rating {} is greater than max_rating {}",
                self.min_rating, self.max_rating
            )));
        }
        if self.reviewer_prefix.is_empty() {
            return Err(LoadError::Config("reviewer_prefix must not be empty".into()));
        }
        Ok(())
    }

    /// Whether `key` follows the reviewer-key convention.
    pub fn is_reviewer(&self, key: &str) -> bool {
        key.starts_with(self.reviewer_prefix.as_str())
    }

    pub fn accepts_rating(&self, rating: u32) -> bool {
        (self.min_rating..=self.max_rating).contains(&rating)
    }
}
