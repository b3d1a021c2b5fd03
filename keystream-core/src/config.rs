use crate::error::{KeyStreamError, Result};
use crate::hash_source::{DEFAULT_MAX_INDEX, DigestAlgorithm};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default window size.
pub const DEFAULT_MEMORY: usize = 1000;
/// Default number of extra re-hash rounds.
pub const DEFAULT_STRETCH: u32 = 2016;
/// Default number of keys to produce.
pub const DEFAULT_KEY_COUNT: usize = 64;

/// Settings for a key stream run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Salt prepended to every index before hashing.
    pub seed: String,
    /// Number of indices looked ahead for a confirming run of five.
    pub memory: usize,
    /// Extra rounds of re-hashing applied to each hash.
    pub stretch: u32,
    /// How many keys to produce.
    pub key_count: usize,
    /// Largest index the hash source may be asked for.
    pub max_index: u64,
    /// Digest used to compute the hash sequence.
    pub algorithm: DigestAlgorithm,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: String::new(),
            memory: DEFAULT_MEMORY,
            stretch: DEFAULT_STRETCH,
            key_count: DEFAULT_KEY_COUNT,
            max_index: DEFAULT_MAX_INDEX,
            algorithm: DigestAlgorithm::default(),
        }
    }
}

impl GeneratorConfig {
    /// Default settings with the given seed.
    #[must_use]
    pub fn with_seed(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            ..Self::default()
        }
    }

    /// Rejects settings the key stream cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`KeyStreamError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.memory == 0 {
            return Err(KeyStreamError::InvalidConfig(
                "memory must be greater than zero".to_string(),
            ));
        }
        if self.key_count == 0 {
            return Err(KeyStreamError::InvalidConfig(
                "key_count must be greater than zero".to_string(),
            ));
        }
        if self.max_index == 0 {
            return Err(KeyStreamError::InvalidConfig(
                "max_index must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Reads a configuration from a JSON file. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&config_str)?)
    }

    /// Writes the configuration to a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized or the file written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let config_str = serde_json::to_string_pretty(self)?;
        fs::write(path, config_str)?;
        Ok(())
    }
}
