//! Configuration for the JWA algorithm set

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Iteration count written to `p2c` when wrapping a key
pub const DEFAULT_PBES2_ITERATION_COUNT: u32 = 4096;

/// Largest `p2c` accepted from an incoming header
pub const DEFAULT_PBES2_MAX_ITERATION_COUNT: u32 = 1_000_000;

/// Environment variable overriding [`JwaConfig::pbes2_iteration_count`]
pub const ENV_PBES2_ITERATIONS: &str = "JWA_PBES2_ITERATIONS";

/// Environment variable overriding [`JwaConfig::pbes2_max_iteration_count`]
pub const ENV_PBES2_MAX_ITERATIONS: &str = "JWA_PBES2_MAX_ITERATIONS";

/// Configuration options shared by the algorithm implementations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JwaConfig {
    /// PBKDF2 iteration count used by PBES2 key wrapping
    pub pbes2_iteration_count: u32,

    /// Upper bound on the `p2c` value accepted during PBES2 key unwrapping
    pub pbes2_max_iteration_count: u32,
}

impl JwaConfig {
    /// Creates a configuration with the default policy values
    pub fn new() -> Self {
        Self {
            pbes2_iteration_count: DEFAULT_PBES2_ITERATION_COUNT,
            pbes2_max_iteration_count: DEFAULT_PBES2_MAX_ITERATION_COUNT,
        }
    }

    /// Sets the PBES2 iteration count
    pub fn with_pbes2_iteration_count(mut self, count: u32) -> Self {
        self.pbes2_iteration_count = count;
        self
    }

    /// Sets the maximum PBES2 iteration count accepted on decryption
    pub fn with_pbes2_max_iteration_count(mut self, count: u32) -> Self {
        self.pbes2_max_iteration_count = count;
        self
    }

    /// Loads a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: JwaConfig = serde_json::from_str(&contents)?;
        validate(&config)?;
        Ok(config)
    }

    /// Builds a configuration from the defaults, overridden by
    /// `JWA_PBES2_ITERATIONS` and `JWA_PBES2_MAX_ITERATIONS` when set
    pub fn from_env() -> Result<Self> {
        let mut config = Self::new();
        if let Some(count) = read_env_u32(ENV_PBES2_ITERATIONS)? {
            config.pbes2_iteration_count = count;
        }
        if let Some(count) = read_env_u32(ENV_PBES2_MAX_ITERATIONS)? {
            config.pbes2_max_iteration_count = count;
        }
        validate(&config)?;
        Ok(config)
    }
}

impl Default for JwaConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn read_env_u32(name: &str) -> Result<Option<u32>> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse::<u32>()
            .map(Some)
            .map_err(|e| Error::Configuration(format!("{} is not a valid count: {}", name, e))),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(Error::Configuration(format!("{}: {}", name, e))),
    }
}

/// Validates a configuration before any algorithm is built from it
pub fn validate(config: &JwaConfig) -> Result<()> {
    if config.pbes2_iteration_count == 0 {
        return Err(Error::Configuration(
            "pbes2_iteration_count must be at least 1".to_string(),
        ));
    }
    if config.pbes2_iteration_count > config.pbes2_max_iteration_count {
        return Err(Error::Configuration(format!(
            "pbes2_iteration_count ({}) exceeds pbes2_max_iteration_count ({})",
            config.pbes2_iteration_count, config.pbes2_max_iteration_count
        )));
    }
    Ok(())
}
