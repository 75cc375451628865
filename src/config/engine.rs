//! Engine configuration
//!
//! This module defines the rating engine configuration, its presets, and
//! loading from TOML or environment variables with validation.

use crate::config::k_factor::KPolicy;
use crate::error::{EloError, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// Floor used when none is configured
pub const DEFAULT_FLOOR: f64 = 100.0;

/// Rating engine configuration, fixed once the engine is built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Lowest intended rating. Only the opt-in clamping helpers enforce it.
    pub floor: f64,
    /// K-factor policy
    pub k: KPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            floor: DEFAULT_FLOOR,
            k: KPolicy::default(),
        }
    }
}

impl EngineConfig {
    /// Create conservative configuration (slower rating changes)
    pub fn conservative() -> Self {
        Self {
            floor: DEFAULT_FLOOR,
            k: KPolicy::Constant(16.0),
        }
    }

    /// Create aggressive configuration (faster rating changes)
    pub fn aggressive() -> Self {
        Self {
            floor: DEFAULT_FLOOR,
            k: KPolicy::Constant(64.0),
        }
    }

    /// Create configuration whose K shrinks as ratings climb
    pub fn tiered_by_rating() -> Result<Self> {
        Ok(Self {
            floor: DEFAULT_FLOOR,
            k: KPolicy::tiered([(0.0, 40.0), (2000.0, 20.0), (2400.0, 10.0)])?,
        })
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        validate_config(self)
    }

    /// Parse and validate configuration from a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source).map_err(|e| EloError::ConfigurationError {
            message: format!("Invalid engine configuration: {}", e),
        })?;

        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from environment variables with fallback to defaults
    ///
    /// `ELO_FLOOR` is a number. `ELO_K` is either a number or a JSON object
    /// mapping rating thresholds to K values, e.g. `{"0": 20, "1000": 40}`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup shaped like the environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(floor) = lookup("ELO_FLOOR") {
            config.floor = floor
                .trim()
                .parse()
                .map_err(|_| EloError::ConfigurationError {
                    message: format!("Invalid ELO_FLOOR value: {}", floor),
                })?;
        }
        if let Some(k) = lookup("ELO_K") {
            config.k = parse_k(&k)?;
        }

        validate_config(&config)?;
        Ok(config)
    }
}

fn parse_k(raw: &str) -> Result<KPolicy> {
    match raw.trim().parse::<f64>() {
        Ok(k) => KPolicy::constant(k),
        Err(_) => serde_json::from_str(raw).map_err(|e| {
            EloError::ConfigurationError {
                message: format!("Invalid ELO_K value {}: {}", raw, e),
            }
            .into()
        }),
    }
}

/// Validate configuration values
pub fn validate_config(config: &EngineConfig) -> Result<()> {
    if !config.floor.is_finite() {
        return Err(EloError::ConfigurationError {
            message: format!("Floor must be finite, got {}", config.floor),
        }
        .into());
    }

    config.k.validate()
}
