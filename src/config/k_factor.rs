//! K-factor policy configuration
//!
//! A policy is either a single constant K or a set of rating tiers, decided
//! once when the configuration is built.

use crate::error::{EloError, Result};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use tracing::warn;

/// K used when no policy is configured or the configured one is unusable
pub const DEFAULT_K: f64 = 40.0;

/// Rating tiers for a tiered K policy
///
/// Thresholds are kept sorted in ascending numeric order. A tier at threshold
/// `0` is always present and doubles as the fallback for ratings below every
/// threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct KTiers {
    tiers: Vec<(f64, f64)>,
    fallback: f64,
}

impl KTiers {
    /// Build tiers from `(threshold, k)` pairs in any order
    pub fn new<I>(thresholds: I) -> Result<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut tiers: Vec<(f64, f64)> = thresholds.into_iter().collect();

        if tiers.is_empty() {
            return Err(EloError::ConfigurationError {
                message: "Tiered K policy must define at least one threshold".to_string(),
            }
            .into());
        }

        for &(threshold, k) in &tiers {
            if !threshold.is_finite() {
                return Err(EloError::ConfigurationError {
                    message: format!("K threshold must be finite, got {}", threshold),
                }
                .into());
            }
            validate_k(k)?;
        }

        tiers.sort_by(|a, b| a.0.total_cmp(&b.0));

        if let Some(pair) = tiers.windows(2).find(|pair| pair[0].0 == pair[1].0) {
            return Err(EloError::ConfigurationError {
                message: format!("Duplicate K threshold {}", pair[0].0),
            }
            .into());
        }

        let fallback = tiers
            .iter()
            .find(|(threshold, _)| *threshold == 0.0)
            .map(|&(_, k)| k)
            .ok_or_else(|| EloError::ConfigurationError {
                message: "Tiered K policy must define a threshold at 0".to_string(),
            })?;

        Ok(Self { tiers, fallback })
    }

    /// K of the highest threshold not above `rating`, or the fallback
    pub fn resolve(&self, rating: f64) -> f64 {
        self.tiers
            .iter()
            .take_while(|(threshold, _)| rating >= *threshold)
            .last()
            .map_or(self.fallback, |&(_, k)| k)
    }

    /// Sorted `(threshold, k)` pairs
    pub fn thresholds(&self) -> &[(f64, f64)] {
        &self.tiers
    }

    /// K stored at threshold 0
    pub fn fallback(&self) -> f64 {
        self.fallback
    }
}

/// How the K-factor is chosen for a participant
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawKPolicy")]
pub enum KPolicy {
    /// Same K for every rating
    Constant(f64),
    /// K chosen by rating band
    Tiered(KTiers),
}

impl Default for KPolicy {
    fn default() -> Self {
        KPolicy::Constant(DEFAULT_K)
    }
}

impl KPolicy {
    /// Create a constant policy
    pub fn constant(k: f64) -> Result<Self> {
        validate_k(k)?;
        Ok(KPolicy::Constant(k))
    }

    /// Create a tiered policy from `(threshold, k)` pairs
    pub fn tiered<I>(thresholds: I) -> Result<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        Ok(KPolicy::Tiered(KTiers::new(thresholds)?))
    }

    /// Resolve the K-factor for a participant at `rating`
    pub fn resolve(&self, rating: f64) -> f64 {
        match self {
            KPolicy::Constant(k) => *k,
            KPolicy::Tiered(tiers) => tiers.resolve(rating),
        }
    }

    /// Short name used in logs and config dumps
    pub fn kind(&self) -> &'static str {
        match self {
            KPolicy::Constant(_) => "constant",
            KPolicy::Tiered(_) => "tiered",
        }
    }

    /// Validate policy parameters
    pub fn validate(&self) -> Result<()> {
        match self {
            KPolicy::Constant(k) => validate_k(*k),
            // Tiers are checked when built
            KPolicy::Tiered(_) => Ok(()),
        }
    }
}

fn validate_k(k: f64) -> Result<()> {
    if !k.is_finite() || k < 0.0 {
        return Err(EloError::ConfigurationError {
            message: format!("K-factor must be finite and non-negative, got {}", k),
        }
        .into());
    }
    Ok(())
}

/// Wire shape of a K policy: a number, a threshold mapping, or anything else
#[derive(Deserialize)]
#[serde(untagged)]
enum RawKPolicy {
    Constant(f64),
    Tiered(BTreeMap<String, serde_json::Value>),
    Unrecognized(serde::de::IgnoredAny),
}

impl TryFrom<RawKPolicy> for KPolicy {
    type Error = anyhow::Error;

    fn try_from(raw: RawKPolicy) -> Result<Self> {
        match raw {
            RawKPolicy::Constant(k) => KPolicy::constant(k),
            RawKPolicy::Tiered(map) => {
                let thresholds = map
                    .into_iter()
                    .map(|(key, value)| -> Result<(f64, f64)> {
                        let threshold = key.trim().parse::<f64>().map_err(|_| {
                            EloError::ConfigurationError {
                                message: format!("K threshold '{}' is not a number", key),
                            }
                        })?;
                        let k = value.as_f64().ok_or_else(|| EloError::ConfigurationError {
                            message: format!(
                                "K for threshold '{}' is not a number: {}",
                                key, value
                            ),
                        })?;
                        Ok((threshold, k))
                    })
                    .collect::<Result<Vec<_>>>()?;
                KPolicy::tiered(thresholds)
            }
            RawKPolicy::Unrecognized(_) => {
                warn!(
                    "K policy is neither a number nor a threshold mapping, using K={}",
                    DEFAULT_K
                );
                Ok(KPolicy::Constant(DEFAULT_K))
            }
        }
    }
}

impl Serialize for KPolicy {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            KPolicy::Constant(k) => serializer.serialize_f64(*k),
            KPolicy::Tiered(tiers) => {
                let mut map = serializer.serialize_map(Some(tiers.tiers.len()))?;
                for (threshold, k) in &tiers.tiers {
                    map.serialize_entry(&threshold.to_string(), k)?;
                }
                map.end()
            }
        }
    }
}
