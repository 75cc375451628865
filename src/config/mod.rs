//! Configuration management for the rating engine
//!
//! This module handles the K-factor policy, the engine configuration,
//! loading from TOML or environment variables, validation, and defaults.

pub mod engine;
pub mod k_factor;

// Re-export commonly used types
pub use engine::{validate_config, EngineConfig, DEFAULT_FLOOR};
pub use k_factor::{KPolicy, KTiers, DEFAULT_K};
