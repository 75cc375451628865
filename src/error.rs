//! Error types for the rating engine
//!
//! Every error here is raised while building configuration or match inputs.
//! The per-call rating operations themselves never fail.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for rating engine construction
#[derive(Debug, thiserror::Error)]
pub enum EloError {
    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Invalid match result: {reason}")]
    InvalidMatchResult { reason: String },
}
