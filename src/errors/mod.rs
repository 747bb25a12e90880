//! Error types for the concept extraction core
//!
//! Structural input problems are surfaced once, at ingestion, as a single
//! aggregated error. Configuration load failures are recovered locally
//! (built-in defaults) and never reach callers through this type.

use thiserror::Error;

/// Result type alias using ConceptError
pub type Result<T> = std::result::Result<T, ConceptError>;

/// Errors produced by the concept graph core
#[derive(Error, Debug)]
pub enum ConceptError {
    /// Required fields absent or malformed on the input document.
    /// Raised before any graph work begins, never partway through.
    #[error("invalid input structure: {message}")]
    InvalidInputStructure { message: String },

    /// Strict configuration load requested by the caller failed.
    #[error("configuration error: {message}")]
    Configuration { message: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ConceptError {
    /// Build an aggregated ingestion error from a list of structural problems
    pub fn invalid_input(problems: &[String]) -> Self {
        ConceptError::InvalidInputStructure {
            message: problems.join("; "),
        }
    }
}
