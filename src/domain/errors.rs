//! Domain error types
//!
//! This module defines the error hierarchy for Triagem. All errors are
//! domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Triagem error type
///
/// This is the primary error type used throughout the library.
/// It wraps specific failure classes and provides context for error handling.
#[derive(Debug, Error)]
pub enum TriagemError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Non-text input handed to a component that requires text
    ///
    /// The rule matcher recovers from this locally and never propagates it;
    /// the variant exists for collaborators that need to surface it.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Model artifacts missing or unloadable
    ///
    /// Recovered by the hybrid detector into a degraded result; fatal only
    /// to callers that explicitly require the statistical layer.
    #[error("Classifier model unavailable: {0}")]
    ModelUnavailable(String),

    /// Training corpus has fewer than two distinct label values
    ///
    /// Fatal to a training run. Raised before any fitting so a partial
    /// model can never be produced.
    #[error("Insufficient training data: {0}")]
    InsufficientData(String),

    /// Model artifact persistence failure
    #[error("Artifact I/O error: {0}")]
    ArtifactIo(String),

    /// Corpus loading/validation errors
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// Evaluation errors
    #[error("Evaluation error: {0}")]
    Evaluation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for TriagemError {
    fn from(err: std::io::Error) -> Self {
        TriagemError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for TriagemError {
    fn from(err: serde_json::Error) -> Self {
        TriagemError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for TriagemError {
    fn from(err: toml::de::Error) -> Self {
        TriagemError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Conversion from csv errors
impl From<csv::Error> for TriagemError {
    fn from(err: csv::Error) -> Self {
        TriagemError::Corpus(err.to_string())
    }
}
