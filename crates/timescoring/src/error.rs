//! Error types for the scoring library.

use thiserror::Error;

/// Main error type for annotation and scoring operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    /// Invalid construction input or scoring parameters.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reference and hypothesis masks differ in length after resampling.
    #[error(
        "The number of samples in the reference annotation (n={reference}) must match \
         the number of samples in the hypothesis annotation (n={hypothesis})"
    )]
    DimensionMismatch { reference: usize, hypothesis: usize },
}

impl ScoringError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        ScoringError::Config(message.into())
    }
}

/// Result type alias for scoring operations.
pub type Result<T> = std::result::Result<T, ScoringError>;
