//! Error types for the deduplication engine.

use thiserror::Error;

/// Errors produced by poimerge.
///
/// Record-level problems (`InvalidCoordinate`, `InvalidName`) are counted and
/// skipped by batch operations; configuration problems (`InvalidThreshold`,
/// `InvalidCutoff`) fail the whole call before anything is mutated.
#[derive(Debug, Error)]
pub enum PoiError {
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Invalid duplicate threshold {0}: must be a finite number of meters greater than zero")]
    InvalidThreshold(f64),

    #[error("Invalid size cutoff {0}: must be greater than zero")]
    InvalidCutoff(usize),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Elevation lookup failed: {0}")]
    Elevation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PoiError {
    /// True for errors that only disqualify a single record.
    pub fn is_record_level(&self) -> bool {
        matches!(
            self,
            PoiError::InvalidCoordinate(_) | PoiError::InvalidName(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, PoiError>;
