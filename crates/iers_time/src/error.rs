//! Error types for epochs and Earth orientation history loading.

use thiserror::Error;

/// Errors from EOP parsing or file access.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum TimeError {
    /// IERS EOP file parsing failed.
    #[error("EOP parse error: {0}")]
    EopParse(String),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for TimeError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
