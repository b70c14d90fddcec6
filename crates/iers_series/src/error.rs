//! Error types for resource loading and table parsing.

use thiserror::Error;

/// Errors raised while locating or parsing a table resource.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum SeriesError {
    /// No resource with that name is available to the loader.
    #[error("resource not found: {0}")]
    MissingResource(String),
    /// The resource exists but a line could not be understood.
    #[error("{name}:{line}: {message}")]
    Parse {
        name: String,
        line: usize,
        message: String,
    },
    /// The resource exists but could not be read.
    #[error("I/O error reading {name}: {message}")]
    Io { name: String, message: String },
}

impl SeriesError {
    pub(crate) fn parse(name: &str, line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            name: name.to_string(),
            line,
            message: message.into(),
        }
    }
}
