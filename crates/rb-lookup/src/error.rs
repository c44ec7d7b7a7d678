//! Lookup and dataset loading error types.

use thiserror::Error;

/// Errors that can occur while building lookup services.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("dataset parse error: {0}")]
    Parse(String),

    #[error("duplicate {kind}: {key}")]
    Duplicate { kind: &'static str, key: String },
}

/// Convenience alias for lookup results.
pub type LookupResult<T> = Result<T, LookupError>;
