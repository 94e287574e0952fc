//! Error types for parameter parsing.

use thiserror::Error;

/// A path or query parameter that could not be interpreted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Not of the form `offset:count`.
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Missing parameter: {0}")]
    MissingParameter(String),
}
