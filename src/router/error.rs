//! Error types for route registration.

use thiserror::Error;

/// Errors raised while building the route table.
///
/// These are configuration mistakes in the application's route definitions
/// and are meant to stop server startup. Dispatch never produces them.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    /// A `:` or `:*` segment with nothing to name the captured value.
    #[error("Empty parameter name in route pattern: {pattern}")]
    EmptyParameterName { pattern: String },
}
