//! Error types for the HTTP server.

use thiserror::Error;

use crate::parser::{Error as ParserError, Method};
use crate::parsing::ParseError;
use crate::player::PlayerError;
use crate::router::RouteError;
use crate::server::response::StatusCode;

/// Errors that can occur during HTTP server operation.
#[derive(Debug, Error)]
pub enum Error {
    /// Error parsing an HTTP request.
    #[error("Parse error: {0}")]
    ParseError(#[from] ParserError),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Requested resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Method not allowed for the requested resource.
    #[error("Method {0} not allowed for path: {1}")]
    MethodNotAllowed(Method, String),

    /// The request was understood but its arguments are unusable.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal server error: {0}")]
    InternalError(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A route definition is malformed.
    #[error("Route configuration error: {0}")]
    Route(#[from] RouteError),

    #[error("Player error: {0}")]
    Player(#[from] PlayerError),

    /// The worker thread behind a work queue has stopped.
    #[error("Work queue is closed")]
    WorkQueueClosed,
}

impl Error {
    /// The HTTP status a handler failing with this error answers with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::ParseError(_) | Error::BadRequest(_) => StatusCode::BadRequest,
            Error::NotFound(_) => StatusCode::NotFound,
            Error::MethodNotAllowed(_, _) => StatusCode::MethodNotAllowed,
            Error::Player(e) if e.is_not_found() => StatusCode::NotFound,
            Error::Player(_) => StatusCode::BadRequest,
            Error::WorkQueueClosed => StatusCode::ServiceUnavailable,
            Error::IoError(_) | Error::InternalError(_) | Error::JsonError(_) | Error::Route(_) => {
                StatusCode::InternalServerError
            }
        }
    }

    /// Level a failed connection is logged at: `Error` for server faults,
    /// `Debug` for requests that were simply wrong.
    pub fn log_level(&self) -> log::Level {
        if self.status_code().as_u16() >= 500 {
            log::Level::Error
        } else {
            log::Level::Debug
        }
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Error::BadRequest(e.to_string())
    }
}
