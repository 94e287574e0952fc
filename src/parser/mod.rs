//! HTTP request model.
//!
//! This module holds the request types the router and handlers consume, plus
//! the minimal request parser used by the embedded transport.

mod request;
mod method;
mod version;
mod error;
mod tests;

// Re-export public items
pub use request::HttpRequest;
pub use method::Method;
pub use version::HttpVersion;
pub use error::Error;

pub use request::parse_request;
