//! Request routing.
//!
//! A compact trie matcher: each node is one path segment position and holds a
//! handler slot per HTTP method. Segments are literals, `:name` parameters, or
//! `:name*` tail parameters that swallow the rest of the path.

mod segment;
mod node;
mod table;
mod error;

pub use segment::StringSegment;
pub use node::SegmentKind;
pub use table::{RouteResult, Router};
pub use error::RouteError;
