//! HTTP server for playerweb-rs.
//!
//! Connections are accepted on a tokio listener, parsed, dispatched through a
//! [`Router`](crate::router::Router) built before the server starts, and
//! answered by the handler the matched route's factory produces.

mod response;
mod config;
mod error;
mod handler;
mod http_server;
mod work_queue;

// Re-export public items
pub use response::{HttpResponse, StatusCode};
pub use config::ServerConfig;
pub use error::Error;
pub use handler::{HandlerFactory, HandlerFuture, handler_factory};
pub use http_server::HttpServer;
pub use work_queue::WorkQueue;
