//! Request handler factories.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::parser::HttpRequest;
use crate::server::{HttpResponse, Error};

/// Type alias for a boxed future that returns a Result<HttpResponse, Error>.
pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<HttpResponse, Error>> + Send>>;

/// What the server stores in each route slot.
///
/// Calling the factory with a request creates the handler for that request;
/// awaiting the returned future runs it. The request already carries the path
/// parameters the router captured.
pub type HandlerFactory = Arc<dyn Fn(HttpRequest) -> HandlerFuture + Send + Sync>;

/// Wrap an async function or closure as a [`HandlerFactory`].
pub fn handler_factory<F, Fut>(handler: F) -> HandlerFactory
where
    F: Fn(HttpRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<HttpResponse, Error>> + Send + 'static,
{
    Arc::new(move |req: HttpRequest| -> HandlerFuture { Box::pin(handler(req)) })
}
