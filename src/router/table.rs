//! The route table and request dispatch.

use std::collections::HashMap;
use log::{debug, trace, warn};

use crate::parser::{HttpRequest, Method};
use crate::router::error::RouteError;
use crate::router::node::{Node, SegmentKind, SEPARATOR};
use crate::router::segment::StringSegment;
use crate::server::{HttpResponse, StatusCode};

/// Outcome of dispatching a request.
#[derive(Debug)]
pub enum RouteResult<'a, F> {
    /// A handler factory is registered for the path and method.
    Matched {
        /// The factory registered for the matched route.
        factory: &'a F,
        /// Captured path parameters, keyed by name.
        params: HashMap<String, String>,
    },
    /// No handler applies; the response is a ready-made 404 or 405.
    Rejected(HttpResponse),
}

impl<F> RouteResult<'_, F> {
    /// The status the client sees if this result is rejected, `Ok` otherwise.
    pub fn status(&self) -> StatusCode {
        match self {
            RouteResult::Matched { .. } => StatusCode::Ok,
            RouteResult::Rejected(response) => response.status,
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, RouteResult::Matched { .. })
    }
}

/// A trie of route patterns with one handler slot per method at each node.
///
/// Patterns are `/`-separated; `:name` captures one segment and `:name*`
/// captures the remainder of the path. Routes are registered up front with
/// [`Router::define_route`]; after that the router is only read, and
/// [`Router::dispatch`] can be called from any number of tasks at once.
///
/// Siblings are matched in registration order, with no preference between
/// literal and parameter segments. Register `/users/me` before `/users/:id`
/// if the literal should win.
pub struct Router<F> {
    root: Node<F>,
}

impl<F> Default for Router<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> Router<F> {
    /// Create an empty router.
    pub fn new() -> Self {
        Self { root: Node::root() }
    }

    /// Register `factory` for `method` on `pattern`.
    ///
    /// Registering the same method on the same pattern twice replaces the
    /// earlier factory.
    ///
    /// # Errors
    ///
    /// [`RouteError::EmptyParameterName`] if a parameter segment has no name,
    /// e.g. `/files/:*`. The table is left unchanged in that case.
    pub fn define_route(&mut self, method: Method, pattern: &str, factory: F) -> Result<(), RouteError> {
        let mut path = StringSegment::new(pattern).trim(SEPARATOR);
        let mut segments = Vec::new();

        while let Some(token) = path.next_token(SEPARATOR) {
            if token.is_empty() {
                continue;
            }

            let (kind, value) = SegmentKind::classify(token.as_str());
            if kind != SegmentKind::Literal && value.is_empty() {
                return Err(RouteError::EmptyParameterName { pattern: pattern.to_string() });
            }
            segments.push((kind, value));
        }

        let mut node = &mut self.root;
        for (kind, value) in segments {
            node = node.child_or_insert(kind, value);
        }

        if node.set_handler(method, factory).is_some() {
            warn!("Route {method} {pattern} was already registered, replacing its handler");
        } else {
            debug!("Registered route {method} {pattern}");
        }

        Ok(())
    }

    /// Resolve a request to a handler factory and its path parameters.
    ///
    /// The query string is ignored. Unmatched requests come back as
    /// [`RouteResult::Rejected`] with a 404, or a 405 when the path exists
    /// with other methods registered.
    pub fn dispatch(&self, request: &HttpRequest) -> RouteResult<'_, F> {
        self.dispatch_path(request.method, request.route_path())
    }

    /// Same as [`Router::dispatch`] for a bare method and path.
    pub fn dispatch_path(&self, method: Method, path: &str) -> RouteResult<'_, F> {
        let trimmed = StringSegment::new(path).trim(SEPARATOR);
        let mut bindings = Vec::new();

        let node = match self.root.match_path(trimmed, &mut bindings) {
            Some(node) => node,
            None => {
                trace!("No route for {method} {path}");
                return RouteResult::Rejected(not_found(path));
            }
        };

        match node.handler(method) {
            Some(factory) => {
                trace!("Matched {method} {path} with {count} parameter(s)", count = bindings.len());
                let params = bindings
                    .into_iter()
                    .map(|(name, value)| (name.to_string(), value.to_string()))
                    .collect();
                RouteResult::Matched { factory, params }
            }
            None if node.has_routes() => {
                trace!("Route for {path} does not accept {method}");
                RouteResult::Rejected(method_not_allowed(method, path, &node.allowed_methods()))
            }
            None => {
                trace!("Route prefix {path} has no handlers");
                RouteResult::Rejected(not_found(path))
            }
        }
    }

    /// Every registered `(method, pattern)` pair, in trie order.
    pub fn routes(&self) -> Vec<(Method, String)> {
        let mut routes = Vec::new();
        self.root.collect_routes("", &mut routes);
        routes
    }
}

fn not_found(path: &str) -> HttpResponse {
    HttpResponse::new(StatusCode::NotFound)
        .with_content_type("text/plain")
        .with_body_string(format!("Not found: {path}"))
}

fn method_not_allowed(method: Method, path: &str, allowed: &[Method]) -> HttpResponse {
    let allowed = allowed
        .iter()
        .map(|m| m.to_string())
        .collect::<Vec<String>>()
        .join(", ");

    HttpResponse::new(StatusCode::MethodNotAllowed)
        .with_header("Allow", allowed.clone())
        .with_content_type("text/plain")
        .with_body_string(format!(
            "Method {method} not allowed for path: {path}. Allowed methods: {allowed}"
        ))
}
