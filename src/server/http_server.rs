//! HTTP server implementation.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;
use tokio::signal;
use log::{debug, error, info, log, warn};

use crate::parser::{HttpRequest, Method, parse_request};
use crate::router::{RouteResult, Router};
use crate::server::config::ServerConfig;
use crate::server::error::Error;
use crate::server::handler::{HandlerFactory, handler_factory};
use crate::server::response::{HttpResponse, StatusCode};

/// Largest request body the server reads beyond the first buffer.
const MAX_BODY_SIZE: usize = 1 << 20;

/// An HTTP server.
///
/// Routes are registered on the server before [`HttpServer::start`]; starting
/// consumes the server and shares the finished route table read-only with
/// every connection task.
pub struct HttpServer {
    /// The server configuration.
    pub config: ServerConfig,
    router: Router<HandlerFactory>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            router: Router::new(),
        }
    }

    /// Add a route to the server.
    ///
    /// # Arguments
    ///
    /// * `method` - The method this handler answers
    /// * `pattern` - Route pattern, e.g. `/api/playlists/:plref/items/:range`
    /// * `handler` - Async function producing the response
    pub fn add_route<F, Fut>(&mut self, method: Method, pattern: &str, handler: F) -> Result<(), Error>
    where
        F: Fn(HttpRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<HttpResponse, Error>> + Send + 'static,
    {
        self.router.define_route(method, pattern, handler_factory(handler))?;
        Ok(())
    }

    /// The route table, for registering prebuilt factories.
    pub fn router_mut(&mut self) -> &mut Router<HandlerFactory> {
        &mut self.router
    }

    pub fn router(&self) -> &Router<HandlerFactory> {
        &self.router
    }

    /// Display the server banner and registered endpoints.
    fn display_server_info(&self) {
        let banner = include_str!("../banner.txt");
        info!("\n{banner}");

        info!("Registered endpoints:");
        for (method, pattern) in self.router.routes() {
            info!("  {method} {pattern}");
        }
    }

    /// Set up the TCP listener.
    async fn setup_listener(&self) -> Result<TcpListener, Error> {
        let listener = TcpListener::bind(&self.config.addr).await?;
        info!("Server listening on http://{addr}", addr = self.config.addr);
        Ok(listener)
    }

    /// Set up a Ctrl+C handler for graceful shutdown.
    fn setup_ctrl_c_handler(shutdown_tx: Arc<mpsc::Sender<()>>, tasks: &mut JoinSet<()>) {
        tasks.spawn(async move {
            match signal::ctrl_c().await {
                Ok(()) => {
                    info!("Received Ctrl+C, initiating graceful shutdown");
                    let _ = shutdown_tx.send(()).await;
                }
                Err(e) => {
                    error!("Error setting up Ctrl+C handler: {e}");
                }
            }
        });
    }

    /// Handle a new connection.
    async fn handle_new_connection(
        mut socket: tokio::net::TcpStream,
        addr: SocketAddr,
        semaphore: Arc<Semaphore>,
        router: Arc<Router<HandlerFactory>>,
        read_buffer_size: usize,
        tasks: &mut JoinSet<()>,
    ) {
        let permit = match semaphore.try_acquire_owned() {
            Ok(permit) => permit,
            Err(_) => {
                warn!("Connection limit reached, rejecting connection from {addr}");
                let response = HttpResponse::error(
                    StatusCode::ServiceUnavailable,
                    "Server is at capacity, please try again later",
                );
                let _ = socket.write_all(&response.to_bytes()).await;
                return;
            }
        };

        tasks.spawn(async move {
            // The permit is dropped when the task completes, releasing the semaphore slot
            let _permit = permit;

            if let Err(e) = Self::handle_connection(&mut socket, &router, read_buffer_size).await {
                let status = e.status_code();
                log!(e.log_level(), "{addr}: {} {}: {e}", status.as_u16(), status.reason_phrase());
            }
        });
    }

    /// Handle connection errors.
    async fn handle_connection_error(e: std::io::Error) -> bool {
        error!("Error accepting connection: {e}");

        if e.kind() == std::io::ErrorKind::BrokenPipe {
            error!("Critical error accepting connection, shutting down");
            return true;
        }

        // For other errors, wait a bit before retrying
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
        false
    }

    /// Perform graceful shutdown.
    async fn perform_shutdown(tasks: &mut JoinSet<()>) {
        info!("Waiting for {len} active connections to complete...", len = tasks.len());
        let shutdown_timeout = tokio::time::Duration::from_secs(30);
        let drained = tokio::time::timeout(shutdown_timeout, async {
            while let Some(res) = tasks.join_next().await {
                if let Err(e) = res {
                    error!("Task failed during shutdown: {e}");
                }
            }
        })
        .await;

        if drained.is_err() {
            warn!("Shutdown timeout elapsed, aborting {len} connections", len = tasks.len());
            tasks.abort_all();
        }

        info!("Server shutdown complete");
    }

    /// Start the server and listen for incoming connections.
    ///
    /// Runs until Ctrl+C or a fatal accept error.
    pub async fn start(self) -> Result<(), Error> {
        self.display_server_info();

        let listener = self.setup_listener().await?;

        let semaphore = Arc::new(Semaphore::new(self.config.max_connections));
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
        let shutdown_tx = Arc::new(shutdown_tx);
        let read_buffer_size = self.config.read_buffer_size;

        // Registration is over; from here on the table is only read.
        let router = Arc::new(self.router);

        let mut tasks = JoinSet::new();
        Self::setup_ctrl_c_handler(shutdown_tx.clone(), &mut tasks);

        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    info!("Shutting down server...");
                    break;
                }

                accept_result = listener.accept() => {
                    match accept_result {
                        Ok((socket, addr)) => {
                            Self::handle_new_connection(
                                socket,
                                addr,
                                semaphore.clone(),
                                router.clone(),
                                read_buffer_size,
                                &mut tasks,
                            ).await;
                        },
                        Err(e) => {
                            if Self::handle_connection_error(e).await {
                                break;
                            }
                        }
                    }
                }
            }
        }

        Self::perform_shutdown(&mut tasks).await;

        Ok(())
    }

    /// Read one request, route it, and write the response.
    ///
    /// Routing failures and handler errors are answered on the socket and also
    /// returned, so the caller can log them.
    pub async fn handle_connection(
        socket: &mut (impl AsyncRead + AsyncWrite + Unpin),
        router: &Router<HandlerFactory>,
        read_buffer_size: usize,
    ) -> Result<(), Error> {
        let mut buf = vec![0; read_buffer_size];

        let n = socket.read(&mut buf).await?;
        if n == 0 {
            return Ok(()); // Connection closed
        }

        let mut request = match parse_request(&buf[..n]) {
            Ok(req) => req,
            Err(e) => {
                let response = HttpResponse::error(StatusCode::BadRequest, format!("Error parsing request: {e}"));
                socket.write_all(&response.to_bytes()).await?;
                return Err(Error::ParseError(e));
            }
        };

        // Pull in the rest of the body if it did not fit into the first read
        let declared = request
            .get_header("Content-Length")
            .and_then(|len| len.parse::<usize>().ok())
            .unwrap_or(0);
        if declared > request.body.len() {
            if declared > MAX_BODY_SIZE {
                let response = HttpResponse::error(StatusCode::BadRequest, "Request body too large");
                socket.write_all(&response.to_bytes()).await?;
                return Err(Error::BadRequest(format!("body of {declared} bytes exceeds limit")));
            }
            let already = request.body.len();
            request.body.resize(declared, 0);
            socket.read_exact(&mut request.body[already..]).await?;
        }

        let (factory, params) = match router.dispatch(&request) {
            RouteResult::Matched { factory, params } => (factory.clone(), params),
            RouteResult::Rejected(response) => {
                socket.write_all(&response.to_bytes()).await?;
                let path = request.route_path().to_string();
                return Err(match response.status {
                    StatusCode::MethodNotAllowed => Error::MethodNotAllowed(request.method, path),
                    _ => Error::NotFound(path),
                });
            }
        };

        request.params = params;
        debug!("{method} {path}", method = request.method, path = request.path);

        let response = match factory(request).await {
            Ok(resp) => resp,
            Err(e) => {
                let response = HttpResponse::error(e.status_code(), e.to_string());
                socket.write_all(&response.to_bytes()).await?;
                return Err(e);
            }
        };

        socket.write_all(&response.to_bytes()).await?;
        Ok(())
    }
}
