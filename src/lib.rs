//! An embeddable HTTP control server for music players.
//!
//! The server exposes player state, transport controls and playlist editing as
//! a small JSON API, and can serve a web UI from a directory. Requests are
//! routed by a trie of path patterns with one handler slot per HTTP method.
//!
//! # Features
//!
//! - Trie router with literal, `:name` and `:name*` segments, 404 and 405 outcomes
//! - Async handlers built on tokio, one task per connection
//! - Player access serialized on a dedicated thread through [`WorkQueue`]
//! - JSON settings file with sensible defaults
//!
//! # Examples
//!
//! ## Routing
//!
//! ```
//! use playerweb::{Method, Router, StatusCode};
//!
//! let mut router = Router::new();
//! router.define_route(Method::GET, "/api/playlists/:plref/items/:range", "items").unwrap();
//! router.define_route(Method::GET, "/:path*", "static").unwrap();
//!
//! match router.dispatch_path(Method::GET, "/api/playlists/p1/items/0:50") {
//!     playerweb::RouteResult::Matched { factory, params } => {
//!         assert_eq!(*factory, "items");
//!         assert_eq!(params["plref"], "p1");
//!         assert_eq!(params["range"], "0:50");
//!     }
//!     playerweb::RouteResult::Rejected(response) => panic!("unexpected {}", response.status.as_u16()),
//! }
//!
//! let result = router.dispatch_path(Method::POST, "/index.html");
//! assert_eq!(result.status(), StatusCode::MethodNotAllowed);
//! ```
//!
//! ## Serving the player API
//!
//! ```no_run
//! use playerweb::controllers::{spawn_player_queue, PlayerController, PlaylistsController};
//! use playerweb::player::MemoryPlayer;
//! use playerweb::{HttpServer, Settings};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = Settings::default();
//!     let queue = spawn_player_queue(Box::new(MemoryPlayer::new()))?;
//!
//!     let mut server = HttpServer::new(settings.server_config());
//!     PlayerController::new(queue.clone()).define_routes(server.router_mut())?;
//!     PlaylistsController::new(queue).define_routes(server.router_mut())?;
//!
//!     server.start().await?;
//!     Ok(())
//! }
//! ```
//!
//! See `demos/player_server.rs` for a complete server.

pub mod parser;
pub mod router;
pub mod server;
pub mod parsing;
pub mod content_type;
pub mod player;
pub mod controllers;
pub mod settings;

// Re-export commonly used items for convenience
pub use parser::{Error as ParserError, HttpRequest, HttpVersion, Method, parse_request};
pub use router::{RouteError, RouteResult, Router, StringSegment};
pub use server::{Error as ServerError, HandlerFactory, HttpResponse, HttpServer, ServerConfig, StatusCode, WorkQueue};
pub use settings::{Settings, SettingsError};
