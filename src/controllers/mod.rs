//! Route tables for the HTTP API.
//!
//! Each controller registers its routes on a [`Router`](crate::router::Router)
//! of [`HandlerFactory`](crate::server::HandlerFactory). Since siblings match in
//! registration order, controllers register literal segments before parameter
//! segments at the same position, and the static file controller goes last.

mod player;
mod playlists;
mod static_files;

use std::str::FromStr;
use serde::Serialize;

use crate::parser::HttpRequest;
use crate::parsing::{parse_value, ParseError};
use crate::player::Player;
use crate::server::{Error, HttpResponse, StatusCode, WorkQueue};

pub use player::PlayerController;
pub use playlists::PlaylistsController;
pub use static_files::StaticController;

/// The player as owned by its work queue.
pub type SharedPlayer = Box<dyn Player + Send>;

/// Handle used by controllers to run player calls on the player thread.
pub type PlayerQueue = WorkQueue<SharedPlayer>;

/// Start the player thread for `player`.
pub fn spawn_player_queue(player: SharedPlayer) -> Result<PlayerQueue, Error> {
    WorkQueue::spawn("player", player, 64)
}

/// Parse the path parameter `name` captured by the router.
fn path_param<T: FromStr>(request: &HttpRequest, name: &str) -> Result<T, ParseError> {
    let text = request
        .get_param(name)
        .ok_or_else(|| ParseError::MissingParameter(name.to_string()))?;
    parse_value(text)
}

fn json_response<T: Serialize>(value: &T) -> Result<HttpResponse, Error> {
    HttpResponse::new(StatusCode::Ok).with_json(value)
}
