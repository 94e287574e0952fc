//! A control server around the in-memory player.
//!
//! Usage: `cargo run --example player_server [settings.json]`

use std::env;
use std::path::PathBuf;
use log::info;

use playerweb::controllers::{spawn_player_queue, PlayerController, PlaylistsController, StaticController};
use playerweb::player::{MemoryPlayer, Player, PlaylistRef};
use playerweb::{HttpServer, Settings};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize the logger
    env_logger::init();

    let settings_path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("playerweb.json"));
    let settings = Settings::load_or_default(&settings_path)?;

    // A few items so the API has something to show
    let mut player = MemoryPlayer::new();
    let demo_items: Vec<String> = ["intro.flac", "theme.flac", "outro.flac"]
        .iter()
        .map(|name| format!("/music/demo/{name}"))
        .collect();
    player.add_items(&PlaylistRef::Current, &demo_items)?;

    let queue = spawn_player_queue(Box::new(player))?;

    let mut server = HttpServer::new(settings.server_config());
    PlayerController::new(queue.clone()).define_routes(server.router_mut())?;
    PlaylistsController::new(queue).define_routes(server.router_mut())?;

    // The catch-all file route goes last
    if let Some(web_root) = &settings.web_root {
        info!("Serving web UI from {}", web_root.display());
        StaticController::new("/", web_root).define_routes(server.router_mut())?;
    }

    server.start().await?;

    Ok(())
}
