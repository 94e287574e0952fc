//! Player state and transport controls.

use serde::Deserialize;

use crate::controllers::{json_response, PlayerQueue, SharedPlayer};
use crate::parser::Method;
use crate::player::PlayerError;
use crate::router::{RouteError, Router};
use crate::server::{handler_factory, Error, HandlerFactory, HttpResponse};

type Command = fn(&mut SharedPlayer) -> Result<(), PlayerError>;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerUpdate {
    volume: Option<f32>,
    position: Option<f64>,
}

/// Serves `/api/player`.
pub struct PlayerController {
    queue: PlayerQueue,
}

impl PlayerController {
    pub fn new(queue: PlayerQueue) -> Self {
        Self { queue }
    }

    pub fn define_routes(&self, router: &mut Router<HandlerFactory>) -> Result<(), RouteError> {
        router.define_route(Method::GET, "/api/player", self.state())?;
        router.define_route(Method::POST, "/api/player", self.update())?;

        let commands: [(&str, Command); 5] = [
            ("/api/player/play", |player| player.play()),
            ("/api/player/pause", |player| player.pause()),
            ("/api/player/stop", |player| player.stop()),
            ("/api/player/next", |player| player.next()),
            ("/api/player/previous", |player| player.previous()),
        ];
        for (pattern, command) in commands {
            router.define_route(Method::POST, pattern, self.command(command))?;
        }

        Ok(())
    }

    fn state(&self) -> HandlerFactory {
        let queue = self.queue.clone();
        handler_factory(move |_request| {
            let queue = queue.clone();
            async move {
                let state = queue.post(|player| player.state()).await?;
                json_response(&state)
            }
        })
    }

    /// Volume and seek position in one JSON body; absent fields are left alone.
    fn update(&self) -> HandlerFactory {
        let queue = self.queue.clone();
        handler_factory(move |request| {
            let queue = queue.clone();
            async move {
                let update: PlayerUpdate = request.json()?;
                queue
                    .post(move |player| {
                        if let Some(volume) = update.volume {
                            player.set_volume(volume)?;
                        }
                        if let Some(position) = update.position {
                            player.seek(position)?;
                        }
                        Ok::<_, PlayerError>(())
                    })
                    .await??;
                Ok::<_, Error>(HttpResponse::no_content())
            }
        })
    }

    fn command(&self, command: Command) -> HandlerFactory {
        let queue = self.queue.clone();
        handler_factory(move |_request| {
            let queue = queue.clone();
            async move {
                queue.post(move |player| command(player)).await??;
                Ok::<_, Error>(HttpResponse::no_content())
            }
        })
    }
}
