//! Playlist listing and editing.

use serde::Deserialize;

use crate::controllers::{json_response, path_param, PlayerQueue, SharedPlayer};
use crate::parser::{HttpRequest, Method};
use crate::parsing::Range;
use crate::player::{PlayerError, PlaylistRef};
use crate::router::{RouteError, Router};
use crate::server::{handler_factory, Error, HandlerFactory, HttpResponse};

#[derive(Debug, Deserialize)]
struct TitleBody {
    title: String,
}

#[derive(Debug, Deserialize)]
struct AddItemsBody {
    items: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RemoveItemsBody {
    items: Vec<usize>,
}

/// Serves `/api/playlists`.
pub struct PlaylistsController {
    queue: PlayerQueue,
}

impl PlaylistsController {
    pub fn new(queue: PlayerQueue) -> Self {
        Self { queue }
    }

    pub fn define_routes(&self, router: &mut Router<HandlerFactory>) -> Result<(), RouteError> {
        router.define_route(Method::GET, "/api/playlists", self.list())?;
        router.define_route(Method::POST, "/api/playlists/add", self.add())?;
        router.define_route(Method::POST, "/api/playlists/remove/:plref", self.mutate(remove_playlist))?;
        router.define_route(Method::POST, "/api/playlists/:plref", self.mutate(rename_playlist))?;

        // items/add and items/remove must precede items/:range
        router.define_route(Method::POST, "/api/playlists/:plref/items/add", self.mutate(add_items))?;
        router.define_route(Method::POST, "/api/playlists/:plref/items/remove", self.mutate(remove_items))?;
        router.define_route(Method::GET, "/api/playlists/:plref/items/:range", self.items())?;

        router.define_route(Method::POST, "/api/playlists/:plref/clear", self.mutate(clear_playlist))?;
        router.define_route(Method::POST, "/api/playlists/:plref/play/:index", self.mutate(play_item))?;
        Ok(())
    }

    fn list(&self) -> HandlerFactory {
        let queue = self.queue.clone();
        handler_factory(move |_request| {
            let queue = queue.clone();
            async move {
                let playlists = queue.post(|player| player.playlists()).await?;
                json_response(&playlists)
            }
        })
    }

    fn add(&self) -> HandlerFactory {
        let queue = self.queue.clone();
        handler_factory(move |request| {
            let queue = queue.clone();
            async move {
                let body: TitleBody = request.json()?;
                let info = queue.post(move |player| player.add_playlist(&body.title)).await?;
                json_response(&info)
            }
        })
    }

    fn items(&self) -> HandlerFactory {
        let queue = self.queue.clone();
        handler_factory(move |request| {
            let queue = queue.clone();
            async move {
                let plref: PlaylistRef = path_param(&request, "plref")?;
                let range: Range = path_param(&request, "range")?;
                let items = queue.post(move |player| player.playlist_items(&plref, range)).await??;
                json_response(&items)
            }
        })
    }

    /// A handler that prepares a player call from the request, runs it, and
    /// answers `204 No Content`.
    fn mutate<P>(&self, prepare: P) -> HandlerFactory
    where
        P: Fn(&HttpRequest) -> Result<PlayerCall, Error> + Send + Sync + Copy + 'static,
    {
        let queue = self.queue.clone();
        handler_factory(move |request| {
            let queue = queue.clone();
            async move {
                let call = prepare(&request)?;
                queue.post(call).await??;
                Ok::<_, Error>(HttpResponse::no_content())
            }
        })
    }
}

type PlayerCall = Box<dyn FnOnce(&mut SharedPlayer) -> Result<(), PlayerError> + Send>;

fn plref(request: &HttpRequest) -> Result<PlaylistRef, Error> {
    Ok(path_param(request, "plref")?)
}

fn remove_playlist(request: &HttpRequest) -> Result<PlayerCall, Error> {
    let plref = plref(request)?;
    Ok(Box::new(move |player| player.remove_playlist(&plref)))
}

fn rename_playlist(request: &HttpRequest) -> Result<PlayerCall, Error> {
    let plref = plref(request)?;
    let body: TitleBody = request.json()?;
    Ok(Box::new(move |player| player.rename_playlist(&plref, &body.title)))
}

fn add_items(request: &HttpRequest) -> Result<PlayerCall, Error> {
    let plref = plref(request)?;
    let body: AddItemsBody = request.json()?;
    Ok(Box::new(move |player| player.add_items(&plref, &body.items)))
}

fn remove_items(request: &HttpRequest) -> Result<PlayerCall, Error> {
    let plref = plref(request)?;
    let body: RemoveItemsBody = request.json()?;
    Ok(Box::new(move |player| player.remove_items(&plref, &body.items)))
}

fn clear_playlist(request: &HttpRequest) -> Result<PlayerCall, Error> {
    let plref = plref(request)?;
    Ok(Box::new(move |player| player.clear_playlist(&plref)))
}

fn play_item(request: &HttpRequest) -> Result<PlayerCall, Error> {
    let plref = plref(request)?;
    let index: usize = path_param(request, "index")?;
    Ok(Box::new(move |player| player.play_item(&plref, index)))
}
