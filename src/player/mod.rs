//! The player interface the controllers drive.
//!
//! Host plugins implement [`Player`] on top of their own APIs;
//! [`MemoryPlayer`] is a self-contained implementation for tests and demos.

mod error;
mod memory;
mod tests;

use std::fmt;
use std::str::FromStr;
use serde::Serialize;

use crate::parsing::{ParseError, Range};

pub use error::PlayerError;
pub use memory::MemoryPlayer;

/// Transport state of the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PlaybackState {
    Stopped,
    Playing,
    Paused,
}

/// The item the player is positioned on.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveItem {
    pub playlist_id: Option<String>,
    pub playlist_index: Option<usize>,
    pub index: Option<usize>,
    /// Seconds into the item.
    pub position: f64,
    /// Seconds, 0 when unknown.
    pub duration: f64,
}

/// Snapshot returned by `GET /api/player`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    pub playback_state: PlaybackState,
    /// Linear volume in `0.0..=1.0`.
    pub volume: f32,
    pub active_item: ActiveItem,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistInfo {
    pub id: String,
    pub index: usize,
    pub title: String,
    pub is_current: bool,
    pub item_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItem {
    pub path: String,
    pub title: String,
    pub duration: f64,
}

/// One page of playlist items.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemsResult {
    pub offset: usize,
    pub total_count: usize,
    pub items: Vec<PlaylistItem>,
}

/// How a request names a playlist: by position, by id, or `current`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistRef {
    Index(usize),
    Id(String),
    Current,
}

impl FromStr for PlaylistRef {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseError::InvalidValue(s.to_string()));
        }
        if s == "current" {
            return Ok(PlaylistRef::Current);
        }
        match s.parse::<usize>() {
            Ok(index) => Ok(PlaylistRef::Index(index)),
            Err(_) => Ok(PlaylistRef::Id(s.to_string())),
        }
    }
}

impl fmt::Display for PlaylistRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaylistRef::Index(index) => write!(f, "{index}"),
            PlaylistRef::Id(id) => f.write_str(id),
            PlaylistRef::Current => f.write_str("current"),
        }
    }
}

/// Operations the HTTP API needs from a media player.
///
/// Implementations are only ever called from one thread, through a
/// [`WorkQueue`](crate::server::WorkQueue), so they need to be `Send` but not `Sync`.
pub trait Player: Send {
    fn state(&self) -> PlayerState;

    /// Start playback, or resume when paused.
    fn play(&mut self) -> Result<(), PlayerError>;
    fn pause(&mut self) -> Result<(), PlayerError>;
    fn stop(&mut self) -> Result<(), PlayerError>;
    fn next(&mut self) -> Result<(), PlayerError>;
    fn previous(&mut self) -> Result<(), PlayerError>;
    fn set_volume(&mut self, volume: f32) -> Result<(), PlayerError>;
    /// Move to `position` seconds in the active item.
    fn seek(&mut self, position: f64) -> Result<(), PlayerError>;

    fn playlists(&self) -> Vec<PlaylistInfo>;
    fn add_playlist(&mut self, title: &str) -> PlaylistInfo;
    fn remove_playlist(&mut self, plref: &PlaylistRef) -> Result<(), PlayerError>;
    fn rename_playlist(&mut self, plref: &PlaylistRef, title: &str) -> Result<(), PlayerError>;
    fn playlist_items(&self, plref: &PlaylistRef, range: Range) -> Result<ItemsResult, PlayerError>;
    fn add_items(&mut self, plref: &PlaylistRef, paths: &[String]) -> Result<(), PlayerError>;
    fn remove_items(&mut self, plref: &PlaylistRef, indices: &[usize]) -> Result<(), PlayerError>;
    fn clear_playlist(&mut self, plref: &PlaylistRef) -> Result<(), PlayerError>;
    fn play_item(&mut self, plref: &PlaylistRef, index: usize) -> Result<(), PlayerError>;
}
