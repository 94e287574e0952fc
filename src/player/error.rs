//! Error types for player operations.

use thiserror::Error;

/// Errors a [`Player`](crate::player::Player) reports back to the API.
#[derive(Debug, Error, PartialEq)]
pub enum PlayerError {
    #[error("Playlist not found: {0}")]
    PlaylistNotFound(String),

    #[error("Playlist item index out of range: {0}")]
    ItemOutOfRange(usize),

    /// Volume outside `0.0..=1.0`.
    #[error("Invalid volume: {0}")]
    InvalidVolume(f32),

    #[error("Invalid position: {0}")]
    InvalidPosition(f64),

    /// Play or skip requested with no item to act on.
    #[error("Nothing to play")]
    NothingToPlay,
}

impl PlayerError {
    /// Whether the error means the addressed playlist does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, PlayerError::PlaylistNotFound(_))
    }
}
