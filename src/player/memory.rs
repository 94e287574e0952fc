//! In-process player.

use std::path::Path;
use log::debug;

use crate::parsing::Range;
use crate::player::{
    ActiveItem, ItemsResult, PlaybackState, Player, PlayerError, PlayerState, PlaylistInfo, PlaylistItem,
    PlaylistRef,
};

struct Playlist {
    id: String,
    title: String,
    items: Vec<PlaylistItem>,
}

/// A player that keeps playlists in memory and only tracks transport state.
pub struct MemoryPlayer {
    playlists: Vec<Playlist>,
    next_id: u64,
    current: usize,
    playback_state: PlaybackState,
    volume: f32,
    /// Playlist id and item index of the active item.
    active: Option<(String, usize)>,
    position: f64,
}

impl Default for MemoryPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPlayer {
    /// A stopped player with one empty playlist.
    pub fn new() -> Self {
        let mut player = Self {
            playlists: Vec::new(),
            next_id: 1,
            current: 0,
            playback_state: PlaybackState::Stopped,
            volume: 1.0,
            active: None,
            position: 0.0,
        };
        player.add_playlist("Default");
        player
    }

    fn resolve(&self, plref: &PlaylistRef) -> Result<usize, PlayerError> {
        let found = match plref {
            PlaylistRef::Index(index) => (*index < self.playlists.len()).then_some(*index),
            PlaylistRef::Id(id) => self.playlists.iter().position(|p| &p.id == id),
            PlaylistRef::Current => (self.current < self.playlists.len()).then_some(self.current),
        };
        found.ok_or_else(|| PlayerError::PlaylistNotFound(plref.to_string()))
    }

    /// Index of the playlist holding the active item, with the item index.
    fn active_position(&self) -> Option<(usize, usize)> {
        let (id, index) = self.active.as_ref()?;
        let playlist = self.playlists.iter().position(|p| &p.id == id)?;
        Some((playlist, *index))
    }

    fn activate(&mut self, playlist: usize, index: usize) {
        self.active = Some((self.playlists[playlist].id.clone(), index));
        self.current = playlist;
        self.position = 0.0;
        self.playback_state = PlaybackState::Playing;
    }

    fn deactivate(&mut self) {
        self.active = None;
        self.position = 0.0;
        self.playback_state = PlaybackState::Stopped;
    }
}

fn item_for_path(path: &str) -> PlaylistItem {
    let title = Path::new(path)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(path)
        .to_string();

    PlaylistItem {
        path: path.to_string(),
        title,
        duration: 0.0,
    }
}

impl Player for MemoryPlayer {
    fn state(&self) -> PlayerState {
        let active = self.active_position();
        let duration = active
            .and_then(|(playlist, index)| self.playlists[playlist].items.get(index))
            .map_or(0.0, |item| item.duration);

        PlayerState {
            playback_state: self.playback_state,
            volume: self.volume,
            active_item: ActiveItem {
                playlist_id: active.map(|(playlist, _)| self.playlists[playlist].id.clone()),
                playlist_index: active.map(|(playlist, _)| playlist),
                index: active.map(|(_, index)| index),
                position: self.position,
                duration,
            },
        }
    }

    fn play(&mut self) -> Result<(), PlayerError> {
        match self.playback_state {
            PlaybackState::Playing => Ok(()),
            PlaybackState::Paused => {
                self.playback_state = PlaybackState::Playing;
                Ok(())
            }
            PlaybackState::Stopped => {
                let (playlist, index) = match self.active_position() {
                    Some(active) => active,
                    None => (self.resolve(&PlaylistRef::Current)?, 0),
                };
                if index >= self.playlists[playlist].items.len() {
                    return Err(PlayerError::NothingToPlay);
                }
                self.activate(playlist, index);
                Ok(())
            }
        }
    }

    fn pause(&mut self) -> Result<(), PlayerError> {
        if self.playback_state == PlaybackState::Playing {
            self.playback_state = PlaybackState::Paused;
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<(), PlayerError> {
        self.playback_state = PlaybackState::Stopped;
        self.position = 0.0;
        Ok(())
    }

    fn next(&mut self) -> Result<(), PlayerError> {
        let (playlist, index) = self.active_position().ok_or(PlayerError::NothingToPlay)?;
        if index + 1 < self.playlists[playlist].items.len() {
            self.activate(playlist, index + 1);
        } else {
            debug!("End of playlist reached, stopping");
            self.stop()?;
        }
        Ok(())
    }

    fn previous(&mut self) -> Result<(), PlayerError> {
        let (playlist, index) = self.active_position().ok_or(PlayerError::NothingToPlay)?;
        self.activate(playlist, index.saturating_sub(1));
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) -> Result<(), PlayerError> {
        if !(0.0..=1.0).contains(&volume) {
            return Err(PlayerError::InvalidVolume(volume));
        }
        self.volume = volume;
        Ok(())
    }

    fn seek(&mut self, position: f64) -> Result<(), PlayerError> {
        if !position.is_finite() || position < 0.0 {
            return Err(PlayerError::InvalidPosition(position));
        }
        if self.active_position().is_none() {
            return Err(PlayerError::NothingToPlay);
        }
        self.position = position;
        Ok(())
    }

    fn playlists(&self) -> Vec<PlaylistInfo> {
        self.playlists
            .iter()
            .enumerate()
            .map(|(index, playlist)| PlaylistInfo {
                id: playlist.id.clone(),
                index,
                title: playlist.title.clone(),
                is_current: index == self.current,
                item_count: playlist.items.len(),
            })
            .collect()
    }

    fn add_playlist(&mut self, title: &str) -> PlaylistInfo {
        let id = format!("p{}", self.next_id);
        self.next_id += 1;

        self.playlists.push(Playlist {
            id: id.clone(),
            title: title.to_string(),
            items: Vec::new(),
        });

        PlaylistInfo {
            id,
            index: self.playlists.len() - 1,
            title: title.to_string(),
            is_current: self.playlists.len() - 1 == self.current,
            item_count: 0,
        }
    }

    fn remove_playlist(&mut self, plref: &PlaylistRef) -> Result<(), PlayerError> {
        let index = self.resolve(plref)?;

        if self.active_position().is_some_and(|(playlist, _)| playlist == index) {
            self.deactivate();
        }

        self.playlists.remove(index);
        if index < self.current || self.current >= self.playlists.len() {
            self.current = self.current.saturating_sub(1);
        }
        Ok(())
    }

    fn rename_playlist(&mut self, plref: &PlaylistRef, title: &str) -> Result<(), PlayerError> {
        let index = self.resolve(plref)?;
        self.playlists[index].title = title.to_string();
        Ok(())
    }

    fn playlist_items(&self, plref: &PlaylistRef, range: Range) -> Result<ItemsResult, PlayerError> {
        let playlist = &self.playlists[self.resolve(plref)?];
        let window = range.clamp(playlist.items.len());

        Ok(ItemsResult {
            offset: window.start,
            total_count: playlist.items.len(),
            items: playlist.items[window].to_vec(),
        })
    }

    fn add_items(&mut self, plref: &PlaylistRef, paths: &[String]) -> Result<(), PlayerError> {
        let index = self.resolve(plref)?;
        self.playlists[index].items.extend(paths.iter().map(|path| item_for_path(path)));
        Ok(())
    }

    fn remove_items(&mut self, plref: &PlaylistRef, indices: &[usize]) -> Result<(), PlayerError> {
        let playlist = self.resolve(plref)?;
        let len = self.playlists[playlist].items.len();

        if let Some(&bad) = indices.iter().find(|&&i| i >= len) {
            return Err(PlayerError::ItemOutOfRange(bad));
        }

        let mut sorted = indices.to_vec();
        sorted.sort_unstable();
        sorted.dedup();

        if let Some((active_playlist, active_index)) = self.active_position() {
            if active_playlist == playlist {
                if sorted.binary_search(&active_index).is_ok() {
                    self.deactivate();
                } else {
                    let shift = sorted.iter().filter(|&&i| i < active_index).count();
                    let id = self.playlists[playlist].id.clone();
                    self.active = Some((id, active_index - shift));
                }
            }
        }

        for index in sorted.into_iter().rev() {
            self.playlists[playlist].items.remove(index);
        }
        Ok(())
    }

    fn clear_playlist(&mut self, plref: &PlaylistRef) -> Result<(), PlayerError> {
        let playlist = self.resolve(plref)?;

        if self.active_position().is_some_and(|(active, _)| active == playlist) {
            self.deactivate();
        }

        self.playlists[playlist].items.clear();
        Ok(())
    }

    fn play_item(&mut self, plref: &PlaylistRef, index: usize) -> Result<(), PlayerError> {
        let playlist = self.resolve(plref)?;
        if index >= self.playlists[playlist].items.len() {
            return Err(PlayerError::ItemOutOfRange(index));
        }
        self.activate(playlist, index);
        Ok(())
    }
}
