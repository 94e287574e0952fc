//! Tests for the in-memory player.

#[cfg(test)]
mod tests {
    use crate::parsing::Range;
    use crate::player::{MemoryPlayer, PlaybackState, Player, PlayerError, PlaylistRef};

    fn player_with_items(count: usize) -> MemoryPlayer {
        let mut player = MemoryPlayer::new();
        let paths: Vec<String> = (0..count).map(|i| format!("/music/track{i}.flac")).collect();
        player.add_items(&PlaylistRef::Index(0), &paths).unwrap();
        player
    }

    #[test]
    fn test_playlist_ref_parsing() {
        assert_eq!("3".parse::<PlaylistRef>().unwrap(), PlaylistRef::Index(3));
        assert_eq!("p12".parse::<PlaylistRef>().unwrap(), PlaylistRef::Id("p12".to_string()));
        assert_eq!("current".parse::<PlaylistRef>().unwrap(), PlaylistRef::Current);
        assert!("".parse::<PlaylistRef>().is_err());
    }

    #[test]
    fn test_new_player_has_default_playlist() {
        let player = MemoryPlayer::new();
        let playlists = player.playlists();
        assert_eq!(playlists.len(), 1);
        assert_eq!(playlists[0].id, "p1");
        assert_eq!(playlists[0].title, "Default");
        assert!(playlists[0].is_current);
        assert_eq!(player.state().playback_state, PlaybackState::Stopped);
    }

    #[test]
    fn test_add_and_page_items() {
        let player = player_with_items(5);

        let page = player.playlist_items(&PlaylistRef::Current, Range::new(1, 2)).unwrap();
        assert_eq!(page.offset, 1);
        assert_eq!(page.total_count, 5);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].title, "track1");
        assert_eq!(page.items[1].path, "/music/track2.flac");

        let tail = player.playlist_items(&PlaylistRef::Index(0), Range::new(4, 10)).unwrap();
        assert_eq!(tail.items.len(), 1);
    }

    #[test]
    fn test_transport_controls() {
        let mut player = player_with_items(2);

        player.play().unwrap();
        let state = player.state();
        assert_eq!(state.playback_state, PlaybackState::Playing);
        assert_eq!(state.active_item.index, Some(0));
        assert_eq!(state.active_item.playlist_id.as_deref(), Some("p1"));

        player.pause().unwrap();
        assert_eq!(player.state().playback_state, PlaybackState::Paused);
        player.play().unwrap();
        assert_eq!(player.state().playback_state, PlaybackState::Playing);

        player.next().unwrap();
        assert_eq!(player.state().active_item.index, Some(1));

        player.next().unwrap();
        assert_eq!(player.state().playback_state, PlaybackState::Stopped);

        player.previous().unwrap();
        assert_eq!(player.state().active_item.index, Some(0));
    }

    #[test]
    fn test_play_empty_playlist() {
        let mut player = MemoryPlayer::new();
        assert_eq!(player.play(), Err(PlayerError::NothingToPlay));
        assert_eq!(player.next(), Err(PlayerError::NothingToPlay));
    }

    #[test]
    fn test_volume_and_seek_validation() {
        let mut player = player_with_items(1);
        player.set_volume(0.25).unwrap();
        assert_eq!(player.state().volume, 0.25);
        assert_eq!(player.set_volume(1.5), Err(PlayerError::InvalidVolume(1.5)));

        assert_eq!(player.seek(10.0), Err(PlayerError::NothingToPlay));
        player.play().unwrap();
        player.seek(10.0).unwrap();
        assert_eq!(player.state().active_item.position, 10.0);
        assert_eq!(player.seek(-1.0), Err(PlayerError::InvalidPosition(-1.0)));
    }

    #[test]
    fn test_remove_items_keeps_active_item() {
        let mut player = player_with_items(5);
        player.play_item(&PlaylistRef::Index(0), 3).unwrap();

        player.remove_items(&PlaylistRef::Index(0), &[0, 1, 1]).unwrap();
        assert_eq!(player.state().active_item.index, Some(1));
        assert_eq!(player.playlists()[0].item_count, 3);

        player.remove_items(&PlaylistRef::Index(0), &[1]).unwrap();
        assert_eq!(player.state().playback_state, PlaybackState::Stopped);
        assert_eq!(player.state().active_item.index, None);

        assert_eq!(player.remove_items(&PlaylistRef::Index(0), &[7]), Err(PlayerError::ItemOutOfRange(7)));
    }

    #[test]
    fn test_playlist_management() {
        let mut player = MemoryPlayer::new();
        let added = player.add_playlist("Jazz");
        assert_eq!(added.id, "p2");
        assert_eq!(added.index, 1);

        player.rename_playlist(&PlaylistRef::Id("p2".to_string()), "Bebop").unwrap();
        assert_eq!(player.playlists()[1].title, "Bebop");

        player.remove_playlist(&PlaylistRef::Index(0)).unwrap();
        let playlists = player.playlists();
        assert_eq!(playlists.len(), 1);
        assert_eq!(playlists[0].id, "p2");
        assert!(playlists[0].is_current);

        let missing = player.remove_playlist(&PlaylistRef::Id("p1".to_string()));
        assert!(matches!(missing, Err(ref e) if e.is_not_found()));
    }

    #[test]
    fn test_removing_active_playlist_stops_playback() {
        let mut player = player_with_items(2);
        player.add_playlist("Other");
        player.play().unwrap();

        player.remove_playlist(&PlaylistRef::Index(0)).unwrap();
        let state = player.state();
        assert_eq!(state.playback_state, PlaybackState::Stopped);
        assert_eq!(state.active_item.playlist_id, None);
    }

    #[test]
    fn test_clear_playlist() {
        let mut player = player_with_items(3);
        player.play().unwrap();
        player.clear_playlist(&PlaylistRef::Current).unwrap();
        assert_eq!(player.playlists()[0].item_count, 0);
        assert_eq!(player.state().playback_state, PlaybackState::Stopped);
    }
}
