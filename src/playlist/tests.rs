use super::*;
use crate::config::SeedTrack;
use crate::picker::FileHandle;
use std::sync::Arc;

fn t(title: &str) -> Track {
    Track::new(title, "Artist", Locator::resource(format!("audio/{title}.mp3")))
}

#[test]
fn title_strips_only_the_final_extension() {
    assert_eq!(title_from_file_name("Song.mp3"), "Song");
    assert_eq!(title_from_file_name("track.two.wav"), "track.two");
    assert_eq!(title_from_file_name("no_extension"), "no_extension");
}

#[test]
fn title_keeps_names_without_a_usable_extension() {
    assert_eq!(title_from_file_name("notes."), "notes.");
    assert_eq!(title_from_file_name("dir.d/file"), "dir.d/file");
}

#[test]
fn bare_extension_leaves_an_empty_title() {
    assert_eq!(title_from_file_name(".mp3"), "");
    assert_eq!(title_from_file_name(".hidden.ogg"), ".hidden");
}

#[test]
fn next_and_prev_wrap_around() {
    let playlist = Playlist::new(vec![t("A"), t("B"), t("C")]);

    assert_eq!(playlist.next_index(0), Some(1));
    assert_eq!(playlist.next_index(2), Some(0));
    assert_eq!(playlist.prev_index(0), Some(2));
    assert_eq!(playlist.prev_index(2), Some(1));
}

#[test]
fn next_and_prev_on_empty_playlist_are_none() {
    let playlist = Playlist::default();
    assert_eq!(playlist.next_index(0), None);
    assert_eq!(playlist.prev_index(0), None);
}

#[test]
fn set_duration_ignores_out_of_range_index() {
    let mut playlist = Playlist::new(vec![t("A")]);
    assert!(playlist.set_duration(0, "3:21".into()));
    assert!(!playlist.set_duration(5, "9:99".into()));
    assert_eq!(playlist.get(0).unwrap().duration, "3:21");
}

#[test]
fn new_tracks_start_with_placeholder_duration() {
    assert_eq!(t("A").duration, UNKNOWN_DURATION);
    assert_eq!(UNKNOWN_DURATION, "0:00");
}

#[test]
fn seed_entries_become_resource_tracks() {
    let seed = vec![
        SeedTrack {
            title: "Sapphire".into(),
            artist: "Ed Sheeran".into(),
            source: "audio/Sapphire.mp3".into(),
            cover: Some("images/sapphire.jpg".into()),
        },
        SeedTrack {
            title: "Bare".into(),
            artist: "Nobody".into(),
            source: "audio/bare.mp3".into(),
            cover: Some("  ".into()),
        },
    ];

    let playlist = Playlist::from_seed(&seed);
    assert_eq!(playlist.len(), 2);

    let first = playlist.get(0).unwrap();
    assert_eq!(first.title, "Sapphire");
    assert_eq!(first.source, Locator::resource("audio/Sapphire.mp3"));
    assert_eq!(first.cover.as_deref(), Some("images/sapphire.jpg"));
    assert_eq!(first.duration, "0:00");

    assert_eq!(playlist.get(1).unwrap().cover, None);
}

#[test]
fn uploaded_track_uses_placeholder_artist_and_no_cover() {
    let file = FileHandle::new("Song.mp3", Arc::from(&b"bytes"[..]));
    let mut store = TransientStore::new();
    let source = store.register(file.data.clone());

    let track = Track::uploaded(&file, "Uploaded Song", source.clone());
    assert_eq!(track.title, "Song");
    assert_eq!(track.artist, "Uploaded Song");
    assert_eq!(track.source, source);
    assert_eq!(track.cover, None);
}

#[test]
fn transient_store_resolves_registered_bytes() {
    let mut store = TransientStore::new();
    let a = store.register(Arc::from(&b"first"[..]));
    let b = store.register(Arc::from(&b"second"[..]));
    assert_ne!(a, b);
    assert_eq!(store.len(), 2);

    let Locator::Transient(id) = b else {
        panic!("expected a transient locator");
    };
    assert_eq!(store.resolve(id).as_deref(), Some(&b"second"[..]));
    assert_eq!(b.to_string(), format!("blob:cadenza/{}", id.get()));
}
