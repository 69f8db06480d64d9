//! Test utilities and fixtures for queue-minder tests.
//!
//! This module provides queue fixtures, proptest strategies and a recording
//! observer to reduce boilerplate in tests.
//!
//! # Example
//!
//! ```ignore
//! use queue_minder::test_utils::sample_queue;
//!
//! #[test]
//! fn test_something() {
//!     let tracks = sample_queue();
//!     // ... test logic
//! }
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use proptest::prelude::*;

use crate::engine::ViewObserver;
use crate::model::{AlbumIdentity, Track, TrackId};
use crate::view::View;

/// Creates a track on album `album` by `"Artist {album}"`.
///
/// The identity is the album name itself, so tracks with the same album
/// string always group.
pub fn album_track(id: u32, album: &str) -> Track {
    Track {
        id: TrackId(id),
        album_identity: Some(AlbumIdentity::new(album)),
        title: format!("Track {}", id),
        artist: format!("Artist {}", album),
        album: album.to_string(),
        path: format!("/music/{}/{:02}.flac", album, id),
        is_stream: false,
    }
}

/// Creates a track with no album identity.
pub fn keyless_track(id: u32) -> Track {
    Track::new(id, format!("Loose {}", id))
}

/// The canonical three-track queue: `[A1(X), A2(X), B1(Y)]` with ids 1, 2, 3.
pub fn sample_queue() -> Vec<Track> {
    let mut a1 = album_track(1, "X");
    a1.title = "A1".to_string();
    let mut a2 = album_track(2, "X");
    a2.title = "A2".to_string();
    let mut b1 = album_track(3, "Y");
    b1.title = "B1".to_string();
    vec![a1, a2, b1]
}

/// A longer queue: albums X(3), Y(1), Z(2), a stream, then X(2) again.
///
/// Ids run 1..=9 in queue order.
pub fn mixed_queue() -> Vec<Track> {
    vec![
        album_track(1, "X"),
        album_track(2, "X"),
        album_track(3, "X"),
        album_track(4, "Y"),
        album_track(5, "Z"),
        album_track(6, "Z"),
        Track::new(7, "Radio").as_stream("http://radio.example/live"),
        album_track(8, "X"),
        album_track(9, "X"),
    ]
}

/// Strategy for queues of up to `max_len` tracks with unique ids and
/// identities drawn from a small alphabet so runs actually occur.
pub fn arb_queue(max_len: usize) -> impl Strategy<Value = Vec<Track>> {
    let identity = prop_oneof![
        Just(None),
        Just(Some(String::new())),
        Just(Some("a".to_string())),
        Just(Some("b".to_string())),
        Just(Some("c".to_string())),
    ];
    prop::collection::vec(identity, 0..max_len).prop_map(|keys| {
        keys.into_iter()
            .enumerate()
            .map(|(i, key)| {
                let album = key.clone().unwrap_or_default();
                Track {
                    id: TrackId(i as u32 + 1),
                    album_identity: key.map(AlbumIdentity::new),
                    title: format!("t{}", i),
                    artist: format!("artist {}", album),
                    album,
                    path: String::new(),
                    is_stream: false,
                }
            })
            .collect()
    })
}

/// Observer that records the row count of every published view.
#[derive(Clone, Default)]
pub struct RecordingObserver {
    pub seen: Arc<Mutex<Vec<usize>>>,
}

impl ViewObserver for RecordingObserver {
    fn view_rebuilt(&mut self, view: &View) {
        self.seen.lock().push(view.len());
    }
}
