//! Core data models for the play queue.
//!
//! Defines the primary entities: [`TrackId`], [`AlbumIdentity`] and
//! [`Track`]. Tracks are what the playback service hands us; everything the
//! view engine builds on top of them lives in [`crate::grouping`] and
//! [`crate::view`].
//!
//! # Serialization
//!
//! Tracks derive serde so queue files can be loaded by the CLI:
//!
//! ```json
//! { "id": 7, "album_identity": "Artist|Album|/music/a", "title": "Song",
//!   "artist": "Artist", "album": "Album", "path": "/music/a/01.flac" }
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Queue-scoped track identifier.
///
/// Unique within one queue instance; the playback service assigns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(pub u32);

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for TrackId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Opaque album equality key.
///
/// Two tracks belong to the same album exactly when their identities compare
/// equal. The engine never looks inside the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlbumIdentity(String);

impl AlbumIdentity {
    /// Wrap a caller-supplied key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Build the conventional key: album artist, album name and the
    /// directory the file lives in.
    ///
    /// The directory keeps same-named albums from different rips apart.
    pub fn from_parts(artist: &str, album: &str, path: &str) -> Self {
        let parent = Path::new(path)
            .parent()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_default();
        Self(format!("{}\u{1f}{}\u{1f}{}", artist, album, parent))
    }

    /// The raw key.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Empty keys never group.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A single entry of the flat play queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Queue id
    pub id: TrackId,
    /// Grouping key (absent or empty = never grouped)
    #[serde(default)]
    pub album_identity: Option<AlbumIdentity>,
    /// Track title
    #[serde(default)]
    pub title: String,
    /// Album artist, falling back to track artist
    #[serde(default)]
    pub artist: String,
    /// Album name
    #[serde(default)]
    pub album: String,
    /// File path or stream URL
    #[serde(default)]
    pub path: String,
    /// Internet radio / stream entry
    #[serde(default)]
    pub is_stream: bool,
}

impl Track {
    /// Create a track with just an id and title.
    pub fn new(id: impl Into<TrackId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            album_identity: None,
            title: title.into(),
            artist: String::new(),
            album: String::new(),
            path: String::new(),
            is_stream: false,
        }
    }

    /// Set artist and album, deriving the identity from them and the path.
    pub fn with_album(mut self, artist: impl Into<String>, album: impl Into<String>) -> Self {
        self.artist = artist.into();
        self.album = album.into();
        self.album_identity = Some(self.derived_identity());
        self
    }

    /// Override the grouping key.
    pub fn with_identity(mut self, identity: Option<AlbumIdentity>) -> Self {
        self.album_identity = identity;
        self
    }

    /// Mark the track as a stream with the given URL.
    ///
    /// An identity derived by [`Track::with_album`] follows the new path; one
    /// set through [`Track::with_identity`] is kept as is.
    pub fn as_stream(mut self, url: impl Into<String>) -> Self {
        let derived = self.derived_identity();
        self.path = url.into();
        self.is_stream = true;
        if self.album_identity == Some(derived) {
            self.album_identity = Some(self.derived_identity());
        }
        self
    }

    fn derived_identity(&self) -> AlbumIdentity {
        AlbumIdentity::from_parts(&self.artist, &self.album, &self.path)
    }

    /// The grouping key, if the track can join a run.
    pub fn album_key(&self) -> Option<&AlbumIdentity> {
        self.album_identity.as_ref().filter(|key| !key.is_empty())
    }

    /// Case-insensitive match against artist, album and title.
    ///
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.artist.to_lowercase().contains(needle)
            || self.album.to_lowercase().contains(needle)
            || self.title.to_lowercase().contains(needle)
    }

    /// Primary display line.
    pub fn main_line(&self) -> String {
        if !self.title.is_empty() {
            self.title.clone()
        } else if !self.path.is_empty() {
            self.path.clone()
        } else {
            "Unknown".to_string()
        }
    }

    /// Secondary display line.
    pub fn sub_line(&self) -> String {
        if self.is_stream {
            return self.path.clone();
        }
        match (self.artist.is_empty(), self.album.is_empty()) {
            (false, false) => format!("{} - {}", self.artist, self.album),
            (false, true) => self.artist.clone(),
            (true, false) => self.album.clone(),
            (true, true) => String::new(),
        }
    }
}
