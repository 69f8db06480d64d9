//! Album run detection.
//!
//! Partitions a queue snapshot into maximal runs of consecutive tracks that
//! share an album identity. Runs of two or more tracks become a [`Group`];
//! everything else stays a bare [`Entry::Track`].

use crate::model::{AlbumIdentity, Track, TrackId};

/// A run of consecutive queue tracks from one album.
///
/// Built once per rebuild and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    identity: AlbumIdentity,
    tracks: Vec<Track>,
    is_playing: bool,
}

impl Group {
    /// Id of the first track; identifies the group across rebuilds.
    pub fn first_track_id(&self) -> TrackId {
        self.tracks[0].id
    }

    /// Tracks in queue order.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Shared album key.
    pub fn identity(&self) -> &AlbumIdentity {
        &self.identity
    }

    /// Number of queue slots the group covers.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Groups are never empty; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Whether the last playing track was in this run at build time.
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Whether `id` is one of the group's tracks.
    pub fn contains(&self, id: TrackId) -> bool {
        self.tracks.iter().any(|t| t.id == id)
    }

    /// All track ids in queue order.
    pub fn track_ids(&self) -> impl Iterator<Item = TrackId> + '_ {
        self.tracks.iter().map(|t| t.id)
    }

    /// Album artist, taken from the first track.
    pub fn artist(&self) -> &str {
        &self.tracks[0].artist
    }

    /// Album name, taken from the first track.
    pub fn album(&self) -> &str {
        &self.tracks[0].album
    }

    /// `"(N) [album]"`
    pub fn main_line(&self) -> String {
        format!("({}) [{}]", self.len(), self.album())
    }

    /// `"[artist]"`
    pub fn sub_line(&self) -> String {
        format!("[{}]", self.artist())
    }

    /// True if any member track matches a lowercase needle.
    pub fn matches(&self, needle: &str) -> bool {
        self.tracks.iter().any(|t| t.matches(needle))
    }
}

/// One element of the grouped queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Track(Track),
    Group(Group),
}

impl Entry {
    /// Flat queue slots covered by this entry.
    pub fn size(&self) -> usize {
        match self {
            Entry::Track(_) => 1,
            Entry::Group(group) => group.len(),
        }
    }
}

/// Split `tracks` into album runs.
///
/// `last_playing` only feeds [`Group::is_playing`]; it never affects the
/// partitioning.
pub fn build_entries(tracks: &[Track], last_playing: Option<TrackId>) -> Vec<Entry> {
    let mut entries = Vec::with_capacity(tracks.len());
    let mut run: Vec<Track> = Vec::new();

    for track in tracks {
        let extends_run = match (run.last().and_then(Track::album_key), track.album_key()) {
            (Some(current), Some(next)) => current == next,
            _ => false,
        };

        if !extends_run {
            flush_run(&mut run, &mut entries, last_playing);
        }
        run.push(track.clone());
    }
    flush_run(&mut run, &mut entries, last_playing);

    entries
}

fn flush_run(run: &mut Vec<Track>, entries: &mut Vec<Entry>, last_playing: Option<TrackId>) {
    match run.len() {
        0 => {}
        1 => {
            if let Some(track) = run.pop() {
                entries.push(Entry::Track(track));
            }
        }
        _ => {
            let tracks = std::mem::take(run);
            let Some(identity) = tracks[0].album_key().cloned() else {
                // Keyless tracks never form runs longer than one.
                entries.extend(tracks.into_iter().map(Entry::Track));
                return;
            };
            let is_playing = last_playing.is_some_and(|id| tracks.iter().any(|t| t.id == id));
            entries.push(Entry::Group(Group {
                identity,
                tracks,
                is_playing,
            }));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{album_track, keyless_track, sample_queue};

    #[test]
    fn test_groups_consecutive_runs() {
        let entries = build_entries(&sample_queue(), None);

        assert_eq!(entries.len(), 2);
        match &entries[0] {
            Entry::Group(group) => {
                assert_eq!(group.len(), 2);
                assert_eq!(group.first_track_id(), TrackId(1));
            }
            other => panic!("expected group, got {:?}", other),
        }
        assert!(matches!(&entries[1], Entry::Track(t) if t.id == TrackId(3)));
    }

    #[test]
    fn test_split_album_forms_two_groups() {
        let tracks = vec![
            album_track(1, "X"),
            album_track(2, "X"),
            album_track(3, "Y"),
            album_track(4, "X"),
            album_track(5, "X"),
        ];
        let entries = build_entries(&tracks, None);
        let sizes: Vec<usize> = entries.iter().map(Entry::size).collect();
        assert_eq!(sizes, vec![2, 1, 2]);
    }

    #[test]
    fn test_keyless_tracks_never_group() {
        let tracks = vec![keyless_track(1), keyless_track(2), keyless_track(3)];
        let entries = build_entries(&tracks, None);
        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(|e| matches!(e, Entry::Track(_))));
    }

    #[test]
    fn test_keyless_track_breaks_run() {
        let tracks = vec![album_track(1, "X"), keyless_track(2), album_track(3, "X")];
        let entries = build_entries(&tracks, None);
        assert_eq!(entries.len(), 3);
    }

    #[test]
    fn test_playing_flag() {
        let entries = build_entries(&sample_queue(), Some(TrackId(2)));
        let Entry::Group(group) = &entries[0] else {
            panic!("expected group");
        };
        assert!(group.is_playing());

        let entries = build_entries(&sample_queue(), Some(TrackId(3)));
        let Entry::Group(group) = &entries[0] else {
            panic!("expected group");
        };
        assert!(!group.is_playing());
    }

    #[test]
    fn test_group_display_lines() {
        let entries = build_entries(&sample_queue(), None);
        let Entry::Group(group) = &entries[0] else {
            panic!("expected group");
        };
        assert_eq!(group.main_line(), "(2) [X]");
        assert_eq!(group.sub_line(), "[Artist X]");
    }

    #[test]
    fn test_empty_input() {
        assert!(build_entries(&[], None).is_empty());
    }
}
