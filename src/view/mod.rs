//! Collapsed, filtered presentation of the grouped queue.
//!
//! [`build_view`] turns grouped [`Entry`] values into the rows the UI shows.
//! Each group is either folded into one row or exploded into its tracks,
//! depending on [`CollapseState`]; the [`Filter`] then drops rows that do
//! not match the search text.
//!
//! # Collapse rule
//!
//! A group renders as a single row only when collapsing is enabled, it does
//! not hold the last playing track, and the user has not expanded it by hand.
//! Everything else is shown track by track.

pub mod scroll;

use serde::Serialize;
use smallvec::SmallVec;

use crate::grouping::{Entry, Group};
use crate::index::IndexTranslator;
use crate::model::{Track, TrackId};

pub use scroll::{ScrollGuard, ScrollHost, ScrollPosition};

/// Per-engine state that outlives individual rebuilds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollapseState {
    /// User preference: fold album runs into one row
    pub collapse_enabled: bool,
    /// First track id of the group the user expanded, if any
    pub manually_expanded_group: Option<TrackId>,
    /// Track shown as now playing; only refreshed on demand
    pub last_playing_track: Option<TrackId>,
}

impl CollapseState {
    /// Create state with the given collapse preference and nothing else set.
    pub fn new(collapse_enabled: bool) -> Self {
        Self {
            collapse_enabled,
            ..Self::default()
        }
    }

    /// Whether `group` renders as one folded row.
    pub fn should_collapse(&self, group: &Group) -> bool {
        let holds_playing = self
            .last_playing_track
            .is_some_and(|id| group.contains(id));

        self.collapse_enabled
            && !holds_playing
            && group.len() >= 2
            && self.manually_expanded_group != Some(group.first_track_id())
    }
}

/// Normalized search text.
///
/// Blank text means "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter(Option<String>);

impl Filter {
    pub fn new(text: &str) -> Self {
        let needle = text.trim();
        if needle.is_empty() {
            Self(None)
        } else {
            Self(Some(needle.to_lowercase()))
        }
    }

    /// No filter at all.
    pub fn none() -> Self {
        Self(None)
    }

    pub fn is_active(&self) -> bool {
        self.0.is_some()
    }

    /// The lowercase needle, if active.
    pub fn needle(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn accepts_track(&self, track: &Track) -> bool {
        self.needle().is_none_or(|needle| track.matches(needle))
    }

    pub fn accepts_group(&self, group: &Group) -> bool {
        self.needle().is_none_or(|needle| group.matches(needle))
    }
}

/// Row discriminant exposed to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    Track,
    Group,
}

/// One visible row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRow {
    entry: Entry,
    now_playing: bool,
}

impl ViewRow {
    fn track(track: Track, now_playing: bool) -> Self {
        Self {
            entry: Entry::Track(track),
            now_playing,
        }
    }

    fn group(group: Group) -> Self {
        Self {
            entry: Entry::Group(group),
            now_playing: false,
        }
    }

    pub fn entry(&self) -> &Entry {
        &self.entry
    }

    pub fn kind(&self) -> RowKind {
        match self.entry {
            Entry::Track(_) => RowKind::Track,
            Entry::Group(_) => RowKind::Group,
        }
    }

    /// Flat queue slots covered by this row.
    pub fn size(&self) -> usize {
        self.entry.size()
    }

    pub fn now_playing(&self) -> bool {
        self.now_playing
    }

    pub fn as_track(&self) -> Option<&Track> {
        match &self.entry {
            Entry::Track(track) => Some(track),
            Entry::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&Group> {
        match &self.entry {
            Entry::Group(group) => Some(group),
            Entry::Track(_) => None,
        }
    }

    pub fn main_line(&self) -> String {
        match &self.entry {
            Entry::Track(track) => track.main_line(),
            Entry::Group(group) => group.main_line(),
        }
    }

    pub fn sub_line(&self) -> String {
        match &self.entry {
            Entry::Track(track) => track.sub_line(),
            Entry::Group(group) => group.sub_line(),
        }
    }

    /// Every queue id behind this row, in queue order.
    // SmallVec: track rows carry one id, album rows rarely exceed a dozen
    pub fn track_ids(&self) -> SmallVec<[TrackId; 8]> {
        match &self.entry {
            Entry::Track(track) => SmallVec::from_elem(track.id, 1),
            Entry::Group(group) => group.track_ids().collect(),
        }
    }

    /// Serializable description for hosts that render rows themselves.
    pub fn summary(&self) -> RowSummary {
        RowSummary {
            kind: self.kind(),
            main_line: self.main_line(),
            sub_line: self.sub_line(),
            now_playing: self.now_playing,
            ids: self.track_ids(),
        }
    }
}

/// What the UI needs to draw one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowSummary {
    pub kind: RowKind,
    pub main_line: String,
    pub sub_line: String,
    pub now_playing: bool,
    pub ids: SmallVec<[TrackId; 8]>,
}

/// The published, immutable result of one rebuild.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct View {
    rows: Vec<ViewRow>,
    scroll_anchor: Option<usize>,
    filtered: bool,
}

impl View {
    pub fn rows(&self) -> &[ViewRow] {
        &self.rows
    }

    pub fn get(&self, index: usize) -> Option<&ViewRow> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// View index of the now-playing row, if it is visible.
    pub fn scroll_anchor(&self) -> Option<usize> {
        self.scroll_anchor
    }

    /// Whether a text filter shaped this view.
    pub fn is_filtered(&self) -> bool {
        self.filtered
    }

    /// Index arithmetic over this view.
    pub fn translator(&self) -> IndexTranslator<'_> {
        IndexTranslator::new(&self.rows)
    }

    pub fn summaries(&self) -> Vec<RowSummary> {
        self.rows.iter().map(ViewRow::summary).collect()
    }
}

/// Build the visible rows from grouped entries.
pub fn build_view(entries: &[Entry], state: &CollapseState, filter: &Filter) -> View {
    let mut rows = Vec::with_capacity(entries.len());
    let mut scroll_anchor = None;

    let mut push_track = |rows: &mut Vec<ViewRow>, track: &Track| {
        if !filter.accepts_track(track) {
            return;
        }
        let now_playing = state.last_playing_track == Some(track.id);
        if now_playing {
            scroll_anchor = Some(rows.len());
        }
        rows.push(ViewRow::track(track.clone(), now_playing));
    };

    for entry in entries {
        match entry {
            Entry::Group(group) if state.should_collapse(group) => {
                if filter.accepts_group(group) {
                    rows.push(ViewRow::group(group.clone()));
                }
            }
            Entry::Group(group) => {
                for track in group.tracks() {
                    push_track(&mut rows, track);
                }
            }
            Entry::Track(track) => push_track(&mut rows, track),
        }
    }

    View {
        rows,
        scroll_anchor,
        filtered: filter.is_active(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::build_entries;
    use crate::test_utils::{mixed_queue, sample_queue};

    fn view_of(tracks: &[Track], state: &CollapseState, filter: &str) -> View {
        let entries = build_entries(tracks, state.last_playing_track);
        build_view(&entries, state, &Filter::new(filter))
    }

    fn kinds(view: &View) -> Vec<RowKind> {
        view.rows().iter().map(ViewRow::kind).collect()
    }

    #[test]
    fn test_collapsed_sample() {
        let view = view_of(&sample_queue(), &CollapseState::new(true), "");

        assert_eq!(kinds(&view), vec![RowKind::Group, RowKind::Track]);
        assert_eq!(view.rows()[0].size(), 2);
        assert_eq!(view.rows()[1].as_track().map(|t| t.id), Some(TrackId(3)));
        assert_eq!(view.translator().to_flat_range(1).start, 2);
        assert_eq!(view.scroll_anchor(), None);
    }

    #[test]
    fn test_collapse_disabled_explodes_everything() {
        let view = view_of(&sample_queue(), &CollapseState::new(false), "");
        assert_eq!(view.len(), 3);
        assert!(view.rows().iter().all(|r| r.kind() == RowKind::Track));
    }

    #[test]
    fn test_filter_excludes_whole_group() {
        let view = view_of(&sample_queue(), &CollapseState::new(true), "y");
        assert_eq!(view.len(), 1);
        assert_eq!(view.rows()[0].as_track().map(|t| t.id), Some(TrackId(3)));
        assert!(view.is_filtered());
    }

    #[test]
    fn test_filter_keeps_group_when_one_member_matches() {
        let view = view_of(&sample_queue(), &CollapseState::new(true), "a2");
        assert_eq!(view.len(), 1);
        assert_eq!(view.rows()[0].kind(), RowKind::Group);
        assert_eq!(view.rows()[0].size(), 2);
    }

    #[test]
    fn test_filter_on_exploded_group_keeps_matching_tracks() {
        let view = view_of(&sample_queue(), &CollapseState::new(false), "A2");
        assert_eq!(view.len(), 1);
        assert_eq!(view.rows()[0].as_track().map(|t| t.id), Some(TrackId(2)));
    }

    #[test]
    fn test_blank_filter_is_inactive() {
        let view = view_of(&sample_queue(), &CollapseState::new(true), "   ");
        assert_eq!(view.len(), 2);
        assert!(!view.is_filtered());
    }

    #[test]
    fn test_playing_group_renders_exploded() {
        let state = CollapseState {
            collapse_enabled: true,
            manually_expanded_group: None,
            last_playing_track: Some(TrackId(2)),
        };
        let view = view_of(&sample_queue(), &state, "");

        assert_eq!(view.len(), 3);
        assert!(view.rows()[1].now_playing());
        assert!(!view.rows()[0].now_playing());
        assert_eq!(view.scroll_anchor(), Some(1));
    }

    #[test]
    fn test_manually_expanded_group_renders_exploded() {
        let state = CollapseState {
            collapse_enabled: true,
            manually_expanded_group: Some(TrackId(5)),
            last_playing_track: None,
        };
        let view = view_of(&mixed_queue(), &state, "");

        // X(3) folded, Y, Z exploded, stream, X(2) folded
        let sizes: Vec<usize> = view.rows().iter().map(ViewRow::size).collect();
        assert_eq!(sizes, vec![3, 1, 1, 1, 1, 2]);
    }

    #[test]
    fn test_bare_track_gets_now_playing_marker() {
        let state = CollapseState {
            collapse_enabled: true,
            manually_expanded_group: None,
            last_playing_track: Some(TrackId(7)),
        };
        let view = view_of(&mixed_queue(), &state, "");
        let anchor = view.scroll_anchor().unwrap();
        assert_eq!(view.rows()[anchor].as_track().map(|t| t.id), Some(TrackId(7)));
        assert!(view.rows()[anchor].now_playing());
    }

    #[test]
    fn test_anchor_hidden_by_filter() {
        let state = CollapseState {
            collapse_enabled: true,
            manually_expanded_group: None,
            last_playing_track: Some(TrackId(1)),
        };
        let view = view_of(&sample_queue(), &state, "b1");
        assert_eq!(view.len(), 1);
        assert_eq!(view.scroll_anchor(), None);
    }

    #[test]
    fn test_row_summary() {
        let view = view_of(&sample_queue(), &CollapseState::new(true), "");
        let summary = view.rows()[0].summary();
        assert_eq!(summary.kind, RowKind::Group);
        assert_eq!(summary.main_line, "(2) [X]");
        assert_eq!(summary.ids.as_slice(), &[TrackId(1), TrackId(2)]);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["kind"], "group");
    }
}
