//! Bulk removal planning for multi-row selections.
//!
//! Selections are made on view rows, but the playback service removes by
//! track id. Folded album rows expand to every id they cover.

use std::collections::{BTreeSet, HashSet};

use crate::model::TrackId;
use crate::view::View;

/// What to do with a multi-row selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionAction {
    /// Remove the selected rows
    Delete,
    /// Keep the selected rows, remove every other shown row
    Crop,
}

/// Track ids to hand to `remove_tracks_by_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalPlan {
    ids: BTreeSet<TrackId>,
}

impl RemovalPlan {
    pub fn ids(&self) -> &BTreeSet<TrackId> {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn into_ids(self) -> Vec<TrackId> {
        self.ids.into_iter().collect()
    }
}

/// Collect the ids removed by `action` on `selected` rows.
///
/// Only rows present in `view` are considered, so a crop on a filtered view
/// never touches hidden tracks. Returns `None` when nothing would be removed.
pub fn plan_removal(
    view: &View,
    selected: &HashSet<usize>,
    action: SelectionAction,
) -> Option<RemovalPlan> {
    let ids: BTreeSet<TrackId> = view
        .rows()
        .iter()
        .enumerate()
        .filter(|(index, _)| match action {
            SelectionAction::Delete => selected.contains(index),
            SelectionAction::Crop => !selected.contains(index),
        })
        .flat_map(|(_, row)| row.track_ids())
        .collect();

    (!ids.is_empty()).then_some(RemovalPlan { ids })
}

/// All ids behind one row ("remove album" on a folded row).
pub fn row_track_ids(view: &View, row: usize) -> Option<RemovalPlan> {
    let ids: BTreeSet<TrackId> = view.get(row)?.track_ids().into_iter().collect();
    Some(RemovalPlan { ids })
}
