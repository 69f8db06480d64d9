//! Drag-and-drop translation onto the flat queue.
//!
//! A drag in the view moves one row, which may stand for several queue
//! tracks. The planner turns it into a single block move in queue
//! coordinates: take `count` tracks starting at `from`, remove them, and
//! re-insert them so the block starts at `to` in the shortened queue.
//!
//! Every planner refuses to work on a filtered view, where rows no longer
//! map onto contiguous queue positions.

use serde::Serialize;

use crate::view::View;

/// One block move for the playback service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveCommand {
    /// First flat position of the block
    pub from: usize,
    /// Number of tracks in the block
    pub count: usize,
    /// Flat position of the block after the move
    pub to: usize,
}

/// Plan a drag from view row `from` to view row `to`.
///
/// `to` uses list semantics: the index the row should occupy once it has
/// been removed from its old place. Returns `None` when nothing would move.
pub fn plan_drag(view: &View, from: usize, to: usize) -> Option<MoveCommand> {
    if from == to || view.is_filtered() {
        return None;
    }

    let count = view.get(from)?.size();
    let translator = view.translator();
    let flat_from = translator.to_flat_range(from).start;

    let flat_to = if to > from {
        // Drop lands below the target row; the block's own slots vanish first.
        translator
            .to_flat_range(to.saturating_add(1))
            .start
            .saturating_sub(count)
    } else {
        translator.to_flat_range(to).start
    };

    block_move(flat_from, count, flat_to)
}

/// Move a row's block to the head of the queue.
pub fn plan_move_to_top(view: &View, row: usize) -> Option<MoveCommand> {
    let (flat_from, count) = block_of(view, row)?;
    block_move(flat_from, count, 0)
}

/// Move a row's block to the tail of the queue.
pub fn plan_move_to_bottom(view: &View, row: usize) -> Option<MoveCommand> {
    let (flat_from, count) = block_of(view, row)?;
    let total = view.translator().total();
    block_move(flat_from, count, total - count)
}

/// Move a row's block right after the track at flat position `playing`.
///
/// Refused when the block contains the playing track.
pub fn plan_play_next(view: &View, row: usize, playing: usize) -> Option<MoveCommand> {
    let (flat_from, count) = block_of(view, row)?;
    if (flat_from..flat_from + count).contains(&playing) {
        return None;
    }

    let flat_to = if flat_from > playing {
        playing + 1
    } else {
        playing + 1 - count
    };
    block_move(flat_from, count, flat_to)
}

fn block_of(view: &View, row: usize) -> Option<(usize, usize)> {
    if view.is_filtered() {
        return None;
    }
    let range = view.translator().to_flat_range(row);
    if range.is_empty() {
        return None;
    }
    Some((range.start, range.len()))
}

fn block_move(from: usize, count: usize, to: usize) -> Option<MoveCommand> {
    (from != to && count > 0).then_some(MoveCommand { from, count, to })
}
