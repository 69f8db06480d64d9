//! Grouped view rendering and queue edits.

use std::collections::HashSet;
use std::path::Path;

use tokio::runtime::Runtime;
use tracing::warn;

use super::ViewArgs;
use super::queue_file::{self, QueueFile};
use crate::config;
use crate::controller::QueueController;
use crate::engine::{EngineMode, QueueViewEngine};
use crate::model::TrackId;
use crate::queue::MemoryQueue;
use crate::selection::SelectionAction;
use crate::view::RowKind;

/// Print the view of a queue file
pub fn cmd_view(rt: &Runtime, path: &Path, args: &ViewArgs, json: bool) -> anyhow::Result<()> {
    let ctl = open(rt, path, args)?;

    if json {
        let rows = ctl.engine().view().summaries();
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print_view(ctl.engine());
    }
    Ok(())
}

/// Apply a drag and print the resulting view
pub fn cmd_drag(
    rt: &Runtime,
    path: &Path,
    from: usize,
    to: usize,
    args: &ViewArgs,
    write: bool,
) -> anyhow::Result<()> {
    let mut ctl = open(rt, path, args)?;

    match rt.block_on(ctl.drag_dropped(from, to))? {
        Some(cmd) => {
            println!(
                "Moved {} track(s) from position {} to {}",
                cmd.count, cmd.from, cmd.to
            );
        }
        None if ctl.engine().mode() == EngineMode::Filtered => {
            println!("Reordering is disabled while a filter is active.");
            return Ok(());
        }
        None => {
            println!("Nothing to move.");
            return Ok(());
        }
    }

    rt.block_on(ctl.refresh(false))?;
    print_view(ctl.engine());
    if write {
        store(path, &ctl)?;
    }
    Ok(())
}

/// Remove (or crop to) view rows and print the resulting view
pub fn cmd_remove(
    rt: &Runtime,
    path: &Path,
    rows: &[usize],
    crop: bool,
    args: &ViewArgs,
    write: bool,
) -> anyhow::Result<()> {
    let mut ctl = open(rt, path, args)?;
    let selected: HashSet<usize> = rows.iter().copied().collect();
    let action = if crop {
        SelectionAction::Crop
    } else {
        SelectionAction::Delete
    };

    let removed = rt.block_on(ctl.remove_selection(&selected, action))?;
    println!("Removed {} track(s)", removed);
    if removed == 0 {
        return Ok(());
    }

    rt.block_on(ctl.refresh(false))?;
    print_view(ctl.engine());
    if write {
        store(path, &ctl)?;
    }
    Ok(())
}

fn open(rt: &Runtime, path: &Path, args: &ViewArgs) -> anyhow::Result<QueueController<MemoryQueue>> {
    let file = queue_file::load(path)?;

    let mut view_config = config::load().view;
    if args.collapse {
        view_config.collapse_albums = true;
    }
    if args.no_collapse {
        view_config.collapse_albums = false;
    }

    let queue = MemoryQueue::new(file.tracks);
    queue.set_current(file.current)?;

    let mut ctl = QueueController::new(queue, &view_config);
    rt.block_on(ctl.refresh(true))?;

    if let Some(id) = args.expand
        && !ctl.engine_mut().toggle_group(TrackId(id))
    {
        warn!(id, "No album row starts with this track");
    }
    if let Some(text) = &args.filter {
        ctl.engine_mut().on_filter_changed(text);
    }
    Ok(ctl)
}

fn store(path: &Path, ctl: &QueueController<MemoryQueue>) -> anyhow::Result<()> {
    let file = QueueFile {
        current: ctl.service().current(),
        tracks: ctl.service().tracks(),
    };
    queue_file::save(path, &file)?;
    println!("Saved {:?}", path);
    Ok(())
}

fn print_view(engine: &QueueViewEngine) {
    let view = engine.view();
    let translator = view.translator();

    if view.is_empty() {
        println!("(no rows)");
    }
    for (index, row) in view.rows().iter().enumerate() {
        let marker = match (row.kind(), row.now_playing()) {
            (_, true) => '>',
            (RowKind::Group, false) => '+',
            (RowKind::Track, false) => ' ',
        };
        let range = translator.to_flat_range(index);
        println!(
            "{:>3} {} {:<40} {}  [{}..{})",
            index,
            marker,
            row.main_line(),
            row.sub_line(),
            range.start,
            range.end
        );
    }

    if engine.mode() == EngineMode::Filtered {
        println!("-- filtered: {} row(s), reordering disabled", view.len());
    } else {
        println!("-- {} row(s), {} track(s)", view.len(), translator.total());
    }
}
