//! Glue between a [`QueueService`] and the [`QueueViewEngine`].
//!
//! The controller is the only place that awaits the playback service. It
//! fetches fresh snapshots, feeds them to the engine, and submits the
//! commands the engine plans. Submitting a command never touches the
//! current view: the next [`refresh`](QueueController::refresh) after the
//! service reports a change is what the user sees.

use std::collections::HashSet;

use tracing::{info, warn};

use crate::config::ViewConfig;
use crate::engine::QueueViewEngine;
use crate::error::{Result, ResultExt};
use crate::queue::{QueueService, QueueSnapshot};
use crate::reorder::MoveCommand;
use crate::selection::{RemovalPlan, SelectionAction};

pub struct QueueController<S: QueueService> {
    service: S,
    engine: QueueViewEngine,
}

impl<S: QueueService> QueueController<S> {
    pub fn new(service: S, config: &ViewConfig) -> Self {
        Self {
            service,
            engine: QueueViewEngine::new(config),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn engine(&self) -> &QueueViewEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut QueueViewEngine {
        &mut self.engine
    }

    /// Pull the queue and current track from the service and rebuild.
    pub async fn refresh(&mut self, force_playing_refresh: bool) -> Result<()> {
        let tracks = self
            .service
            .get_queue()
            .await
            .with_context("Failed to fetch queue")?;
        let current = self
            .service
            .current_track_id()
            .await
            .with_context("Failed to fetch current track")?;

        self.engine.on_queue_changed(
            QueueSnapshot::from(tracks),
            current,
            force_playing_refresh,
        );
        Ok(())
    }

    /// Plan and submit the move for a drop. Returns the submitted command,
    /// or `None` if the drop was a no-op.
    pub async fn drag_dropped(&self, from: usize, to: usize) -> Result<Option<MoveCommand>> {
        let Some(command) = self.engine.on_drag_dropped(from, to) else {
            return Ok(None);
        };
        self.submit_move(command).await?;
        Ok(Some(command))
    }

    /// Submit an already planned move.
    pub async fn submit_move(&self, command: MoveCommand) -> Result<()> {
        if let Err(e) = self
            .service
            .move_tracks(command.from, command.count, command.to)
            .await
        {
            warn!(?command, error = %e, "Queue move failed");
            return Err(e.into());
        }
        info!(?command, "Submitted queue move");
        Ok(())
    }

    /// Remove the selected rows (or crop to them). Returns how many tracks
    /// were submitted for removal.
    pub async fn remove_selection(
        &self,
        selected: &HashSet<usize>,
        action: SelectionAction,
    ) -> Result<usize> {
        match self.engine.plan_removal(selected, action) {
            Some(plan) => self.submit_removal(plan).await,
            None => Ok(0),
        }
    }

    /// Remove every track behind one row.
    pub async fn remove_row(&self, row: usize) -> Result<usize> {
        match self.engine.plan_row_removal(row) {
            Some(plan) => self.submit_removal(plan).await,
            None => Ok(0),
        }
    }

    async fn submit_removal(&self, plan: RemovalPlan) -> Result<usize> {
        if let Err(e) = self.service.remove_tracks_by_id(plan.ids()).await {
            warn!(tracks = plan.len(), error = %e, "Queue removal failed");
            return Err(e.into());
        }
        info!(tracks = plan.len(), "Submitted queue removal");
        Ok(plan.len())
    }
}
