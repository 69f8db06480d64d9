//! The flat play queue as seen from the view engine.
//!
//! The queue itself belongs to the playback service. This module defines the
//! [`QueueService`] seam the engine is driven through, the immutable
//! [`QueueSnapshot`] taken on every change, and an in-process
//! [`MemoryQueue`] used by the CLI and tests.
//!
//! # Example
//!
//! ```ignore
//! use queue_minder::queue::{MemoryQueue, QueueService};
//!
//! let queue = MemoryQueue::new(tracks);
//! queue.move_tracks(0, 2, 1).await?;
//! let snapshot = QueueSnapshot::from(queue.get_queue().await?);
//! ```

mod memory;

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;

use crate::model::{Track, TrackId};

pub use memory::MemoryQueue;

/// Errors reported by a queue service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    #[error("Queue service unavailable: {0}")]
    Unavailable(String),

    #[error("Move out of range: {count} track(s) from {from} to {to} in a queue of {len}")]
    OutOfRange {
        from: usize,
        count: usize,
        to: usize,
        len: usize,
    },

    #[error("Unknown track id: {0}")]
    UnknownTrack(TrackId),

    #[error("Protocol error: {0}")]
    Protocol(String),
}

/// Playback-service operations the view engine depends on.
///
/// Implement this trait to connect a real player or to create mocks for
/// testing.
#[async_trait]
pub trait QueueService: Send + Sync {
    /// The full queue in play order.
    async fn get_queue(&self) -> Result<Vec<Track>, QueueError>;

    /// Id of the track currently playing, if any.
    async fn current_track_id(&self) -> Result<Option<TrackId>, QueueError>;

    /// Move `count` tracks starting at `from` so the block starts at `to`.
    async fn move_tracks(&self, from: usize, count: usize, to: usize) -> Result<(), QueueError>;

    /// Remove every listed track.
    async fn remove_tracks_by_id(&self, ids: &BTreeSet<TrackId>) -> Result<(), QueueError>;
}

/// Immutable copy of the queue at one point in time.
///
/// Cheap to clone; the tracks are shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueSnapshot {
    tracks: Arc<[Track]>,
}

impl Default for QueueSnapshot {
    fn default() -> Self {
        Self::copy_of(&[])
    }
}

impl QueueSnapshot {
    /// Defensive copy of a queue that may keep changing underneath us.
    pub fn copy_of(tracks: &[Track]) -> Self {
        Self {
            tracks: Arc::from(tracks),
        }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Flat position of a track.
    pub fn position_of(&self, id: TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }
}

impl From<Vec<Track>> for QueueSnapshot {
    fn from(tracks: Vec<Track>) -> Self {
        Self {
            tracks: Arc::from(tracks),
        }
    }
}
