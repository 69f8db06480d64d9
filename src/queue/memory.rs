//! In-process queue service.

use std::collections::BTreeSet;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use super::{QueueError, QueueService};
use crate::model::{Track, TrackId};

/// A queue held in memory, with the same block-move semantics as a real
/// playback server.
#[derive(Debug, Default)]
pub struct MemoryQueue {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    tracks: Vec<Track>,
    current: Option<TrackId>,
}

impl MemoryQueue {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self {
            inner: RwLock::new(Inner {
                tracks,
                current: None,
            }),
        }
    }

    /// Mark a track as playing. Unknown ids are rejected.
    pub fn set_current(&self, id: Option<TrackId>) -> Result<(), QueueError> {
        let mut inner = self.inner.write();
        if let Some(id) = id
            && !inner.tracks.iter().any(|t| t.id == id)
        {
            return Err(QueueError::UnknownTrack(id));
        }
        inner.current = id;
        Ok(())
    }

    /// Id of the playing track.
    pub fn current(&self) -> Option<TrackId> {
        self.inner.read().current
    }

    /// Copy of the tracks in play order.
    pub fn tracks(&self) -> Vec<Track> {
        self.inner.read().tracks.clone()
    }

    pub fn ids(&self) -> Vec<TrackId> {
        self.inner.read().tracks.iter().map(|t| t.id).collect()
    }

    pub fn len(&self) -> usize {
        self.inner.read().tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().tracks.is_empty()
    }
}

#[async_trait]
impl QueueService for MemoryQueue {
    async fn get_queue(&self) -> Result<Vec<Track>, QueueError> {
        Ok(self.tracks())
    }

    async fn current_track_id(&self) -> Result<Option<TrackId>, QueueError> {
        Ok(self.current())
    }

    async fn move_tracks(&self, from: usize, count: usize, to: usize) -> Result<(), QueueError> {
        let mut inner = self.inner.write();
        let len = inner.tracks.len();

        let past_end = |start: usize| start.checked_add(count).is_none_or(|end| end > len);
        if count == 0 || past_end(from) || past_end(to) {
            return Err(QueueError::OutOfRange {
                from,
                count,
                to,
                len,
            });
        }

        let block: Vec<Track> = inner.tracks.drain(from..from + count).collect();
        inner.tracks.splice(to..to, block);
        debug!(from, count, to, "Moved block in memory queue");
        Ok(())
    }

    async fn remove_tracks_by_id(&self, ids: &BTreeSet<TrackId>) -> Result<(), QueueError> {
        let mut inner = self.inner.write();
        let before = inner.tracks.len();
        inner.tracks.retain(|t| !ids.contains(&t.id));

        if inner.current.is_some_and(|id| ids.contains(&id)) {
            inner.current = None;
        }
        debug!(removed = before - inner.tracks.len(), "Removed tracks from memory queue");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{mixed_queue, sample_queue};

    fn ids(values: &[u32]) -> Vec<TrackId> {
        values.iter().copied().map(TrackId).collect()
    }

    #[tokio::test]
    async fn test_move_block_down() {
        let queue = MemoryQueue::new(sample_queue());
        queue.move_tracks(0, 2, 1).await.unwrap();
        assert_eq!(queue.ids(), ids(&[3, 1, 2]));
    }

    #[tokio::test]
    async fn test_move_block_up() {
        let queue = MemoryQueue::new(mixed_queue());
        queue.move_tracks(4, 2, 0).await.unwrap();
        assert_eq!(queue.ids(), ids(&[5, 6, 1, 2, 3, 4, 7, 8, 9]));
    }

    #[tokio::test]
    async fn test_move_out_of_range() {
        let queue = MemoryQueue::new(sample_queue());
        let err = queue.move_tracks(2, 2, 0).await.unwrap_err();
        assert!(matches!(err, QueueError::OutOfRange { len: 3, .. }));
        assert_eq!(queue.ids(), ids(&[1, 2, 3]));
    }

    #[tokio::test]
    async fn test_move_with_overflowing_bounds_is_rejected() {
        let queue = MemoryQueue::new(sample_queue());
        let err = queue.move_tracks(usize::MAX, 1, 0).await.unwrap_err();
        assert!(matches!(err, QueueError::OutOfRange { len: 3, .. }));

        let err = queue.move_tracks(0, 1, usize::MAX).await.unwrap_err();
        assert!(matches!(err, QueueError::OutOfRange { .. }));
        assert_eq!(queue.ids(), ids(&[1, 2, 3]));
    }

    #[tokio::test]
    async fn test_remove_clears_current() {
        let queue = MemoryQueue::new(sample_queue());
        queue.set_current(Some(TrackId(2))).unwrap();

        queue
            .remove_tracks_by_id(&BTreeSet::from([TrackId(2), TrackId(3)]))
            .await
            .unwrap();

        assert_eq!(queue.ids(), ids(&[1]));
        assert_eq!(queue.current_track_id().await.unwrap(), None);
    }

    #[test]
    fn test_set_current_rejects_unknown() {
        let queue = MemoryQueue::new(sample_queue());
        assert_eq!(
            queue.set_current(Some(TrackId(42))),
            Err(QueueError::UnknownTrack(TrackId(42)))
        );
    }
}
