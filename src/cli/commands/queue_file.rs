//! JSON queue files.
//!
//! ```json
//! { "current": 2, "tracks": [ { "id": 1, "title": "...", ... } ] }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result, ResultExt};
use crate::model::{Track, TrackId};

/// On-disk queue: tracks in play order plus the playing id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueFile {
    #[serde(default)]
    pub current: Option<TrackId>,
    pub tracks: Vec<Track>,
}

pub fn load(path: &Path) -> Result<QueueFile> {
    let contents = std::fs::read_to_string(path)
        .with_context(format!("Failed to read queue file {:?}", path))?;
    serde_json::from_str(&contents).map_err(|e| Error::queue_file(path, e))
}

pub fn save(path: &Path, file: &QueueFile) -> Result<()> {
    let contents = serde_json::to_string_pretty(file).map_err(|e| Error::queue_file(path, e))?;
    std::fs::write(path, contents).with_context(format!("Failed to write queue file {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::sample_queue;
    use tempfile::TempDir;

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("queue.json");
        let file = QueueFile {
            current: Some(TrackId(2)),
            tracks: sample_queue(),
        };

        save(&path, &file).unwrap();
        assert_eq!(load(&path).unwrap(), file);
    }

    #[test]
    fn test_load_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("queue.json");

        let err = load(&path).unwrap_err();
        assert!(matches!(err, Error::WithContext { .. }));

        std::fs::write(&path, "{ \"tracks\": 5 }").unwrap();
        let err = load(&path).unwrap_err();
        assert!(matches!(err, Error::QueueFile { .. }));
    }
}
