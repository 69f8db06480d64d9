//! Crate-wide error types.
//!
//! Library modules use specific error types via `thiserror`, while the CLI
//! binary uses `anyhow` for convenient error propagation.
//!
//! # Design
//!
//! - [`Error`]: top-level error enum
//! - Module-specific errors ([`QueueError`], [`ConfigError`]) for detailed
//!   handling
//! - The view engine itself never fails; only the queue service and file
//!   I/O around it do
//!
//! # Example
//!
//! ```ignore
//! use queue_minder::error::{Result, ResultExt};
//!
//! async fn drop_row(ctl: &mut QueueController<S>) -> Result<()> {
//!     ctl.drag_dropped(0, 1).await.with_context("while reordering")?;
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;

use crate::config::ConfigError;
use crate::queue::QueueError;

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Playback/queue service failure
    #[error("Queue error: {0}")]
    Queue(#[from] QueueError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed queue file
    #[error("Invalid queue file {path}: {source}")]
    QueueFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a queue file error.
    pub fn queue_file(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::QueueFile {
            path: path.into(),
            source,
        }
    }

    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, QueueError> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Queue(e).context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Io(e).context(ctx))
    }
}
