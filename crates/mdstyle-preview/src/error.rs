//! Watch error types.

use std::path::PathBuf;

/// Error starting a [`FileWatcher`](crate::FileWatcher).
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    /// The watched document could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The watched path has no parent directory.
    #[error("Cannot watch {}: no parent directory", .0.display())]
    NoParent(PathBuf),
    /// The platform watcher failed.
    #[error("File watcher error: {0}")]
    Notify(#[from] notify::Error),
}
