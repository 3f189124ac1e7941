//! Document file watcher.
//!
//! Feeds a [`LivePreview`] with the contents of a Markdown file every time
//! it changes on disk.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::debouncer::{EventDebouncer, FsEventKind};
use crate::error::WatchError;
use crate::live::LivePreview;

/// How often debounced events are checked.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Watches a single Markdown file and submits its text on change.
pub struct FileWatcher {
    path: PathBuf,
    debounce: Duration,
    watcher: Option<RecommendedWatcher>,
    tasks: Vec<JoinHandle<()>>,
}

impl FileWatcher {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, debounce: Duration) -> Self {
        Self {
            path: path.into(),
            debounce,
            watcher: None,
            tasks: Vec::new(),
        }
    }

    /// Watched file path. Canonical once [`start`](Self::start) succeeded.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Submit the current file contents and start watching for changes.
    ///
    /// Must be called from within a tokio runtime. The parent directory is
    /// watched rather than the file itself so editors that save by
    /// replacing the file keep being tracked.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the watcher cannot be
    /// created.
    pub fn start(&mut self, preview: Arc<LivePreview>) -> Result<u64, WatchError> {
        let path = self
            .path
            .canonicalize()
            .map_err(|source| WatchError::Read {
                path: self.path.clone(),
                source,
            })?;
        let parent = path
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| WatchError::NoParent(path.clone()))?;

        let initial = std::fs::read_to_string(&path).map_err(|source| WatchError::Read {
            path: path.clone(),
            source,
        })?;
        let revision = preview.submit(initial.as_str());
        tracing::info!(path = %path.display(), revision, "Watching document");

        let (tx, mut rx) = mpsc::channel::<Event>(100);
        let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
            match res {
                Ok(event) => {
                    let _ = tx.blocking_send(event);
                }
                Err(err) => tracing::warn!(error = %err, "File watcher error"),
            }
        })?;
        watcher.watch(&parent, RecursiveMode::NonRecursive)?;
        self.watcher = Some(watcher);

        let debouncer = Arc::new(EventDebouncer::new(self.debounce));
        let debouncer_for_record = Arc::clone(&debouncer);
        let path_for_record = path.clone();
        let path_for_read = path.clone();

        self.tasks.push(tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                Self::record_event(&event, &path_for_record, &debouncer_for_record);
            }
        }));

        self.tasks.push(tokio::spawn(async move {
            let mut interval = tokio::time::interval(POLL_INTERVAL);
            let mut last = initial;

            loop {
                interval.tick().await;

                let Some(kind) = debouncer.take_ready() else {
                    continue;
                };
                if let Some(text) = Self::handle_change(&path_for_read, kind, &last).await {
                    preview.submit(text.as_str());
                    last = text;
                }
            }
        }));

        self.path = path;
        Ok(revision)
    }

    /// Stop watching. Already submitted edits are still rendered.
    pub fn stop(&mut self) {
        self.watcher = None;
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }

    /// Map a notify event kind to the kinds the debouncer tracks.
    fn event_kind(kind: &EventKind) -> Option<FsEventKind> {
        match kind {
            EventKind::Create(_) => Some(FsEventKind::Created),
            EventKind::Modify(_) => Some(FsEventKind::Modified),
            EventKind::Remove(_) => Some(FsEventKind::Removed),
            _ => None,
        }
    }

    /// Record a raw filesystem event if it touches the watched document.
    ///
    /// The parent directory is watched, so events for siblings are dropped.
    fn record_event(event: &Event, watched: &Path, debouncer: &EventDebouncer) {
        let Some(kind) = Self::event_kind(&event.kind) else {
            return;
        };
        if event.paths.iter().any(|p| p.as_path() == watched) {
            debouncer.record(kind);
            tracing::trace!(path = %watched.display(), ?kind, "Recorded filesystem event");
        }
    }

    /// Re-read the document after a debounced change.
    ///
    /// Returns the new text when it differs from `last`.
    async fn handle_change(path: &Path, kind: FsEventKind, last: &str) -> Option<String> {
        if kind == FsEventKind::Removed {
            tracing::warn!(path = %path.display(), "Document removed, keeping last render");
            return None;
        }
        match tokio::fs::read_to_string(path).await {
            Ok(text) if text == last => None,
            Ok(text) => {
                tracing::info!(path = %path.display(), ?kind, "Document changed");
                Some(text)
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "Failed to read document");
                None
            }
        }
    }
}

impl Drop for FileWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}
