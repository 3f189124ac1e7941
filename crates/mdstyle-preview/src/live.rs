//! Live render worker.
//!
//! Edits are queued on a channel and rendered by a background task. When
//! several edits are waiting, only the newest is rendered. Each render is
//! published as a single [`Snapshot`] on a watch channel, so subscribers
//! observe preview and code for the same revision or not at all.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use mdstyle_renderer::RenderPipeline;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::view::Snapshot;

/// A document revision waiting to be rendered.
#[derive(Debug)]
struct Edit {
    revision: u64,
    text: String,
}

/// Background renderer with last-write-wins semantics.
pub struct LivePreview {
    edits: mpsc::UnboundedSender<Edit>,
    snapshots: watch::Receiver<Arc<Snapshot>>,
    next_revision: AtomicU64,
    worker: JoinHandle<()>,
}

impl LivePreview {
    /// Start the render worker.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn spawn(pipeline: RenderPipeline) -> Self {
        let (edits, rx) = mpsc::unbounded_channel();
        let (tx, snapshots) = watch::channel(Arc::new(Snapshot::initial()));
        let worker = tokio::spawn(Self::run(pipeline, rx, tx));

        Self {
            edits,
            snapshots,
            next_revision: AtomicU64::new(1),
            worker,
        }
    }

    /// Queue a new document text and return its revision.
    ///
    /// Returns immediately; the rendered snapshot is delivered to
    /// subscribers once the worker gets to it.
    pub fn submit(&self, text: impl Into<String>) -> u64 {
        let revision = self.next_revision.fetch_add(1, Ordering::Relaxed);
        let edit = Edit {
            revision,
            text: text.into(),
        };
        if self.edits.send(edit).is_err() {
            tracing::warn!(revision, "Render worker stopped, edit dropped");
        }
        revision
    }

    /// Receiver notified whenever a new snapshot is published.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<Snapshot>> {
        self.snapshots.clone()
    }

    /// The most recently published snapshot.
    #[must_use]
    pub fn latest(&self) -> Arc<Snapshot> {
        Arc::clone(&*self.snapshots.borrow())
    }

    /// Wait until a snapshot at or after `revision` is published.
    ///
    /// Returns `None` if the worker stopped first.
    pub async fn wait_for(&self, revision: u64) -> Option<Arc<Snapshot>> {
        let mut rx = self.snapshots.clone();
        let snapshot = rx.wait_for(|s| s.revision >= revision).await.ok()?;
        Some(Arc::clone(&*snapshot))
    }

    /// Stop accepting edits and wait for the worker to finish queued work.
    pub async fn shutdown(self) {
        let Self { edits, worker, .. } = self;
        drop(edits);
        if let Err(err) = worker.await {
            tracing::warn!(error = %err, "Render worker failed");
        }
    }

    async fn run(
        pipeline: RenderPipeline,
        mut rx: mpsc::UnboundedReceiver<Edit>,
        tx: watch::Sender<Arc<Snapshot>>,
    ) {
        let mut published = 0;

        while let Some(mut edit) = rx.recv().await {
            let mut skipped = 0_usize;
            while let Ok(newer) = rx.try_recv() {
                if newer.revision > edit.revision {
                    edit = newer;
                }
                skipped += 1;
            }
            if edit.revision <= published {
                continue;
            }

            let start = Instant::now();
            let rendition = pipeline.render(&edit.text);
            published = edit.revision;
            tx.send_replace(Arc::new(Snapshot {
                revision: edit.revision,
                rendition,
            }));

            tracing::debug!(
                revision = edit.revision,
                skipped,
                elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Published snapshot"
            );
        }
    }
}
