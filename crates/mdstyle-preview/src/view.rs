//! View state: the current document, its latest render and the active view.

use std::sync::Arc;

use mdstyle_config::ViewMode;
use mdstyle_renderer::{RenderPipeline, Rendition, StyledNode};

/// One render pass tagged with the document revision it was computed from.
///
/// Preview and code always travel together in a snapshot, so a consumer
/// holding one can never show artifacts from two different revisions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    /// Document revision. Revision 0 is the empty document.
    pub revision: u64,
    pub rendition: Rendition,
}

impl Snapshot {
    /// Snapshot of the empty document at revision 0.
    #[must_use]
    pub fn initial() -> Self {
        Self {
            revision: 0,
            rendition: Rendition::empty(),
        }
    }

    #[must_use]
    pub fn tree(&self) -> &StyledNode {
        &self.rendition.tree
    }

    #[must_use]
    pub fn html(&self) -> &str {
        &self.rendition.html
    }

    /// The artifact shown for `mode`.
    #[must_use]
    pub fn view(&self, mode: ViewMode) -> View<'_> {
        match mode {
            ViewMode::Preview => View::Preview(self.tree()),
            ViewMode::Code => View::Code(self.html()),
        }
    }
}

/// The artifact currently visible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View<'a> {
    Preview(&'a StyledNode),
    Code(&'a str),
}

/// Document, latest snapshot and view selector for a single consumer.
///
/// Synchronous counterpart of [`LivePreview`](crate::LivePreview): every
/// [`edit`](Self::edit) that changes the text renders once and swaps in the
/// new snapshot before returning.
#[derive(Debug)]
pub struct ViewState {
    pipeline: RenderPipeline,
    document: String,
    snapshot: Arc<Snapshot>,
    active: ViewMode,
}

impl ViewState {
    #[must_use]
    pub fn new(pipeline: RenderPipeline, active: ViewMode) -> Self {
        Self {
            pipeline,
            document: String::new(),
            snapshot: Arc::new(Snapshot::initial()),
            active,
        }
    }

    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    #[must_use]
    pub fn revision(&self) -> u64 {
        self.snapshot.revision
    }

    /// Replace the document text.
    ///
    /// Returns `true` if the text changed and a new snapshot was rendered.
    pub fn edit(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if text == self.document {
            return false;
        }
        let rendition = self.pipeline.render(&text);
        self.document = text;
        self.snapshot = Arc::new(Snapshot {
            revision: self.snapshot.revision + 1,
            rendition,
        });
        true
    }

    /// Switch the active view. Never re-renders.
    pub fn set_view(&mut self, mode: ViewMode) {
        self.active = mode;
    }

    #[must_use]
    pub fn active_view(&self) -> ViewMode {
        self.active
    }

    /// Shared handle to the latest snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.snapshot)
    }

    /// The artifact for the active view.
    #[must_use]
    pub fn visible(&self) -> View<'_> {
        self.snapshot.view(self.active)
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(RenderPipeline::new(), ViewMode::default())
    }
}
