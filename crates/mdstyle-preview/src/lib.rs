//! Live preview for mdstyle.
//!
//! Keeps the two artifacts of a render, the styled tree shown as the
//! preview and the HTML shown as code, in sync with the document text:
//!
//! - [`ViewState`]: synchronous, renders on every edit.
//! - [`LivePreview`]: background worker, renders only the newest pending edit.
//! - [`FileWatcher`]: feeds a [`LivePreview`] from a file on disk.
//!
//! ```
//! use mdstyle_preview::{View, ViewMode, ViewState};
//!
//! let mut state = ViewState::default();
//! state.edit("*hi*");
//! state.set_view(ViewMode::Code);
//! assert_eq!(state.visible(), View::Code(r#"<p class="mb-4"><em>hi</em></p>"#));
//! ```

mod debouncer;
mod demo;
mod error;
mod live;
mod outline;
mod view;
mod watcher;

pub use demo::DEMO_MARKDOWN;
pub use error::WatchError;
pub use live::LivePreview;
pub use mdstyle_config::ViewMode;
pub use outline::outline;
pub use view::{Snapshot, View, ViewState};
pub use watcher::FileWatcher;

use mdstyle_config::Config;
use mdstyle_renderer::RenderPipeline;

/// Render pipeline configured from `[render]`.
#[must_use]
pub fn pipeline_from_config(config: &Config) -> RenderPipeline {
    RenderPipeline::new().with_gfm(config.render.gfm)
}
