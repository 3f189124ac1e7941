//! Markdown to styled HTML.
//!
//! This crate turns Markdown text into two artifacts produced by one pass:
//! a styled node tree (for a rendered preview) and the equivalent HTML
//! string (for a code view).
//!
//! # Architecture
//!
//! - [`TreeBuilder`] folds the pulldown-cmark event stream into a [`Node`] tree
//! - [`style_for`] is the Node Style Registry: a total, pure table from
//!   [`NodeType`] to [`StyleRule`]
//! - [`StyledNode`] is the parsed tree with a rule on every node
//! - [`HtmlSerializer`] writes a styled tree as HTML
//!
//! [`RenderPipeline`] chains the three steps.
//!
//! # Example
//!
//! ```
//! use mdstyle_renderer::RenderPipeline;
//!
//! let rendition = RenderPipeline::new().render("**Bold** text");
//! assert_eq!(
//!     rendition.html,
//!     r#"<p class="mb-4"><strong>Bold</strong> text</p>"#
//! );
//! assert_eq!(rendition.tree.plain_text(), "Bold text");
//! ```

mod html;
mod node;
mod pipeline;
mod style;
mod styled;
mod util;

pub use html::{HtmlSerializer, escape_html, safe_url};
pub use node::{CellAlignment, CodeDisplay, MAX_DEPTH, Node, NodeKind, NodeType, TreeBuilder};
pub use pipeline::{RenderPipeline, Rendition, render};
pub use style::{ChildPolicy, Container, Element, StyleContext, StyleRule, lookup, style_for};
pub use styled::StyledNode;
